/// The two navigable views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    AddBox,
    ListBoxes,
}

/// Path prefix the views are also reachable under
const BASE_PATH: &str = "/shippingBoxCalculator";

impl View {
    /// Resolve a path; anything unrecognised redirects to the add view
    pub fn from_path(path: &str) -> View {
        let trimmed = path.trim().trim_end_matches('/');
        let relative = trimmed.strip_prefix(BASE_PATH).unwrap_or(trimmed);

        match relative {
            "/list" => View::ListBoxes,
            _ => View::AddBox,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            View::AddBox => "/add",
            View::ListBoxes => "/list",
        }
    }

    /// Navigation label
    pub fn title(self) -> &'static str {
        match self {
            View::AddBox => "Add Box",
            View::ListBoxes => "View Boxes",
        }
    }

    pub fn toggle(self) -> View {
        match self {
            View::AddBox => View::ListBoxes,
            View::ListBoxes => View::AddBox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(View::from_path("/add"), View::AddBox);
        assert_eq!(View::from_path("/"), View::AddBox);
        assert_eq!(View::from_path("/list"), View::ListBoxes);
        assert_eq!(View::from_path("/list/"), View::ListBoxes);
        assert_eq!(View::from_path("/shippingBoxCalculator"), View::AddBox);
        assert_eq!(View::from_path("/shippingBoxCalculator/add"), View::AddBox);
        assert_eq!(View::from_path("/shippingBoxCalculator/list"), View::ListBoxes);
    }

    #[test]
    fn test_unknown_paths_redirect_to_add() {
        assert_eq!(View::from_path("/nowhere"), View::AddBox);
        assert_eq!(View::from_path(""), View::AddBox);
        assert_eq!(View::from_path("list"), View::AddBox);
        assert_eq!(View::from_path("/list/extra"), View::AddBox);
    }

    #[test]
    fn test_path_round_trip_and_toggle() {
        for view in [View::AddBox, View::ListBoxes] {
            assert_eq!(View::from_path(view.path()), view);
            assert_eq!(view.toggle().toggle(), view);
        }
        assert_eq!(View::default(), View::AddBox);
    }
}
