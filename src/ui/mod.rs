// UI module exports
pub mod views;

pub use views::{
    render_add_view,
    render_header,
    render_hints,
    render_list_view,
    render_notifications,
};

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use shipbox_lib::route::View;

/// Most notifications shown at once
const MAX_VISIBLE_NOTIFICATIONS: usize = 5;

/// Draw the whole screen
pub fn render(f: &mut ratatui::Frame, app: &App) {
    let notification_height = app.notifications.len().min(MAX_VISIBLE_NOTIFICATIONS) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                   // Header + tabs
            Constraint::Min(0),                      // Current view
            Constraint::Length(notification_height), // Notifications
            Constraint::Length(2),                   // Hints
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match app.view {
        View::AddBox => render_add_view(f, app, chunks[1]),
        View::ListBoxes => render_list_view(f, app, chunks[1]),
    }

    render_notifications(f, app, chunks[2]);
    render_hints(f, app, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use shipbox_lib::config::AppConfig;
    use shipbox_lib::notifications::{NotificationCenter, Severity};
    use shipbox_lib::shipping::{BoxDraft, Country, Rgb};
    use shipbox_lib::storage::{BoxStore, BOXES_FILE};
    use tempfile::TempDir;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn test_app(dir: &TempDir, config: AppConfig) -> App {
        App::new(config, BoxStore::open(dir.path().join(BOXES_FILE)), NotificationCenter::new())
    }

    #[test]
    fn test_add_view_renders_form() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, AppConfig::default());
        app.notifications.show("Box added successfully!", Severity::Success);

        let screen = draw(&app);

        assert!(screen.contains("Shipping Box Calculator"));
        assert!(screen.contains("Add New Shipping Box"));
        assert!(screen.contains("Receiver Name"));
        assert!(screen.contains("0/50"));
        assert!(screen.contains("RGB: (255, 255, 255)"));
        assert!(screen.contains("Select a country"));
        assert!(screen.contains("Box added successfully!"));
    }

    #[test]
    fn test_list_view_empty_state() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig { start_path: "/list".to_string(), ..AppConfig::default() };
        let app = test_app(&dir, config);

        let screen = draw(&app);
        assert!(screen.contains("No boxes added yet."));
    }

    #[test]
    fn test_list_view_shows_records_and_totals() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            currency: "USD".to_string(),
            start_path: "/list".to_string(),
            ..AppConfig::default()
        };
        let mut app = test_app(&dir, config);
        app.store
            .add(BoxDraft {
                receiver_name: "Ada".to_string(),
                weight: 2.0,
                color: Rgb::new(26, 43, 60),
                country: Country::China,
            })
            .unwrap();

        let screen = draw(&app);

        assert!(screen.contains("Shipping Cost (USD)"));
        assert!(screen.contains("Ada"));
        assert!(screen.contains("(26, 43, 60)"));
        assert!(screen.contains("$23.06"));
        assert!(screen.contains("Total Boxes: 1"));
    }

    #[test]
    fn test_list_view_total_weight_two_decimals() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig { start_path: "/list".to_string(), ..AppConfig::default() };
        let mut app = test_app(&dir, config);
        for weight in [0.1, 0.2] {
            app.store
                .add(BoxDraft {
                    receiver_name: "Ada".to_string(),
                    weight,
                    color: Rgb::WHITE,
                    country: Country::Sweden,
                })
                .unwrap();
        }

        let screen = draw(&app);

        assert!(screen.contains("Total Weight: 0.30 kg"));
        assert!(!screen.contains("0.30000000000000004"));
    }
}
