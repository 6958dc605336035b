use crate::event::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shipbox_lib::config::AppConfig;
use shipbox_lib::form::BoxForm;
use shipbox_lib::notifications::{NotificationCenter, Severity};
use shipbox_lib::route::View;
use shipbox_lib::shipping::{Country, Rgb};
use shipbox_lib::storage::BoxStore;

/// Fields of the add-box form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ReceiverName,
    Weight,
    Color,
    Country,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::ReceiverName,
        FormField::Weight,
        FormField::Color,
        FormField::Country,
    ];

    fn index(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        FormField::ALL[(self.index() + 1) % FormField::ALL.len()]
    }

    pub fn previous(self) -> FormField {
        let len = FormField::ALL.len();
        FormField::ALL[(self.index() + len - 1) % len]
    }
}

/// Main application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    /// Persisted box records
    pub store: BoxStore,
    /// Add-box form
    pub form: BoxForm,
    /// Active notifications
    pub notifications: NotificationCenter,

    // Navigation state
    /// Current view
    pub view: View,
    /// Focused form field
    pub focused_field: FormField,
    /// Hex digits typed into the color field (without '#')
    pub color_input: String,
    /// First visible row in the list view
    pub list_scroll: usize,

    /// Should the app quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, store: BoxStore, notifications: NotificationCenter) -> Self {
        let view = View::from_path(&config.start_path);
        let form = BoxForm::new();
        let color_input = hex_digits(form.color);

        Self {
            config,
            store,
            form,
            notifications,
            view,
            focused_field: FormField::ReceiverName,
            color_input,
            list_scroll: 0,
            should_quit: false,
        }
    }

    /// Handle incoming events
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(text) => self.handle_paste(&text),
            AppEvent::NotificationExpired(id) => {
                self.notifications.dismiss(&id);
            }
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        // Global shortcuts (work in any view)
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('a') => self.navigate(View::AddBox),
                KeyCode::Char('l') => self.navigate(View::ListBoxes),
                KeyCode::Char('d') => self.notifications.clear(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => return self.navigate(View::AddBox),
            KeyCode::F(2) => return self.navigate(View::ListBoxes),
            KeyCode::Esc => {
                self.notifications.dismiss_latest();
                return;
            }
            _ => {}
        }

        match self.view {
            View::AddBox => self.handle_key_form(key),
            View::ListBoxes => self.handle_key_list(key),
        }
    }

    fn navigate(&mut self, view: View) {
        if self.view != view {
            tracing::debug!("Navigating to {}", view.path());
        }
        self.view = view;
        self.list_scroll = 0;
    }

    fn handle_key_form(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus(self.focused_field.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus(self.focused_field.previous()),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Right if self.focused_field == FormField::Country => self.form.next_country(),
            KeyCode::Left if self.focused_field == FormField::Country => {
                self.form.previous_country()
            }
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Char(c) => self.handle_char_input(c),
            _ => {}
        }
    }

    fn handle_key_list(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.list_scroll = self.list_scroll.saturating_sub(1),
            KeyCode::Down => {
                if self.list_scroll + 1 < self.store.len() {
                    self.list_scroll += 1;
                }
            }
            KeyCode::Home => self.list_scroll = 0,
            KeyCode::End => self.list_scroll = self.store.len().saturating_sub(1),
            _ => {}
        }
    }

    fn focus(&mut self, field: FormField) {
        // An unfinished color falls back to the last valid one
        if self.focused_field == FormField::Color && field != FormField::Color {
            self.color_input = hex_digits(self.form.color);
        }
        self.focused_field = field;
    }

    fn handle_char_input(&mut self, c: char) {
        match self.focused_field {
            FormField::ReceiverName => {
                let mut value = self.form.receiver_name.clone();
                value.push(c);
                self.form.set_receiver_name(&value, &mut self.notifications);
            }
            FormField::Weight => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    let mut value = self.form.weight.clone();
                    value.push(c);
                    self.form.set_weight(&value, &mut self.notifications);
                }
            }
            FormField::Color => {
                if c.is_ascii_hexdigit() && self.color_input.len() < 6 {
                    self.color_input.push(c.to_ascii_lowercase());
                    if self.color_input.len() == 6 {
                        self.form.set_color(&self.color_input);
                    }
                }
            }
            FormField::Country => match c {
                ' ' => self.form.next_country(),
                letter => {
                    let upper = letter.to_ascii_uppercase();
                    if let Some(country) =
                        Country::all().iter().find(|c| c.name().starts_with(upper))
                    {
                        self.form.set_country(Some(*country));
                    }
                }
            },
        }
    }

    fn handle_backspace(&mut self) {
        match self.focused_field {
            FormField::ReceiverName => {
                let mut value = self.form.receiver_name.clone();
                value.pop();
                self.form.set_receiver_name(&value, &mut self.notifications);
            }
            FormField::Weight => {
                let mut value = self.form.weight.clone();
                value.pop();
                self.form.set_weight(&value, &mut self.notifications);
            }
            FormField::Color => {
                self.color_input.pop();
            }
            FormField::Country => self.form.set_country(None),
        }
    }

    /// Handle paste event: insert into the focused field
    fn handle_paste(&mut self, text: &str) {
        if self.view != View::AddBox {
            return;
        }
        let text = text.trim();

        match self.focused_field {
            FormField::ReceiverName => {
                let value = format!("{}{}", self.form.receiver_name, text.replace('\n', " "));
                self.form.set_receiver_name(&value, &mut self.notifications);
            }
            FormField::Weight => {
                let value = format!("{}{}", self.form.weight, text);
                self.form.set_weight(&value, &mut self.notifications);
            }
            FormField::Color => {
                if self.form.set_color(text) {
                    self.color_input = hex_digits(self.form.color);
                } else {
                    self.notifications.show(
                        format!("\"{}\" is not a hex color", text),
                        Severity::Info,
                    );
                }
            }
            FormField::Country => {
                if let Some(country) = Country::from_name(text) {
                    self.form.set_country(Some(country));
                }
            }
        }
    }

    fn submit_form(&mut self) {
        match self.form.submit(&mut self.store, &mut self.notifications) {
            Ok(Some(_)) => {
                self.color_input = hex_digits(self.form.color);
                self.focused_field = FormField::ReceiverName;
            }
            Ok(None) => {
                // Jump to the first field that needs attention
                let errors = &self.form.errors;
                if errors.receiver_name.is_some() {
                    self.focused_field = FormField::ReceiverName;
                } else if errors.weight.is_some() {
                    self.focused_field = FormField::Weight;
                } else if errors.country.is_some() {
                    self.focused_field = FormField::Country;
                }
            }
            Err(e) => {
                tracing::error!("Failed to save boxes: {}", e);
                self.color_input = hex_digits(self.form.color);
                self.focused_field = FormField::ReceiverName;
                self.notifications
                    .show(format!("Box added but could not be saved: {}", e), Severity::Error);
            }
        }
    }
}

fn hex_digits(color: Rgb) -> String {
    color.to_hex().trim_start_matches('#').to_string()
}
