use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use shipbox_lib::notifications::{ExpiryCallback, NotificationId};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),
    /// Paste event (bracketed paste or clipboard read)
    Paste(String),
    /// A notification's timer ran out
    NotificationExpired(NotificationId),
}

/// Event handler for the TUI application
pub struct EventHandler {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Callback that feeds notification expiries back into the event loop
    pub fn expiry_callback(&self) -> ExpiryCallback {
        let sender = self.sender.clone();
        Arc::new(move |id| {
            let _ = sender.send(AppEvent::NotificationExpired(id));
        })
    }

    /// Receive the next event (blocking)
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    /// Spawn the keyboard event listener task
    pub fn spawn_keyboard_listener(&self) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            while let Some(maybe_event) = reader.next().await {
                match maybe_event {
                    Ok(CrosstermEvent::Key(key)) => {
                        // Windows reports releases too
                        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
                            continue;
                        }
                        let is_ctrl_v = key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('v');
                        if is_ctrl_v {
                            if let Some(text) = read_clipboard() {
                                let _ = sender.send(AppEvent::Paste(text));
                                continue;
                            }
                        }
                        if sender.send(AppEvent::Key(key)).is_err() {
                            break; // Channel closed, stop listener
                        }
                    }
                    Ok(CrosstermEvent::Paste(text)) => {
                        if sender.send(AppEvent::Paste(text)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {
                        // Mouse and resize events just trigger a redraw on the next key
                    }
                    Err(e) => {
                        tracing::warn!("Keyboard event error: {}", e);
                    }
                }
            }
        });
    }
}

fn read_clipboard() -> Option<String> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("Clipboard unavailable: {}", e);
            None
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
