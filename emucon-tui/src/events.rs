//! Event types for the console event loop.

use crossterm::event::KeyEvent;
use emucon_query::Notification;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    Toast(Notification),
    /// Outcome of a create form submission. `Err` carries the message the
    /// notifier already surfaced.
    FormSubmitted(Result<(), String>),
}
