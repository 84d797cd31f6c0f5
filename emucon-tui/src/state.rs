//! Application state and input handling.

use crossterm::event::{KeyCode, KeyEvent};
use emucon_hooks::Hooks;
use emucon_query::{Notification, NotificationLevel};
use tokio::sync::mpsc;

use crate::config::TuiConfig;
use crate::dialog::{DeleteTarget, Dialog};
use crate::events::TuiEvent;
use crate::forms::{Form, FormKind};
use crate::keys::{map_key, Action};
use crate::nav::View;
use crate::screen::Screen;
use crate::theme::SynthBruteTheme;

/// Toasts kept for the footer.
const MAX_NOTIFICATIONS: usize = 50;

pub struct App {
    pub config: TuiConfig,
    pub hooks: Hooks,
    pub theme: SynthBruteTheme,
    pub active_view: View,
    pub screen: Screen,
    pub dialog: Option<Dialog>,
    pub notifications: Vec<Notification>,
    events: mpsc::Sender<TuiEvent>,
}

impl App {
    pub fn new(
        config: TuiConfig,
        hooks: Hooks,
        active_view: View,
        events: mpsc::Sender<TuiEvent>,
    ) -> Self {
        let screen = Screen::mount(&hooks, active_view);
        Self {
            config,
            hooks,
            theme: SynthBruteTheme::synthbrute(),
            active_view,
            screen,
            dialog: None,
            notifications: Vec::new(),
            events,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.push_notification(Notification::new(level, message));
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
    }

    /// Unmount the current screen and mount `view`.
    pub fn switch_view(&mut self, view: View) {
        if view == self.active_view {
            return;
        }
        self.dialog = None;
        self.active_view = view;
        self.screen = Screen::mount(&self.hooks, view);
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(Dialog::Create(form)) = &mut self.dialog {
            match key.code {
                KeyCode::Esc => self.dialog = None,
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                KeyCode::Enter => self.submit_form(),
                _ => form.input(key),
            }
            return false;
        }
        match map_key(key) {
            Some(action) => self.handle_action(action),
            None => false,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> bool {
        if let Some(dialog) = self.dialog.take() {
            return self.handle_dialog_action(dialog, action);
        }
        match action {
            Action::Quit => return true,
            Action::NextView => self.switch_view(self.active_view.next()),
            Action::PrevView => self.switch_view(self.active_view.previous()),
            Action::SwitchView(index) => {
                if let Some(view) = View::from_index(index) {
                    self.switch_view(view);
                }
            }
            Action::MoveDown => self.screen.focused_mut().select_next(),
            Action::MoveUp => self.screen.focused_mut().select_previous(),
            Action::Refresh => self.screen.refetch(),
            Action::OpenHelp => self.dialog = Some(Dialog::Help),
            Action::NewItem => self.open_create(),
            Action::DeleteItem => {
                if let Some(target) = self.screen.delete_target() {
                    self.dialog = Some(Dialog::ConfirmDelete(target));
                }
            }
            Action::Confirm => {
                self.screen.open(&self.hooks);
            }
            Action::Cancel => {
                self.screen.close();
            }
        }
        false
    }

    fn handle_dialog_action(&mut self, dialog: Dialog, action: Action) -> bool {
        match (dialog, action) {
            (_, Action::Quit) => return true,
            (Dialog::ConfirmDelete(target), Action::Confirm) => self.confirm_delete(target),
            (Dialog::ChooseForm { kinds, selected }, Action::Confirm) => {
                if let Some(kind) = kinds.get(selected) {
                    self.dialog = Some(Dialog::Create(Form::new(*kind)));
                }
            }
            (Dialog::ChooseForm { kinds, selected }, Action::MoveDown) => {
                let selected = (selected + 1).min(kinds.len().saturating_sub(1));
                self.dialog = Some(Dialog::ChooseForm { kinds, selected });
            }
            (Dialog::ChooseForm { kinds, selected }, Action::MoveUp) => {
                let selected = selected.saturating_sub(1);
                self.dialog = Some(Dialog::ChooseForm { kinds, selected });
            }
            (_, Action::Cancel) => {}
            (dialog, _) => self.dialog = Some(dialog),
        }
        false
    }

    fn confirm_delete(&mut self, target: DeleteTarget) {
        let closes_sub = self
            .screen
            .sub
            .as_ref()
            .map(|sub| sub.parent == target.name())
            .unwrap_or(false);
        target.run(&self.hooks);
        if closes_sub {
            self.screen.close();
        }
    }

    fn open_create(&mut self) {
        let kinds = FormKind::for_service(self.active_view.service());
        self.dialog = match kinds {
            [] => None,
            [kind] => Some(Dialog::Create(Form::new(*kind))),
            _ => Some(Dialog::ChooseForm { kinds, selected: 0 }),
        };
    }

    fn submit_form(&mut self) {
        let Some(Dialog::Create(form)) = &mut self.dialog else {
            return;
        };
        if form.pending {
            return;
        }
        let input = match form.validate() {
            Ok(input) => input,
            Err(err) => {
                form.error = Some(err);
                return;
            }
        };
        form.error = None;
        form.pending = true;

        let hooks = self.hooks.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = input
                .submit(&hooks)
                .await
                .map_err(|err| err.message().to_string());
            let _ = events.send(TuiEvent::FormSubmitted(result)).await;
        });
    }

    /// Close the form on success; keep it open for correction on failure.
    pub fn form_submitted(&mut self, result: Result<(), String>) {
        let Some(Dialog::Create(form)) = &mut self.dialog else {
            return;
        };
        if result.is_ok() {
            self.dialog = None;
        } else {
            form.pending = false;
        }
    }

    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Input(key) => return self.handle_key(key),
            TuiEvent::Toast(notification) => self.push_notification(notification),
            TuiEvent::FormSubmitted(result) => self.form_submitted(result),
            TuiEvent::Resize { .. } | TuiEvent::Tick => {}
        }
        false
    }
}
