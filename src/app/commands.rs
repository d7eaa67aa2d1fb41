//! Command handlers - screen logic for processing UI events and store updates

use chrono::{DateTime, Utc};

use crate::app::state::{AccountDialog, DialogKind, DialogSubmission, ScreenState, Toast};
use crate::messages::ui_events::InputMode;
use crate::models::{Account, OperationOutcome};

impl ScreenState {
    // ========================
    // List
    // ========================

    /// Replace the list with a fresh server snapshot
    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
        if self.selected >= self.accounts.len() {
            self.selected = self.accounts.len().saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if !self.accounts.is_empty() {
            self.selected = (self.selected + 1) % self.accounts.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.accounts.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.accounts.len() - 1);
        }
    }

    /// Id of the selected row, for delete
    pub fn delete_target(&self) -> Option<String> {
        self.selected_account().and_then(|a| a.id.clone())
    }

    /// Id and flipped status of the selected row, for the toggle
    pub fn toggle_target(&self) -> Option<(String, bool)> {
        let account = self.selected_account()?;
        Some((account.id.clone()?, !account.is_active))
    }

    // ========================
    // Dialog
    // ========================

    pub fn open_add_dialog(&mut self) {
        self.dialog = Some(AccountDialog::add());
        self.input_mode = InputMode::Dialog;
    }

    pub fn open_edit_dialog(&mut self) {
        if let Some(account) = self.selected_account() {
            self.dialog = Some(AccountDialog::edit(account));
            self.input_mode = InputMode::Dialog;
        }
    }

    pub fn dialog_char(&mut self, c: char) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.current_mut().push(c);
        }
    }

    pub fn dialog_backspace(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.current_mut().pop();
        }
    }

    pub fn dialog_next_field(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.field = dialog.field.next();
        }
    }

    pub fn dialog_prev_field(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.field = dialog.field.prev();
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
        self.input_mode = InputMode::Normal;
    }

    /// Close the dialog and return what it asks for
    pub fn submit_dialog(&mut self) -> Option<DialogSubmission> {
        let dialog = self.dialog.take()?;
        self.input_mode = InputMode::Normal;

        let submission = match dialog.kind {
            DialogKind::Add => DialogSubmission::Add {
                name: dialog.name,
                balance: dialog.balance,
                currency: dialog.currency,
            },
            DialogKind::Edit(original) => DialogSubmission::Edit(Account {
                name: dialog.name,
                balance: dialog.balance,
                currency: dialog.currency,
                ..original
            }),
        };
        Some(submission)
    }

    // ========================
    // Toasts
    // ========================

    pub fn show_toast(&mut self, outcome: OperationOutcome, now: DateTime<Utc>) {
        self.toast = Some(Toast {
            outcome,
            shown_at: now,
        });
    }

    pub fn expire_toast(&mut self, now: DateTime<Utc>) {
        let ttl = self.toast_secs;
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now, ttl)) {
            self.toast = None;
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::DialogField;
    use chrono::Duration;

    fn account(id: &str, name: &str, is_active: bool) -> Account {
        Account {
            is_active,
            ..Account::new(name, "5.00", "EUR").with_id(id)
        }
    }

    fn state_with(accounts: Vec<Account>) -> ScreenState {
        let mut state = ScreenState::new("http://localhost:8080", 3);
        state.set_accounts(accounts);
        state
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut state = state_with(vec![
            account("1", "a", true),
            account("2", "b", true),
            account("3", "c", true),
        ]);
        state.selected = 2;

        state.set_accounts(vec![account("1", "a", true)]);
        assert_eq!(state.selected, 0);

        state.set_accounts(vec![]);
        assert_eq!(state.selected, 0);
        assert!(state.selected_account().is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = state_with(vec![account("1", "a", true), account("2", "b", true)]);
        state.select_prev();
        assert_eq!(state.selected, 1);
        state.select_next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_toggle_target_flips_status() {
        let state = state_with(vec![account("7", "a", true)]);
        assert_eq!(state.toggle_target(), Some(("7".to_string(), false)));
        assert_eq!(state.delete_target().as_deref(), Some("7"));
    }

    #[test]
    fn test_add_dialog_submission() {
        let mut state = state_with(vec![]);
        state.open_add_dialog();
        assert_eq!(state.input_mode, InputMode::Dialog);

        for c in "Checking".chars() {
            state.dialog_char(c);
        }
        state.dialog_next_field();
        for c in "100.00".chars() {
            state.dialog_char(c);
        }
        state.dialog_next_field();
        for c in "USDX".chars() {
            state.dialog_char(c);
        }
        state.dialog_backspace();

        let submission = state.submit_dialog().unwrap();
        assert_eq!(
            submission,
            DialogSubmission::Add {
                name: "Checking".to_string(),
                balance: "100.00".to_string(),
                currency: "USD".to_string(),
            }
        );
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.dialog.is_none());
    }

    #[test]
    fn test_edit_dialog_prefills_and_keeps_id_and_status() {
        let mut state = state_with(vec![account("9", "Old", false)]);
        state.open_edit_dialog();

        let dialog = state.dialog.as_ref().unwrap();
        assert_eq!(dialog.value(DialogField::Name), "Old");
        assert_eq!(dialog.value(DialogField::Balance), "5.00");

        state.dialog_backspace();
        state.dialog_backspace();
        state.dialog_backspace();
        for c in "New".chars() {
            state.dialog_char(c);
        }

        match state.submit_dialog() {
            Some(DialogSubmission::Edit(updated)) => {
                assert_eq!(updated.id.as_deref(), Some("9"));
                assert_eq!(updated.name, "New");
                assert_eq!(updated.currency, "EUR");
                assert!(!updated.is_active);
            }
            other => panic!("expected edit submission, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_dialog_needs_a_selection() {
        let mut state = state_with(vec![]);
        state.open_edit_dialog();
        assert!(state.dialog.is_none());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_cancel_dialog_discards_input() {
        let mut state = state_with(vec![]);
        state.open_add_dialog();
        state.dialog_char('x');
        state.cancel_dialog();
        assert!(state.submit_dialog().is_none());
    }

    #[test]
    fn test_toast_expires() {
        let mut state = state_with(vec![]);
        let now = Utc::now();
        state.show_toast(OperationOutcome::Success("Account added".to_string()), now);

        state.expire_toast(now + Duration::seconds(1));
        assert!(state.toast.is_some());

        state.expire_toast(now + Duration::seconds(3));
        assert!(state.toast.is_none());
    }
}
