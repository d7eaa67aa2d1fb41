//! Screen state - pure data structure with no I/O logic

use chrono::{DateTime, Utc};

use crate::messages::ui_events::{DialogField, InputMode};
use crate::messages::RenderState;
use crate::models::{Account, OperationOutcome};

/// Whether the dialog creates a new account or edits an existing one
#[derive(Clone, Debug, PartialEq)]
pub enum DialogKind {
    Add,
    /// Holds the account as it was when the dialog opened
    Edit(Account),
}

/// Add/edit dialog with its three text fields
#[derive(Clone, Debug)]
pub struct AccountDialog {
    pub kind: DialogKind,
    pub name: String,
    pub balance: String,
    pub currency: String,
    pub field: DialogField,
}

impl AccountDialog {
    pub fn add() -> Self {
        AccountDialog {
            kind: DialogKind::Add,
            name: String::new(),
            balance: String::new(),
            currency: String::new(),
            field: DialogField::Name,
        }
    }

    /// Prefilled from the account being edited
    pub fn edit(account: &Account) -> Self {
        AccountDialog {
            kind: DialogKind::Edit(account.clone()),
            name: account.name.clone(),
            balance: account.balance.clone(),
            currency: account.currency.clone(),
            field: DialogField::Name,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Add => " Add account ",
            DialogKind::Edit(_) => " Edit account ",
        }
    }

    pub fn value(&self, field: DialogField) -> &str {
        match field {
            DialogField::Name => &self.name,
            DialogField::Balance => &self.balance,
            DialogField::Currency => &self.currency,
        }
    }

    pub fn current_mut(&mut self) -> &mut String {
        match self.field {
            DialogField::Name => &mut self.name,
            DialogField::Balance => &mut self.balance,
            DialogField::Currency => &mut self.currency,
        }
    }
}

/// What a submitted dialog asks the store to do
#[derive(Clone, Debug, PartialEq)]
pub enum DialogSubmission {
    Add {
        name: String,
        balance: String,
        currency: String,
    },
    /// Full account with edited fields; `id` and `is_active` carried over
    Edit(Account),
}

/// A success or error message shown in the status bar until it expires
#[derive(Clone, Debug)]
pub struct Toast {
    pub outcome: OperationOutcome,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_expired(&self, now: DateTime<Utc>, ttl_secs: i64) -> bool {
        now.signed_duration_since(self.shown_at).num_seconds() >= ttl_secs
    }
}

/// Main screen state - pure data, no I/O
pub struct ScreenState {
    // Last published server snapshot
    pub accounts: Vec<Account>,
    pub selected: usize,

    pub input_mode: InputMode,
    pub dialog: Option<AccountDialog>,

    pub toast: Option<Toast>,
    pub toast_secs: i64,

    pub is_loading: bool,
    pub show_help: bool,
    pub base_url: String,
}

impl ScreenState {
    pub fn new(base_url: impl Into<String>, toast_secs: i64) -> Self {
        ScreenState {
            accounts: Vec::new(),
            selected: 0,
            input_mode: InputMode::Normal,
            dialog: None,
            toast: None,
            toast_secs,
            is_loading: false,
            show_help: false,
            base_url: base_url.into(),
        }
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.selected)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            accounts: self.accounts.clone(),
            selected: self.selected,
            input_mode: self.input_mode,
            dialog: self.dialog.clone(),
            toast: self.toast.clone(),
            is_loading: self.is_loading,
            show_help: self.show_help,
            base_url: self.base_url.clone(),
        }
    }
}
