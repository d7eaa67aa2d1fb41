//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{AccountDialog, Toast};
use crate::messages::ui_events::InputMode;
use crate::models::Account;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Account list
    pub accounts: Vec<Account>,
    pub selected: usize,

    // Input
    pub input_mode: InputMode,
    pub dialog: Option<AccountDialog>,

    // Status bar
    pub toast: Option<Toast>,
    pub is_loading: bool,
    pub base_url: String,

    // Popups
    pub show_help: bool,
}
