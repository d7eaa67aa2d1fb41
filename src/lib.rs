//! # Accounts TUI
//!
//! A terminal client for managing bank accounts against a REST backend.
//!
//! ## Features
//! - List, add, edit, delete accounts
//! - Toggle an account's active status
//! - Reload-on-mutation: every successful write re-fetches the full list
//! - Stale-over-empty: a failed refresh keeps the last known list
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (screen state machine)
//! - Store Layer (observable state over the HTTP client, Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use models::{Account, Operation, OperationOutcome, StatusPatch};
pub use error::{AccountError, ApiError};
pub use config::Config;
pub use network::{create_client, AccountApi, HttpAccountClient};
pub use store::{AccountStore, Observable, Subscription};
pub use messages::{RenderState, UiEvent};
pub use app::{AppActor, ScreenState};
