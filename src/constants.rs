//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout applied to the shared HTTP client
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long a success/error toast stays in the status bar
pub const DEFAULT_TOAST_SECS: i64 = 3;

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "ACCOUNTS_API_URL";

/// Directory under $HOME holding the config file
pub const CONFIG_DIR_NAME: &str = ".accounts-tui";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "accounts-tui.log";

/// Application name
pub const APP_NAME: &str = "Accounts TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
