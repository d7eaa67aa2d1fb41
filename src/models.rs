use serde::{Deserialize, Serialize};

/// A bank account as exchanged with the backend.
///
/// `id` is assigned by the server and is absent on create. `balance` is kept
/// as text and never parsed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub balance: String,
    pub currency: String,
    pub is_active: bool,
}

impl Account {
    /// A new, active account without an id, ready to be created
    pub fn new(
        name: impl Into<String>,
        balance: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Account {
            id: None,
            name: name.into(),
            balance: balance.into(),
            currency: currency.into(),
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

// Identity is the server id.
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Partial update body for one account's status
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub is_active: bool,
}

/// Which remote call an outcome belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Add,
    Delete,
    Update,
    StatusUpdate,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Add => "add",
            Operation::Delete => "delete",
            Operation::Update => "update",
            Operation::StatusUpdate => "status-update",
        }
    }

    /// Message published after a successful call, if any
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            Operation::Fetch => None,
            Operation::Add => Some("Account added"),
            Operation::Delete => Some("Account deleted"),
            Operation::Update => Some("Account updated"),
            Operation::StatusUpdate => Some("Account status updated"),
        }
    }

    /// Generic message for a non-2xx response
    pub fn rejection_message(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to load accounts",
            Operation::Add => "Failed to add account",
            Operation::Delete => "Failed to delete account",
            Operation::Update => "Failed to update account",
            Operation::StatusUpdate => "Failed to update account status",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one store operation, consumed once by the screen
#[derive(Clone, Debug, PartialEq)]
pub enum OperationOutcome {
    Success(String),
    Failure(String),
}

impl OperationOutcome {
    pub fn message(&self) -> &str {
        match self {
            OperationOutcome::Success(msg) | OperationOutcome::Failure(msg) => msg,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, OperationOutcome::Failure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_serializes_without_id() {
        let account = Account::new("Checking", "100.00", "USD");
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Checking",
                "balance": "100.00",
                "currency": "USD",
                "isActive": true
            })
        );
    }

    #[test]
    fn test_account_deserializes_camel_case() {
        let json = r#"{"id":"7","name":"Savings","balance":"0.10","currency":"EUR","isActive":false}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id.as_deref(), Some("7"));
        assert_eq!(account.balance, "0.10");
        assert!(!account.is_active);
    }

    #[test]
    fn test_status_patch_body() {
        let body = serde_json::to_string(&StatusPatch { is_active: false }).unwrap();
        assert_eq!(body, r#"{"isActive":false}"#);
    }

    #[test]
    fn test_equality_is_by_id() {
        let a = Account::new("A", "1", "USD").with_id("1");
        let b = Account::new("B", "2", "EUR").with_id("1");
        assert_eq!(a, b);
        assert_ne!(a, Account::new("A", "1", "USD").with_id("2"));
    }
}
