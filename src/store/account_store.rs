//! Account store - owns the observable account list and operation outcomes
//!
//! Every successful write is followed by a full re-fetch in the same task, so
//! the published list is always a server snapshot. Failed writes publish an
//! error and leave the list alone. A failed fetch keeps the previous list.
//!
//! Two writes issued back to back each trigger their own reload; the list
//! converges to whichever reload response lands last.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::{AccountError, ApiError};
use crate::models::{Account, Operation, StatusPatch};
use crate::network::AccountApi;
use crate::store::observable::{Observable, Subscription};

struct Inner {
    api: Arc<dyn AccountApi>,
    accounts: Observable<Vec<Account>>,
    last_success: Observable<Option<String>>,
    last_error: Observable<Option<String>>,
    disposed: AtomicBool,
}

/// Cloneable handle; all clones share the same state
#[derive(Clone)]
pub struct AccountStore {
    inner: Arc<Inner>,
}

impl AccountStore {
    pub fn new(api: Arc<dyn AccountApi>) -> Self {
        AccountStore {
            inner: Arc::new(Inner {
                api,
                accounts: Observable::new(Vec::new()),
                last_success: Observable::new(None),
                last_error: Observable::new(None),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    pub fn accounts(&self) -> Subscription<Vec<Account>> {
        self.inner.accounts.subscribe()
    }

    pub fn success_messages(&self) -> Subscription<Option<String>> {
        self.inner.last_success.subscribe()
    }

    pub fn error_messages(&self) -> Subscription<Option<String>> {
        self.inner.last_error.subscribe()
    }

    /// Current list without subscribing
    pub fn snapshot(&self) -> Vec<Account> {
        self.inner.accounts.get()
    }

    /// Stop publishing. In-flight calls run to completion but their results
    /// are dropped.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    pub fn load(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.fetch().await })
    }

    pub fn add(
        &self,
        name: impl Into<String>,
        balance: impl Into<String>,
        currency: impl Into<String>,
    ) -> JoinHandle<()> {
        let account = Account::new(name, balance, currency);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.api.create_account(&account).await;
            if let Ok(created) = &result {
                tracing::info!(id = ?created.id, "Account created");
            }
            inner.after_mutation(Operation::Add, result.map(drop)).await;
        })
    }

    pub fn remove(&self, id: impl Into<String>) -> JoinHandle<()> {
        let id = id.into();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.api.delete_account(&id).await;
            inner.after_mutation(Operation::Delete, result).await;
        })
    }

    pub fn replace_fully(&self, id: impl Into<String>, account: Account) -> JoinHandle<()> {
        let id = id.into();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.api.replace_account(&id, &account).await;
            inner.after_mutation(Operation::Update, result.map(drop)).await;
        })
    }

    /// Replace an account addressed by its own id.
    ///
    /// An account without an id is rejected here, before any request.
    pub fn edit(&self, account: Account) -> Result<JoinHandle<()>, AccountError> {
        let id = account.id.clone().ok_or(AccountError::MissingId)?;
        Ok(self.replace_fully(id, account))
    }

    pub fn set_active(&self, id: impl Into<String>, is_active: bool) -> JoinHandle<()> {
        let id = id.into();
        let patch = StatusPatch { is_active };
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.api.patch_account_status(&id, patch).await;
            inner.after_mutation(Operation::StatusUpdate, result.map(drop)).await;
        })
    }
}

impl Inner {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    async fn fetch(&self) {
        if self.is_disposed() {
            return;
        }
        match self.api.list_accounts().await {
            Ok(accounts) => {
                if self.is_disposed() {
                    tracing::debug!("Store disposed, dropping fetched list");
                    return;
                }
                tracing::info!(count = accounts.len(), "Accounts loaded");
                self.accounts.publish(accounts);
            }
            Err(e) => self.publish_error(&e),
        }
    }

    async fn after_mutation(&self, operation: Operation, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                if self.is_disposed() {
                    tracing::debug!(%operation, "Store disposed, skipping reload");
                    return;
                }
                tracing::info!(%operation, "Operation succeeded");
                if let Some(message) = operation.success_message() {
                    self.last_success.publish(Some(message.to_string()));
                }
                self.fetch().await;
            }
            Err(e) => self.publish_error(&e),
        }
    }

    fn publish_error(&self, e: &ApiError) {
        if self.is_disposed() {
            tracing::debug!(error = %e, "Store disposed, dropping error");
            return;
        }
        tracing::warn!(operation = %e.operation(), error = %e, "Operation failed");
        self.last_error.publish(Some(e.user_message()));
    }
}
