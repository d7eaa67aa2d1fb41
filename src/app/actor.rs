//! App actor - message loop bridging UI events and the account store

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::app::state::{DialogSubmission, ScreenState};
use crate::config::Config;
use crate::messages::{RenderState, UiEvent};
use crate::models::OperationOutcome;
use crate::store::AccountStore;

/// How often toasts are checked for expiry
const TICK_MS: u64 = 250;

/// App actor that turns UI events into store calls and store updates into
/// render states
pub struct AppActor {
    state: ScreenState,
    store: AccountStore,
    render_tx: mpsc::UnboundedSender<RenderState>,
    in_flight: JoinSet<()>,
}

impl AppActor {
    pub fn new(
        store: AccountStore,
        config: &Config,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: ScreenState::new(config.base_url.clone(), config.toast_secs),
            store,
            render_tx,
            in_flight: JoinSet::new(),
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) {
        let mut accounts = self.store.accounts();
        let mut successes = self.store.success_messages();
        let mut errors = self.store.error_messages();
        let mut tick = tokio::time::interval(Duration::from_millis(TICK_MS));

        let initial = self.store.load();
        self.track(initial);
        self.render();

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    let quit = match event {
                        Some(event) => self.handle_ui_event(event),
                        None => true,
                    };
                    if quit {
                        // Late results from in-flight calls are dropped
                        self.store.dispose();
                        break;
                    }
                }
                Some(list) = accounts.next() => {
                    self.state.set_accounts(list);
                }
                Some(message) = successes.next() => {
                    if let Some(message) = message {
                        self.state.show_toast(OperationOutcome::Success(message), Utc::now());
                    }
                }
                Some(message) = errors.next() => {
                    if let Some(message) = message {
                        self.state.show_toast(OperationOutcome::Failure(message), Utc::now());
                    }
                }
                Some(_) = self.in_flight.join_next() => {
                    self.state.is_loading = !self.in_flight.is_empty();
                }
                _ = tick.tick() => {
                    self.state.expire_toast(Utc::now());
                }
            }
            self.render();
        }
        tracing::info!("App actor stopped");
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Keep the store task's completion visible as the loading indicator
    fn track(&mut self, handle: JoinHandle<()>) {
        self.in_flight.spawn(async move {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Store task panicked");
            }
        });
        self.state.is_loading = true;
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // List
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::Reload => {
                let handle = self.store.load();
                self.track(handle);
            }
            UiEvent::DeleteSelected => match self.state.delete_target() {
                Some(id) => {
                    tracing::info!(id = %id, "Deleting account");
                    let handle = self.store.remove(id);
                    self.track(handle);
                }
                None => tracing::warn!("Delete requested without a selected account id"),
            },
            UiEvent::ToggleSelected => match self.state.toggle_target() {
                Some((id, is_active)) => {
                    tracing::info!(id = %id, is_active, "Toggling account status");
                    let handle = self.store.set_active(id, is_active);
                    self.track(handle);
                }
                None => tracing::warn!("Toggle requested without a selected account id"),
            },

            // Dialog
            UiEvent::OpenAddDialog => self.state.open_add_dialog(),
            UiEvent::OpenEditDialog => self.state.open_edit_dialog(),
            UiEvent::DialogChar(c) => self.state.dialog_char(c),
            UiEvent::DialogBackspace => self.state.dialog_backspace(),
            UiEvent::DialogNextField => self.state.dialog_next_field(),
            UiEvent::DialogPrevField => self.state.dialog_prev_field(),
            UiEvent::DialogCancel => self.state.cancel_dialog(),
            UiEvent::DialogSubmit => {
                if let Some(submission) = self.state.submit_dialog() {
                    self.submit(submission);
                }
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    fn submit(&mut self, submission: DialogSubmission) {
        match submission {
            DialogSubmission::Add {
                name,
                balance,
                currency,
            } => {
                let handle = self.store.add(name, balance, currency);
                self.track(handle);
            }
            DialogSubmission::Edit(account) => match self.store.edit(account) {
                Ok(handle) => self.track(handle),
                Err(e) => {
                    tracing::error!(error = %e, "Rejected edit submission");
                    self.state
                        .show_toast(OperationOutcome::Failure(e.to_string()), Utc::now());
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{Account, StatusPatch};
    use crate::network::AccountApi;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Answers every call successfully and records it
    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl AccountApi for RecordingApi {
        async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
            self.record("list".to_string());
            Ok(vec![])
        }

        async fn create_account(&self, account: &Account) -> Result<Account, ApiError> {
            self.record(format!("create {}", account.name));
            Ok(account.clone().with_id("1"))
        }

        async fn delete_account(&self, id: &str) -> Result<(), ApiError> {
            self.record(format!("delete {}", id));
            Ok(())
        }

        async fn replace_account(&self, id: &str, account: &Account) -> Result<Account, ApiError> {
            self.record(format!("replace {}", id));
            Ok(account.clone())
        }

        async fn patch_account_status(
            &self,
            id: &str,
            patch: StatusPatch,
        ) -> Result<Account, ApiError> {
            self.record(format!("patch {} {}", id, patch.is_active));
            Ok(Account::new("a", "1", "USD").with_id(id))
        }
    }

    fn actor() -> (Arc<RecordingApi>, AppActor) {
        let api = Arc::new(RecordingApi::default());
        let store = AccountStore::new(api.clone());
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        (api, AppActor::new(store, &Config::default(), render_tx))
    }

    async fn drain(actor: &mut AppActor) {
        while actor.in_flight.join_next().await.is_some() {}
    }

    #[tokio::test]
    async fn test_edit_without_id_never_reaches_network() {
        let (api, mut actor) = actor();
        actor
            .state
            .set_accounts(vec![Account::new("Local", "1.00", "USD")]);

        actor.handle_ui_event(UiEvent::OpenEditDialog);
        actor.handle_ui_event(UiEvent::DialogSubmit);
        drain(&mut actor).await;

        assert!(api.calls().is_empty());
        let toast = actor.state.toast.as_ref().unwrap();
        assert!(toast.outcome.is_failure());
    }

    #[tokio::test]
    async fn test_add_dialog_creates_then_reloads() {
        let (api, mut actor) = actor();

        actor.handle_ui_event(UiEvent::OpenAddDialog);
        for c in "Savings".chars() {
            actor.handle_ui_event(UiEvent::DialogChar(c));
        }
        actor.handle_ui_event(UiEvent::DialogSubmit);
        assert!(actor.state.is_loading);
        drain(&mut actor).await;

        assert_eq!(api.calls(), vec!["create Savings", "list"]);
    }

    #[tokio::test]
    async fn test_row_actions_use_selected_account() {
        let (api, mut actor) = actor();
        actor.state.set_accounts(vec![
            Account::new("a", "1", "USD").with_id("1"),
            Account::new("b", "2", "USD").with_id("2"),
        ]);

        actor.handle_ui_event(UiEvent::SelectNext);
        actor.handle_ui_event(UiEvent::ToggleSelected);
        drain(&mut actor).await;
        actor.handle_ui_event(UiEvent::DeleteSelected);
        drain(&mut actor).await;

        assert_eq!(
            api.calls(),
            vec!["patch 2 false", "list", "delete 2", "list"]
        );
    }

    #[tokio::test]
    async fn test_quit() {
        let (_api, mut actor) = actor();
        assert!(actor.handle_ui_event(UiEvent::Quit));
        assert!(!actor.handle_ui_event(UiEvent::ToggleHelp));
        assert!(actor.state.show_help);
    }
}
