//! Account HTTP client - the five remote operations and their JSON shapes

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{AccountError, ApiError};
use crate::models::{Account, Operation, StatusPatch};

/// Remote account operations.
///
/// Each method is exactly one request. No retries, no client-side validation.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError>;

    /// Create an account; the returned copy carries the server-assigned id
    async fn create_account(&self, account: &Account) -> Result<Account, ApiError>;

    async fn delete_account(&self, id: &str) -> Result<(), ApiError>;

    /// Full replace, every field of `account` is sent
    async fn replace_account(&self, id: &str, account: &Account) -> Result<Account, ApiError>;

    async fn patch_account_status(&self, id: &str, patch: StatusPatch)
        -> Result<Account, ApiError>;
}

/// `AccountApi` over HTTP+JSON
#[derive(Clone, Debug)]
pub struct HttpAccountClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAccountClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, AccountError> {
        let base_url =
            Url::parse(base_url).map_err(|e| AccountError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AccountError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(HttpAccountClient { client, base_url })
    }

    /// `{base}/accounts` or `{base}/accounts/{id}`
    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("accounts");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn send(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%operation, status = status.as_u16(), "Request rejected");
            return Err(ApiError::Rejected { operation, status });
        }
        Ok(response)
    }
}

#[async_trait]
impl AccountApi for HttpAccountClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let url = self.endpoint(None);
        tracing::debug!(%url, "GET accounts");
        let response = self
            .send(Operation::Fetch, self.client.get(url))
            .await?;
        decode_list(response).await
    }

    async fn create_account(&self, account: &Account) -> Result<Account, ApiError> {
        let url = self.endpoint(None);
        tracing::debug!(%url, name = %account.name, "POST account");
        let response = self
            .send(Operation::Add, self.client.post(url).json(account))
            .await?;
        decode(Operation::Add, response).await
    }

    async fn delete_account(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(Some(id));
        tracing::debug!(%url, id, "DELETE account");
        self.send(Operation::Delete, self.client.delete(url)).await?;
        Ok(())
    }

    async fn replace_account(&self, id: &str, account: &Account) -> Result<Account, ApiError> {
        let url = self.endpoint(Some(id));
        tracing::debug!(%url, id, "PUT account");
        let response = self
            .send(Operation::Update, self.client.put(url).json(account))
            .await?;
        let updated = decode(Operation::Update, response).await?;
        ensure_same_id(Operation::Update, id, updated)
    }

    async fn patch_account_status(
        &self,
        id: &str,
        patch: StatusPatch,
    ) -> Result<Account, ApiError> {
        let url = self.endpoint(Some(id));
        tracing::debug!(%url, id, is_active = patch.is_active, "PATCH account status");
        let response = self
            .send(Operation::StatusUpdate, self.client.patch(url).json(&patch))
            .await?;
        let updated = decode(Operation::StatusUpdate, response).await?;
        ensure_same_id(Operation::StatusUpdate, id, updated)
    }
}

async fn decode<T: DeserializeOwned>(
    operation: Operation,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| transport_error(operation, &e))
}

/// A successful list with an empty or `null` body is an empty list
async fn decode_list(response: reqwest::Response) -> Result<Vec<Account>, ApiError> {
    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(Operation::Fetch, &e))?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice::<Option<Vec<Account>>>(&body)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            tracing::warn!(operation = %Operation::Fetch, error = %e, "Undecodable account list");
            ApiError::Transport {
                operation: Operation::Fetch,
                message: format!("Invalid response body: {}", e),
            }
        })
}

/// An id-addressed write must answer for the same account
fn ensure_same_id(operation: Operation, id: &str, account: Account) -> Result<Account, ApiError> {
    match account.id.as_deref() {
        Some(returned) if returned != id => {
            tracing::warn!(%operation, id, returned, "Response carries a different account id");
            Err(ApiError::Transport {
                operation,
                message: format!("unexpected account id {} in response for {}", returned, id),
            })
        }
        _ => Ok(account),
    }
}

fn transport_error(operation: Operation, e: &reqwest::Error) -> ApiError {
    let message = if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_decode() {
        format!("Invalid response body: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    tracing::warn!(%operation, error = %e, "Transport failure");
    ApiError::Transport { operation, message }
}

/// Create the shared HTTP client
pub fn create_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
