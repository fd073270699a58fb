use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::dev_backend::DevBackend;
use crate::domain::{
    FeedingEntry, FeedingPatch, NewFeeding, NewSleep, SleepEntry, SleepPatch,
};

/// Failures reported by the record service, mapped from the transport layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The service rejected the value (bad shape or range). Never fatal.
    #[error("{0}")]
    Validation(String),
    /// The record vanished between render and edit.
    #[error("record not found")]
    NotFound,
    /// The service is unreachable or answered with a server error.
    #[error("storage unreachable: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Parsing(String),
}

/// HTTP client for the cradle record service.
///
/// In dev mode every call is served from an in-memory [`DevBackend`]
/// instead of the network.
#[derive(Debug, Clone)]
pub struct CradleClient {
    client: Client,
    base_url: Url,
    dev_backend: Option<DevBackend>,
}

impl CradleClient {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| StoreError::Validation(format!("invalid API URL {base_url}: {e}")))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            dev_backend: None,
        })
    }

    pub fn dev() -> Self {
        Self {
            client: Client::new(),
            // Never contacted; every call short-circuits into the dev store.
            base_url: Url::parse("http://localhost").expect("static URL parses"),
            dev_backend: Some(DevBackend::new()),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::Validation(format!("bad endpoint path {path}: {e}")))
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("{call_name}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response.text().await.unwrap_or_default();
                let message = if body.trim().is_empty() {
                    format!("{call_name} rejected the value")
                } else {
                    body.trim().to_string()
                };
                Err(StoreError::Validation(message))
            }
            _ => Err(StoreError::Transport(format!(
                "{call_name} returned {status}"
            ))),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, StoreError> {
        let response = self.send(request, call_name).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Parsing(format!("{call_name}: {e}")))
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), StoreError> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }

    pub async fn list_feedings(&self) -> Result<Vec<FeedingEntry>, StoreError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.feedings());
        }

        debug!("listing feedings");
        self.get_json(
            self.client.get(self.endpoint("/feedings")?),
            "GET /feedings",
        )
        .await
    }

    pub async fn create_feeding(&self, candidate: &NewFeeding) -> Result<FeedingEntry, StoreError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_feeding(candidate);
        }

        debug!(kind = candidate.kind.label(), "creating feeding");
        self.get_json(
            self.client.post(self.endpoint("/feedings")?).json(candidate),
            "POST /feedings",
        )
        .await
    }

    pub async fn update_feeding(
        &self,
        id: i64,
        patch: &FeedingPatch,
    ) -> Result<FeedingEntry, StoreError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_feeding(id, patch);
        }

        debug!(id, "updating feeding");
        self.get_json(
            self.client
                .patch(self.endpoint(&format!("/feedings/{id}"))?)
                .json(patch),
            "PATCH /feedings/:id",
        )
        .await
    }

    pub async fn delete_feeding(&self, id: i64) -> Result<(), StoreError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_feeding(id);
        }

        debug!(id, "deleting feeding");
        self.send_without_body(
            self.client.delete(self.endpoint(&format!("/feedings/{id}"))?),
            "DELETE /feedings/:id",
        )
        .await
    }

    pub async fn list_sleep(&self) -> Result<Vec<SleepEntry>, StoreError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.sleeps());
        }

        debug!("listing sleep entries");
        self.get_json(self.client.get(self.endpoint("/sleep")?), "GET /sleep")
            .await
    }

    pub async fn create_sleep(&self, candidate: &NewSleep) -> Result<SleepEntry, StoreError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_sleep(candidate);
        }

        debug!(kind = candidate.kind.label(), "creating sleep entry");
        self.get_json(
            self.client.post(self.endpoint("/sleep")?).json(candidate),
            "POST /sleep",
        )
        .await
    }

    pub async fn update_sleep(&self, id: i64, patch: &SleepPatch) -> Result<SleepEntry, StoreError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_sleep(id, patch);
        }

        debug!(id, "updating sleep entry");
        self.get_json(
            self.client
                .patch(self.endpoint(&format!("/sleep/{id}"))?)
                .json(patch),
            "PATCH /sleep/:id",
        )
        .await
    }

    pub async fn delete_sleep(&self, id: i64) -> Result<(), StoreError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_sleep(id);
        }

        debug!(id, "deleting sleep entry");
        self.send_without_body(
            self.client.delete(self.endpoint(&format!("/sleep/{id}"))?),
            "DELETE /sleep/:id",
        )
        .await
    }
}
