//! HTTP record store: the editor's view of the REST backend.
//!
//! The bearer token lives here with an explicit login/logout lifecycle
//! instead of ambient global storage.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::query::SearchParams;
use crate::editor::session::{RecordStore, StoreError};
use crate::errors::ApiResponse;
use crate::models::inventory::{InventoryDraft, InventoryRecord};

/// Token payload returned by the signup/login endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// REST client for the inventory backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Create an account and start a session with the returned token.
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), StoreError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "fullName": full_name,
        });
        let response = self
            .http
            .post(format!("{}/api/signup", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let token: TokenResponse = decode_plain(response).await?;
        self.token = Some(token.token);
        Ok(())
    }

    /// Authenticate and start a session with the returned token.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), StoreError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let token: TokenResponse = decode_plain(response).await?;
        self.token = Some(token.token);
        Ok(())
    }

    /// End the session by discarding the token.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Submit a list of records for out-of-band report mailing.
    pub async fn send_report(&self, records: &[InventoryRecord]) -> Result<(), StoreError> {
        let response = self
            .authed(self.http.post(format!("{}/api/send-report", self.base_url)))
            .json(&records)
            .send()
            .await
            .map_err(transport_error)?;
        decode_enveloped::<serde_json::Value>(response).await?;
        Ok(())
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl RecordStore for ApiClient {
    async fn list(&self, params: &SearchParams) -> Result<Vec<InventoryRecord>, StoreError> {
        let query = params.build();
        let url = if query.is_empty() {
            format!("{}/inventory/get/all", self.base_url)
        } else {
            format!("{}/inventory/get/all?{query}", self.base_url)
        };
        let response = self
            .authed(self.http.get(url))
            .send()
            .await
            .map_err(transport_error)?;
        decode_enveloped(response).await
    }

    async fn get(&self, id: Uuid) -> Result<InventoryRecord, StoreError> {
        let response = self
            .authed(
                self.http
                    .get(format!("{}/inventory/getById/{id}", self.base_url)),
            )
            .send()
            .await
            .map_err(transport_error)?;
        decode_enveloped(response).await
    }

    async fn create(&self, draft: &InventoryDraft) -> Result<InventoryRecord, StoreError> {
        let response = self
            .authed(self.http.post(format!("{}/inventory/add", self.base_url)))
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;
        decode_enveloped(response).await
    }

    async fn update(&self, id: Uuid, draft: &InventoryDraft) -> Result<InventoryRecord, StoreError> {
        let response = self
            .authed(
                self.http
                    .put(format!("{}/inventory/update/{id}", self.base_url)),
            )
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;
        decode_enveloped(response).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let response = self
            .authed(
                self.http
                    .delete(format!("{}/inventory/delete/{id}", self.base_url)),
            )
            .send()
            .await
            .map_err(transport_error)?;
        decode_enveloped::<serde_json::Value>(response).await?;
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

fn status_error(status: StatusCode, message: String) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::UNAUTHORIZED => StoreError::Unauthorized,
        _ => StoreError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Decode a `{ data, error }` enveloped response.
async fn decode_enveloped<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, StoreError> {
    let status = response.status();
    let envelope: ApiResponse<T> = response.json().await.map_err(transport_error)?;
    if let Some(err) = envelope.error {
        return Err(status_error(status, err.message));
    }
    if !status.is_success() {
        return Err(status_error(status, "request failed".to_string()));
    }
    envelope
        .data
        .ok_or_else(|| StoreError::Api {
            status: status.as_u16(),
            message: "response envelope had no data".to_string(),
        })
}

/// Decode a bare (non-enveloped) JSON response, as the auth endpoints use.
async fn decode_plain<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(status_error(status, message));
    }
    response.json().await.map_err(transport_error)
}
