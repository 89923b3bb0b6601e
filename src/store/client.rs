// src/store/client.rs
// =============================================================================
// Sends store requests to Datasette and translates the answers.
//
// Key functionality:
// - Refuses to exist without a token (no request is ever attempted)
// - POSTs one JSON body per call with a bearer token
// - Turns error responses into readable messages:
//     {"errors": ["a", "b"]}  -> "a; b"
//     {"error": "Table not found"} -> "Table not found"
//     anything else           -> "404 Not Found"
// - Keeps transport failures (refused, timeout, DNS) separate from HTTP ones
//
// No retries: every call is attempted exactly once.
// =============================================================================

use super::action::StoreRequest;
use super::config::StoreConfig;
use crate::error::{RbError, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use tracing::debug;
use url::Url;

pub struct StoreClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for StoreClient {
    // Keeps the token out of debug output
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// The body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub enum StoreResponse {
    Json(Value),
    Text(String),
}

impl StoreResponse {
    fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => StoreResponse::Json(value),
            Err(_) => StoreResponse::Text(body),
        }
    }

    /// Pretty-printed JSON, or the raw text when the store didn't send JSON
    pub fn render(&self) -> Result<String> {
        match self {
            StoreResponse::Json(value) => Ok(serde_json::to_string_pretty(value)?),
            StoreResponse::Text(text) => Ok(text.clone()),
        }
    }
}

impl StoreClient {
    // Creates a client from explicit configuration
    //
    // Errors:
    //   MissingCredentials if there is no token
    //   InvalidConfig if the base URL can't be used
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let token = config
            .token()
            .ok_or(RbError::MissingCredentials("DATASETTE_AUTH_TOKEN"))?
            .to_string();

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RbError::InvalidConfig(format!("base URL {:?}: {}", config.base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RbError::InvalidConfig(format!(
                "base URL must be http or https: {}",
                config.base_url
            )));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Sends one request
    //
    // Returns: the response body on a 2xx status
    //
    // Errors:
    //   RequestFailed for transport problems, Http for non-2xx statuses
    pub async fn send(&self, request: &StoreRequest) -> Result<StoreResponse> {
        let url = request.endpoint(&self.base_url)?;
        debug!(action = request.action().name(), %url, "sending store request");

        let mut builder = self.http.post(url).bearer_auth(&self.token);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "store rejected request");
            return Err(http_error(status, &body));
        }

        debug!(status = status.as_u16(), "store accepted request");
        Ok(StoreResponse::from_body(body))
    }
}

// Builds the Http error for a failed response
//
// Datasette's write API answers with {"ok": false, "errors": [...]}; other
// endpoints use a single "error" string. When neither is there we fall
// back to the status line.
fn http_error(status: StatusCode, body: &str) -> RbError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| error_message(&value))
        .unwrap_or_else(|| status.to_string());

    RbError::Http {
        status: status.as_u16(),
        message,
    }
}

fn error_message(value: &Value) -> Option<String> {
    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        let messages: Vec<String> = errors
            .iter()
            .map(|error| match error {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect();
        if !messages.is_empty() {
            return Some(messages.join("; "));
        }
    }

    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}
