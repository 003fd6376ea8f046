//! Eventline Client — producer-side HTTP client for the events API.
//!
//! Clients are constructed explicitly with their base URL; there is no
//! process-wide default instance. Producers either publish a raw
//! [`EventDraft`] or use [`Client::emit`] with one of the named payload
//! shapes in [`payloads`].

pub mod payloads;

use chrono::{DateTime, Utc};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eventline_core::envelope::Envelope;

/// A payload shape with a fixed event name. Implemented by the closed set
/// of shapes in [`payloads`]; `Client::emit` builds the draft envelope from
/// the name and the serialized payload.
pub trait EventPayload: Serialize {
    /// The event name this payload publishes under (the routing key).
    const NAME: &'static str;
}

/// The producer-supplied half of an envelope. The server assigns the id
/// and fills the timestamp when absent.
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    /// When the event occurred; the server defaults this to ingest time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Event type tag.
    pub name: String,
    /// Producer identifier.
    pub source: String,
    /// Opaque JSON payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// Errors raised by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL does not parse.
    #[error("invalid base url: {0}")]
    BaseUrl(String),

    /// The request could not be sent or the response could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The payload could not be serialized to JSON.
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),

    /// The server rejected the event.
    #[error("server rejected the event ({status}): {errors:?}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Validation errors reported by the server, when available.
        errors: Vec<String>,
    },
}

/// Error body shape returned by the events API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// HTTP client for the events API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::BaseUrl` if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::BaseUrl` if `base_url` is not a valid URL.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::BaseUrl(e.to_string()))?;
        Ok(Self { base_url, http })
    }

    /// Publishes a draft to `PUT /api/events` and returns the canonical
    /// envelope the server assigned.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Rejected` with the server's error list on a
    /// non-200 response, or `ClientError::Http` on transport failure.
    pub async fn publish(&self, draft: &EventDraft) -> Result<Envelope, ClientError> {
        let url = self
            .base_url
            .join("/api/events")
            .map_err(|e| ClientError::BaseUrl(e.to_string()))?;

        let response = self.http.put(url).json(draft).send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let errors = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.errors)
                .unwrap_or_default();
            return Err(ClientError::Rejected { status, errors });
        }

        Ok(response.json::<Envelope>().await?)
    }

    /// Builds a draft from a named payload and publishes it. The timestamp
    /// is set to the current time; the server assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Payload` if the payload cannot be serialized,
    /// otherwise the same errors as [`Client::publish`].
    pub async fn emit<P: EventPayload + Sync>(
        &self,
        source: &str,
        payload: &P,
    ) -> Result<Envelope, ClientError> {
        let draft = EventDraft {
            timestamp: Some(Utc::now()),
            name: P::NAME.to_string(),
            source: source.to_string(),
            body: Some(serde_json::to_value(payload)?),
        };
        self.publish(&draft).await
    }
}
