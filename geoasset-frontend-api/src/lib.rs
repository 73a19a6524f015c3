use gloo_net::http::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

use geoasset_core::gateways::TransportError;

mod credentials;
mod locations;
mod public;

pub use self::{credentials::*, locations::*, public::*};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Fetch(String),

    #[error("{error} ({status})")]
    Api {
        status: u16,
        error: geoasset_boundary::Error,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for Error {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(err) => Self::Decode(err.to_string()),
            err => Self::Fetch(format!("{err}")),
        }
    }
}

impl From<Error> for TransportError {
    fn from(err: Error) -> Self {
        match err {
            Error::Fetch(msg) => Self::Fetch(msg),
            Error::Api { status, error } => Self::Status {
                status,
                message: error.message,
            },
            Error::Decode(msg) => Self::Decode(msg),
        }
    }
}

pub(crate) fn auth_header_value(token: &str) -> String {
    format!("Bearer {token}")
}

// Error bodies are not guaranteed to be JSON.
fn api_error(status: u16, status_text: &str, body: &str) -> Error {
    let error = serde_json::from_str::<geoasset_boundary::Error>(body)
        .ok()
        .unwrap_or_else(|| {
            let body = body.trim();
            geoasset_boundary::Error {
                status: Some(status),
                message: if body.is_empty() {
                    status_text.to_string()
                } else {
                    body.to_string()
                },
            }
        });
    Error::Api { status, error }
}

async fn ensure_ok(response: Response) -> Result<Response> {
    // ensure we've got 2xx status
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &status_text, &body))
}

pub async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = ensure_ok(response).await?;
    Ok(response.json().await?)
}

/// Accepts an empty or undecodable body as `None`.
pub async fn into_optional_json<T>(response: Response) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let response = ensure_ok(response).await?;
    let body = response.text().await?;
    Ok(decode_optional(&body))
}

pub async fn into_empty(response: Response) -> Result<()> {
    ensure_ok(response).await.map(drop)
}

fn decode_optional<T>(body: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body)
        .map_err(|err| log::warn!("Unable to decode response body: {err}"))
        .ok()
}
