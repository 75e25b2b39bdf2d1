//! Shared HTTP plumbing for provider clients.

use reqwest::{Client, Response};
use std::time::Duration;
use storybook_error::{AuthError, StorybookResult, TransportError, TransportErrorKind};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the reqwest client every provider uses.
pub(crate) fn build_client() -> StorybookResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| TransportError::new(TransportErrorKind::Request(e.to_string())).into())
}

/// Read a credential from the environment. Unset and blank are both missing.
pub(crate) fn credential_from_env(name: &str) -> StorybookResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AuthError::new(name).into()),
    }
}

/// Map a send failure.
pub(crate) fn request_error(e: reqwest::Error) -> TransportError {
    TransportError::new(TransportErrorKind::Request(e.to_string()))
}

/// Map a body decode failure.
pub(crate) fn decode_error(e: reqwest::Error) -> TransportError {
    TransportError::new(TransportErrorKind::Decode(e.to_string()))
}

/// Pass a successful response through; turn anything else into an error.
///
/// 401 and 403 mean the credential was rejected and become [`AuthError`].
pub(crate) async fn check_status(response: Response, credential: &str) -> StorybookResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(AuthError::new(credential).into());
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::new(TransportErrorKind::Status {
        status: status.as_u16(),
        body,
    })
    .into())
}
