//! Profile lookup.
//!
//! One blocking GET against the lookup service, decoded into a
//! [`ProfilePayload`]. Callers that only care about "data or not" use
//! [`fetch_profile`], which never fails: every error is logged and turned
//! into `None`.

use std::time::Duration;

use url::Url;

use crate::profile::ProfilePayload;

/// Error during profile lookup
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Client error: {0}")]
    Client(reqwest::Error),
    #[error("Request failed: {0}")]
    Request(reqwest::Error),
    #[error("Lookup returned HTTP {0}")]
    Status(u16),
    #[error("Failed to decode profile: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetch and decode the profile at `url`. Single attempt, no retry.
pub fn lookup_profile(url: &Url) -> Result<ProfilePayload, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("profile-card/", env!("CARGO_PKG_VERSION")))
        // The blocking client times out after 30 s unless told otherwise.
        .timeout(None::<Duration>)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url.as_str())
        .header("Accept", "application/json")
        .send()
        .map_err(FetchError::Request)?;

    // Error responses are JSON objects too and would decode into an
    // all-default payload.
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.bytes().map_err(FetchError::Request)?;
    decode_profile(&body)
}

/// Decode a lookup response body.
pub fn decode_profile(body: &[u8]) -> Result<ProfilePayload, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Fetch the profile at `url`, or `None` on any failure.
pub fn fetch_profile(url: &str) -> Option<ProfilePayload> {
    let result = Url::parse(url)
        .map_err(FetchError::from)
        .and_then(|u| lookup_profile(&u));

    match result {
        Ok(profile) => {
            log::info!("Fetched profile {} ({})", profile.id, profile.username);
            Some(profile)
        }
        Err(e) => {
            log::error!("Error fetching profile from {}: {}", url, e);
            None
        }
    }
}
