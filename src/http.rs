//! Shared HTTP client construction.

use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::{RepackError, Result};

/// Build the blocking client used for upstream requests.
///
/// Requests have no timeout. Redirects are followed with reqwest's default
/// policy, which keeps `HEAD` as `HEAD`.
pub fn build_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| RepackError::Http {
            url: String::new(),
            message: format!("failed to build HTTP client: {}", e),
        })
}
