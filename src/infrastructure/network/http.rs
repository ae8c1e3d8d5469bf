// HTTP client utilities
use crate::domain::error::{FetchError, QtError};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

/// Applied to connect and to the whole request alike.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Create the shared HTTP client with the fixed timeouts.
pub fn create_client() -> Result<Client, QtError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .connect_timeout(REQUEST_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("qtrans/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Single-shot GET. Returns the body of a 2xx response, or the status
/// code and reason phrase of anything else.
pub async fn fetch_text(client: &Client, url: Url) -> Result<String, FetchError> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        let reason = status
            .canonical_reason()
            .unwrap_or_else(|| status.as_str())
            .to_string();
        return Err(FetchError::Status {
            code: status.as_u16(),
            reason,
        });
    }

    Ok(response.text().await?)
}
