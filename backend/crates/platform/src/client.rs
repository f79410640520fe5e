//! HTTP client utilities
//!
//! Builds the shared `reqwest` client and the desktop-browser User-Agent the
//! live site expects to see on every request.

use std::time::Duration;

use serde::Deserialize;

/// Chrome major version used when the release feed cannot be reached
pub const FALLBACK_CHROME_MAJOR: u32 = 132;

/// Chrome stable release feed (macOS)
const CHROME_RELEASES_URL: &str = "https://versionhistory.googleapis.com/v1/chrome/platforms/mac/channels/stable/versions/all/releases?filter=endtime=none";

/// Error when building the HTTP client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Build the shared HTTP client
///
/// Cookies are passed explicitly per request, so no cookie store is enabled.
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, ClientError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}

/// Format a macOS desktop Chrome User-Agent for a major version
pub fn chrome_user_agent(major: u32) -> String {
    format!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36",
        major
    )
}

#[derive(Debug, Deserialize)]
struct ChromeReleases {
    #[serde(default)]
    releases: Vec<ChromeRelease>,
}

#[derive(Debug, Deserialize)]
struct ChromeRelease {
    version: String,
    #[serde(default)]
    fraction: f64,
}

/// Pick the major version of the most widely served release
fn most_served_major(releases: &[ChromeRelease]) -> Option<u32> {
    releases
        .iter()
        .max_by(|a, b| a.fraction.total_cmp(&b.fraction))
        .and_then(|release| release.version.split('.').next())
        .and_then(|major| major.parse().ok())
}

async fn fetch_chrome_major(client: &reqwest::Client) -> Result<Option<u32>, reqwest::Error> {
    let releases: ChromeReleases = client
        .get(CHROME_RELEASES_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(most_served_major(&releases.releases))
}

/// Resolve a current desktop Chrome User-Agent
///
/// Falls back to [`FALLBACK_CHROME_MAJOR`] when the release feed fails.
pub async fn resolve_user_agent(client: &reqwest::Client) -> String {
    let major = match fetch_chrome_major(client).await {
        Ok(Some(major)) => major,
        Ok(None) => {
            tracing::warn!("Chrome release feed was empty, using fallback version");
            FALLBACK_CHROME_MAJOR
        }
        Err(e) => {
            tracing::warn!(error = %e, "Chrome release feed unavailable, using fallback version");
            FALLBACK_CHROME_MAJOR
        }
    };
    chrome_user_agent(major)
}
