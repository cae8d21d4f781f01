//! Synchronous client for the **BLS Public Data API** (`timeseries/data/`).
//!
//! One call to [`Client::fetch`] posts a single batched request for every
//! series of a [`SeriesRequest`] and returns the decoded [`ApiResponse`].
//!
//! ### Notes
//! - Requests carrying a registration key go to the `v2` endpoint, the others to `v1`.
//! - The payload always asks for catalog metadata (`"catalog": true`). The API only
//!   honours that on `v2`.
//! - There is no retry. Network timeouts use a sane default (30s).
//!
//! Typical usage:
//! ```no_run
//! # use blsdata::{Client, SeriesRequest};
//! let client = Client::default();
//! let req = SeriesRequest::with_defaults(vec!["LNS14000000".into()])?;
//! let resp = client.fetch(&req)?;
//! println!("{}", resp.status);
//! # Ok::<(), blsdata::BlsError>(())
//! ```
use crate::config::SeriesRequest;
use crate::error::{BlsError, Result};
use crate::models::ApiResponse;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.bls.gov/publicAPI";

/// Number of response messages echoed to the log.
const MAX_LOGGED_MESSAGES: usize = 4;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("blsdata/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            http,
        }
    }
}

impl Client {
    /// Default client talking to another base URL (mock servers, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full endpoint URL for `req`.
    pub fn endpoint(&self, req: &SeriesRequest) -> String {
        format!(
            "{}/{}/timeseries/data/",
            self.base_url.trim_end_matches('/'),
            req.api_version()
        )
    }

    /// Post `req` and decode the response.
    ///
    /// ### Errors
    /// - Network/HTTP error, or a non-success status code
    /// - JSON decoding error
    ///
    /// The API-level `status` is logged but never turned into an error; check
    /// [`ApiResponse::is_success`] if it matters.
    pub fn fetch(&self, req: &SeriesRequest) -> Result<ApiResponse> {
        if req.series_ids.is_empty() {
            return Err(BlsError::MissingSeriesIds);
        }
        let url = self.endpoint(req);
        log::debug!("POST {} ({} series)", url, req.series_ids.len());

        let resp = self.http.post(&url).json(&req.payload()).send()?;
        if !resp.status().is_success() {
            return Err(BlsError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }
        let body = resp.text()?;
        let parsed: ApiResponse = serde_json::from_str(&body)?;

        for line in status_lines(&parsed) {
            log::info!("{line}");
        }
        Ok(parsed)
    }
}

/// Lines reported for a response: the status, then at most four messages.
pub fn status_lines(resp: &ApiResponse) -> Vec<String> {
    std::iter::once(format!("Request Status: {}", resp.status))
        .chain(
            resp.message
                .iter()
                .take(MAX_LOGGED_MESSAGES)
                .map(|m| format!("Response Message: {m}")),
        )
        .collect()
}
