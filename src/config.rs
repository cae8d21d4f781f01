//! Request parameters and their JSON-string configuration form.
//!
//! A configuration is passed as JSON text, not a path:
//! ```
//! # use blsdata::config::{RequestConfig, SeriesRequest};
//! let cfg = RequestConfig::parse(r#"{"seriesid":["LNS14000000"],"startyear":"2019"}"#);
//! let req = SeriesRequest::resolve(cfg, Vec::new(), None, "2011", "2020")?;
//! assert_eq!(req.start_year, "2019");
//! assert_eq!(req.end_year, "2020");
//! # Ok::<(), blsdata::BlsError>(())
//! ```
use crate::error::{BlsError, Result};
use crate::models::{Payload, de_opt_text_from_string_or_number};
use serde::Deserialize;

pub const DEFAULT_START_YEAR: &str = "2011";
pub const DEFAULT_END_YEAR: &str = "2020";

/// Fields accepted in a JSON configuration string. All are optional here;
/// `seriesid` is enforced by [`SeriesRequest::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestConfig {
    pub seriesid: Option<Vec<String>>,
    pub registrationkey: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text_from_string_or_number")]
    pub startyear: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text_from_string_or_number")]
    pub endyear: Option<String>,
}

impl RequestConfig {
    /// Parse a JSON configuration string. Anything that is not a JSON object
    /// of the expected shape counts as "no configuration".
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(text) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                log::debug!("ignoring configuration: {e}");
                None
            }
        }
    }
}

/// Parameters of one batched request.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub series_ids: Vec<String>,
    pub registration_key: Option<String>,
    pub start_year: String,
    pub end_year: String,
}

impl SeriesRequest {
    /// Build a request; fails when `series_ids` is empty.
    pub fn new(
        series_ids: Vec<String>,
        registration_key: Option<String>,
        start_year: impl Into<String>,
        end_year: impl Into<String>,
    ) -> Result<Self> {
        if series_ids.is_empty() {
            return Err(BlsError::MissingSeriesIds);
        }
        Ok(Self {
            series_ids,
            registration_key,
            start_year: start_year.into(),
            end_year: end_year.into(),
        })
    }

    /// Request for `series_ids` over the default year range, without a key.
    pub fn with_defaults(series_ids: Vec<String>) -> Result<Self> {
        Self::new(series_ids, None, DEFAULT_START_YEAR, DEFAULT_END_YEAR)
    }

    /// Combine an optional configuration with explicit arguments.
    ///
    /// With a configuration, `seriesid` must be present there, a missing key
    /// stays unset and missing years fall back to `start_year`/`end_year`.
    /// Without one, the arguments are used as they are.
    pub fn resolve(
        config: Option<RequestConfig>,
        series_ids: Vec<String>,
        registration_key: Option<String>,
        start_year: &str,
        end_year: &str,
    ) -> Result<Self> {
        match config {
            Some(cfg) => Self::new(
                cfg.seriesid.ok_or(BlsError::MissingSeriesIds)?,
                cfg.registrationkey,
                cfg.startyear.unwrap_or_else(|| start_year.to_owned()),
                cfg.endyear.unwrap_or_else(|| end_year.to_owned()),
            ),
            None => Self::new(series_ids, registration_key, start_year, end_year),
        }
    }

    /// Endpoint version: `v2` needs a registration key.
    pub fn api_version(&self) -> &'static str {
        if self.registration_key.is_some() {
            "v2"
        } else {
            "v1"
        }
    }

    pub fn payload(&self) -> Payload<'_> {
        Payload {
            seriesid: &self.series_ids,
            startyear: &self.start_year,
            endyear: &self.end_year,
            registrationkey: self.registration_key.as_deref(),
            catalog: true,
        }
    }
}
