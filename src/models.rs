use crate::error::{BlsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog metadata of one series: field name to value, as sent by the API.
pub type CatalogEntry = Map<String, Value>;

/// JSON body posted to `timeseries/data/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload<'a> {
    pub seriesid: &'a [String],
    pub startyear: &'a str,
    pub endyear: &'a str,
    /// Serialized as `null` when absent.
    pub registrationkey: Option<&'a str>,
    pub catalog: bool,
}

/// Top-level response object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default, rename = "responseTime", skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(default)]
    pub message: Vec<String>,
    #[serde(rename = "Results", default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,
}

impl ApiResponse {
    /// `true` when the API reported `REQUEST_SUCCEEDED`.
    pub fn is_success(&self) -> bool {
        self.status == "REQUEST_SUCCEEDED"
    }

    /// Series list of the response, empty when the `Results` block is missing.
    pub fn series(&self) -> &[RawSeries] {
        self.results
            .as_ref()
            .map(|r| r.series.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub series: Vec<RawSeries>,
}

/// One element of `Results.series`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSeries {
    #[serde(rename = "seriesID")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<RawDataPoint>,
    /// Kept untyped: only an object counts as a catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Value>,
}

impl RawSeries {
    /// The catalog object, or `None` when absent or not an object.
    pub fn catalog_entry(&self) -> Option<&CatalogEntry> {
        self.catalog.as_ref().and_then(Value::as_object)
    }
}

/// Raw data point. Fields stay textual until reshaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataPoint {
    #[serde(deserialize_with = "de_text_from_string_or_number")]
    pub year: String,
    pub period: String,
    #[serde(rename = "periodName")]
    pub period_name: String,
    #[serde(deserialize_with = "de_text_from_string_or_number")]
    pub value: String,
}

/// Serde helper: the API sends numbers as strings, but accept plain numbers too.
pub(crate) fn de_text_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or a number")
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_str<E>(self, s: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_owned())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// [`de_text_from_string_or_number`] for optional fields; `null` gives `None`.
pub(crate) fn de_opt_text_from_string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Text(#[serde(deserialize_with = "de_text_from_string_or_number")] String);

    Option::<Text>::deserialize(deserializer).map(|t| t.map(|Text(s)| s))
}

/// Identifies one series within a single response.
///
/// Ordering compares `index` first, so ordered maps iterate in response order.
/// The index is positional and may change between fetches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    pub index: usize,
    pub series_id: String,
}

impl SeriesKey {
    pub fn new(index: usize, series_id: impl Into<String>) -> Self {
        Self {
            index,
            series_id: series_id.into(),
        }
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.index, self.series_id)
    }
}

/// One row of a series table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub year: i32,
    pub period: u32,
    pub period_name: String,
    pub value: f64,
}

impl Observation {
    /// Parse a raw data point of series `series_id`.
    pub fn parse(series_id: &str, raw: &RawDataPoint) -> Result<Self> {
        let fail = |field: &'static str, value: &str| BlsError::Parse {
            series_id: series_id.to_owned(),
            field,
            value: value.to_owned(),
        };
        let year = raw
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| fail("year", &raw.year))?;
        let period = parse_period(&raw.period).ok_or_else(|| fail("period", &raw.period))?;
        let value = raw
            .value
            .trim()
            .parse::<f64>()
            .map_err(|_| fail("value", &raw.value))?;
        Ok(Self {
            year,
            period,
            period_name: raw.period_name.clone(),
            value,
        })
    }

    /// Row index of the observation.
    pub fn index(&self) -> (i32, u32) {
        (self.year, self.period)
    }
}

/// Period code to number: the first character is dropped, the rest parsed.
///
/// `"M07"` gives 7 and `"A01"` gives 1. The prefix is not interpreted.
pub fn parse_period(code: &str) -> Option<u32> {
    let mut chars = code.chars();
    chars.next()?;
    chars.as_str().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_prefix_is_dropped_positionally() {
        assert_eq!(parse_period("M07"), Some(7));
        assert_eq!(parse_period("A01"), Some(1));
        assert_eq!(parse_period("Q05"), Some(5));
        assert_eq!(parse_period("M13"), Some(13));
        assert_eq!(parse_period("X"), None);
        assert_eq!(parse_period(""), None);
    }

    #[test]
    fn numeric_fields_accept_numbers() {
        let raw: RawDataPoint = serde_json::from_str(
            r#"{"year":2021,"period":"M02","periodName":"February","value":6.2}"#,
        )
        .unwrap();
        let obs = Observation::parse("S", &raw).unwrap();
        assert_eq!(obs.year, 2021);
        assert_eq!(obs.period, 2);
        assert_eq!(obs.value, 6.2);
    }
}
