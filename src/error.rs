use thiserror::Error;

/// Errors raised by the fetch, reshape and query operations.
#[derive(Debug, Error)]
pub enum BlsError {
    /// No series identifiers were supplied (directly or via configuration).
    #[error("at least one series id is required")]
    MissingSeriesIds,

    /// `transform` was called before a response was fetched.
    #[error("no response yet: fetch the series before transforming")]
    NotFetched,

    /// A query ran before the result set was populated.
    #[error("result set is uninitialized: transform an acceptable response first")]
    Uninitialized,

    /// None of the fetched series carried a catalog.
    #[error("none of the requested series contained a catalog")]
    NoCatalogs,

    /// A selected series has no catalog to take a label from.
    #[error("series {series_id} has no catalog")]
    NoCatalog { series_id: String },

    /// A selected series' catalog lacks the requested field.
    #[error("catalog of series {series_id} has no field '{field}'")]
    MissingCatalogField { series_id: String, field: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("request failed with HTTP {status} at {url}")]
    Status { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A data point field could not be parsed into its column type.
    #[error("series {series_id}: cannot parse {field} from '{value}'")]
    Parse {
        series_id: String,
        field: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, BlsError>;
