//! blsdata
//!
//! A lightweight Rust library for retrieving and reshaping U.S. Bureau of Labor
//! Statistics time series. Pairs with the `bls` CLI.
//!
//! ### Features
//! - Fetch several series in one batched request (v1 or v2 endpoint)
//! - Reshape the response into per-series tables indexed by (year, period)
//! - Keep per-series catalog metadata and label series by a catalog field
//! - Select series by position or id and concatenate them side by side or stacked
//! - Save as CSV or JSON, print quick summary statistics
//!
//! ### Example
//! ```no_run
//! use blsdata::{Axis, Client, Selection, SeriesRequest, Session};
//!
//! let req = SeriesRequest::new(
//!     vec!["LNS14000000".into(), "CUUR0000SA0".into()],
//!     None,
//!     "2019",
//!     "2020",
//! )?;
//! let mut session = Session::new(req);
//! session.fetch(&Client::default())?;
//! session.transform()?;
//! let table = session.select_tables(&Selection::ids(["LNS14000000"]), None, Axis::Columns)?;
//! blsdata::storage::save_csv(&table, "unemployment.csv")?;
//! let stats = blsdata::stats::series_summary(session.results());
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod results;
pub mod session;
pub mod stats;
pub mod storage;
pub mod table;

pub use api::Client;
pub use config::{RequestConfig, SeriesRequest};
pub use error::{BlsError, Result};
pub use models::{ApiResponse, CatalogEntry, Observation, SeriesKey};
pub use results::{ResultSet, Selection};
pub use session::Session;
pub use table::{Axis, CombinedTable, SeriesTable};
