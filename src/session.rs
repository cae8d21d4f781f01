//! One request, its response and its reshaped results.
//!
//! ```no_run
//! # use blsdata::{Axis, Client, Selection, SeriesRequest, Session};
//! let req = SeriesRequest::with_defaults(vec!["LNS14000000".into(), "CUUR0000SA0".into()])?;
//! let mut session = Session::new(req);
//! session.fetch(&Client::default())?;
//! session.transform()?;
//! let table = session.select_tables(&Selection::all(), None, Axis::Columns)?;
//! println!("{:?}", table.labels());
//! # Ok::<(), blsdata::BlsError>(())
//! ```
use crate::api::Client;
use crate::config::SeriesRequest;
use crate::error::{BlsError, Result};
use crate::models::{ApiResponse, CatalogEntry};
use crate::results::{ResultSet, Selection};
use crate::table::{Axis, CombinedTable};

#[derive(Debug, Clone)]
pub struct Session {
    request: SeriesRequest,
    response: Option<ApiResponse>,
    results: ResultSet,
}

impl Session {
    pub fn new(request: SeriesRequest) -> Self {
        Self {
            request,
            response: None,
            results: ResultSet::default(),
        }
    }

    /// Session around a response obtained elsewhere (saved JSON, tests).
    pub fn from_response(request: SeriesRequest, response: ApiResponse) -> Self {
        Self {
            request,
            response: Some(response),
            results: ResultSet::default(),
        }
    }

    pub fn request(&self) -> &SeriesRequest {
        &self.request
    }

    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Send the request once and keep the response. Results from an earlier
    /// response are dropped.
    pub fn fetch(&mut self, client: &Client) -> Result<&ApiResponse> {
        let resp = client.fetch(&self.request)?;
        self.results = ResultSet::default();
        Ok(&*self.response.insert(resp))
    }

    /// Reshape the fetched response into tables and catalogs.
    pub fn transform(&mut self) -> Result<&ResultSet> {
        let resp = self.response.as_ref().ok_or(BlsError::NotFetched)?;
        self.results = ResultSet::from_response(resp)?;
        log::info!("transform done: query tables with select_tables by index or id");
        Ok(&self.results)
    }

    pub fn select_tables(
        &self,
        selection: &Selection,
        label_by: Option<&str>,
        axis: Axis,
    ) -> Result<CombinedTable> {
        self.results.select_tables(selection, label_by, axis)
    }

    pub fn select_catalogs(&self, selection: &Selection) -> Result<Vec<&CatalogEntry>> {
        self.results.select_catalogs(selection)
    }
}
