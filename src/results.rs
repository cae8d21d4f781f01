//! Reshaped response: series tables and catalogs keyed by [`SeriesKey`], and
//! the selection queries over them.
use crate::error::{BlsError, Result};
use crate::models::{ApiResponse, CatalogEntry, SeriesKey};
use crate::table::{Axis, CombinedTable, SeriesTable};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Which series a query picks.
///
/// Indices and ids are two separate criteria. A series matches when its
/// ordinal is among `indices` or its identifier is among `ids`; a selection
/// with neither matches every series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
    ids: Vec<String>,
}

impl Selection {
    /// Every series.
    pub fn all() -> Self {
        Self::default()
    }

    /// Series at the given ordinals.
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            ids: Vec::new(),
        }
    }

    /// Series with the given identifiers.
    pub fn ids<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            indices: Vec::new(),
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.indices.push(index);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.indices.is_empty() && self.ids.is_empty()
    }

    pub fn matches_index(&self, key: &SeriesKey) -> bool {
        self.indices.contains(&key.index)
    }

    pub fn matches_id(&self, key: &SeriesKey) -> bool {
        self.ids.iter().any(|id| *id == key.series_id)
    }

    pub fn matches(&self, key: &SeriesKey) -> bool {
        self.is_unrestricted() || self.matches_index(key) || self.matches_id(key)
    }
}

/// Tables and catalogs of one response.
///
/// Empty when created with `default()`, filled once by [`ResultSet::from_response`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    tables: BTreeMap<SeriesKey, SeriesTable>,
    catalogs: BTreeMap<SeriesKey, CatalogEntry>,
}

impl ResultSet {
    /// Reshape every element of `Results.series`, in response order.
    ///
    /// A malformed data point fails the whole pass. A missing or non-object
    /// catalog only means that series has no catalog entry.
    pub fn from_response(resp: &ApiResponse) -> Result<Self> {
        let series = resp.series();
        if series.is_empty() {
            log::warn!("response contains no series (status {})", resp.status);
        }

        let mut out = Self::default();
        for (i, raw) in series.iter().enumerate() {
            let key = SeriesKey::new(i, raw.series_id.as_str());
            let table = SeriesTable::from_raw(&raw.series_id, &raw.data)?;
            if let Some(catalog) = raw.catalog_entry() {
                out.catalogs.insert(key.clone(), catalog.clone());
            }
            out.tables.insert(key, table);
        }
        log::info!(
            "reshaped {} series ({} with catalog)",
            out.tables.len(),
            out.catalogs.len()
        );
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Keys in response order.
    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.tables.keys()
    }

    pub fn tables(&self) -> impl Iterator<Item = (&SeriesKey, &SeriesTable)> {
        self.tables.iter()
    }

    pub fn table(&self, key: &SeriesKey) -> Option<&SeriesTable> {
        self.tables.get(key)
    }

    pub fn catalog(&self, key: &SeriesKey) -> Option<&CatalogEntry> {
        self.catalogs.get(key)
    }

    /// Concatenate the selected tables along `axis`.
    ///
    /// Labels are series ids, or with `label_by` the value of that catalog
    /// field; a catalog label already taken gets the first free ` - 2`, ` - 3`, ...
    /// suffix.
    pub fn select_tables(
        &self,
        selection: &Selection,
        label_by: Option<&str>,
        axis: Axis,
    ) -> Result<CombinedTable> {
        if self.tables.is_empty() {
            return Err(BlsError::Uninitialized);
        }

        let mut parts = Vec::new();
        let mut used: HashSet<String> = HashSet::new();
        for (key, table) in self.tables.iter().filter(|(k, _)| selection.matches(k)) {
            let label = match label_by {
                Some(field) => {
                    let base = self.catalog_label(key, field)?;
                    let mut label = base.clone();
                    let mut n = 1;
                    while used.contains(&label) {
                        n += 1;
                        label = format!("{base} - {n}");
                    }
                    used.insert(label.clone());
                    label
                }
                None => key.series_id.clone(),
            };
            parts.push((label, table));
        }
        Ok(CombinedTable::concat(parts, axis))
    }

    /// Catalog entries of the selected series, in response order.
    pub fn select_catalogs(&self, selection: &Selection) -> Result<Vec<&CatalogEntry>> {
        if self.tables.is_empty() {
            return Err(BlsError::Uninitialized);
        }
        if self.catalogs.is_empty() {
            return Err(BlsError::NoCatalogs);
        }
        Ok(self
            .catalogs
            .iter()
            .filter(|(k, _)| selection.matches(k))
            .map(|(_, v)| v)
            .collect())
    }

    fn catalog_label(&self, key: &SeriesKey, field: &str) -> Result<String> {
        let catalog = self.catalogs.get(key).ok_or_else(|| BlsError::NoCatalog {
            series_id: key.series_id.clone(),
        })?;
        match catalog.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(BlsError::MissingCatalogField {
                series_id: key.series_id.clone(),
                field: field.to_owned(),
            }),
        }
    }
}
