//! Tabular views of fetched series.
//!
//! A [`SeriesTable`] holds the rows of one series in response order. Selections
//! over several series are concatenated into a [`CombinedTable`], either side by
//! side ([`Axis::Columns`]) or stacked ([`Axis::Rows`]).
use crate::error::Result;
use crate::models::{Observation, RawDataPoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column names of a series table.
pub const COLUMNS: [&str; 4] = ["Year", "Period", "Period Name", "Value"];

/// Observations of one series, indexed by `(year, period)`.
///
/// Rows keep the order of the response; the index is not guaranteed unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesTable {
    rows: Vec<Observation>,
}

impl SeriesTable {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Parse every raw point of `series_id`. The first malformed field aborts.
    pub fn from_raw(series_id: &str, data: &[RawDataPoint]) -> Result<Self> {
        let rows = data
            .iter()
            .map(|raw| Observation::parse(series_id, raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row index in row order.
    pub fn index(&self) -> Vec<(i32, u32)> {
        self.rows.iter().map(Observation::index).collect()
    }

    /// First row at `(year, period)`.
    pub fn get(&self, year: i32, period: u32) -> Option<&Observation> {
        self.rows.iter().find(|o| o.index() == (year, period))
    }

    /// The `Value` column.
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|o| o.value).collect()
    }
}

/// Direction in which selected tables are concatenated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Stack the tables on top of each other; each row carries its label.
    Rows,
    /// Put the tables side by side, aligned on `(year, period)`.
    #[default]
    Columns,
}

/// Series side by side. `cells[row][col]` is the observation of series
/// `labels[col]` at `index[row]`, or `None` where that series has no row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WideTable {
    pub labels: Vec<String>,
    pub index: Vec<(i32, u32)>,
    pub cells: Vec<Vec<Option<Observation>>>,
}

impl WideTable {
    /// Outer join on `(year, period)`; rows appear in first-encounter order.
    /// A key repeated inside one series is matched by occurrence, so the
    /// second `(2020, 1)` of one series lines up with the second of another.
    fn join(parts: Vec<(String, &SeriesTable)>) -> Self {
        let width = parts.len();
        let mut index = Vec::new();
        let mut cells: Vec<Vec<Option<Observation>>> = Vec::new();
        let mut positions: HashMap<(i32, u32, usize), usize> = HashMap::new();
        let mut labels = Vec::with_capacity(width);

        for (col, (label, table)) in parts.into_iter().enumerate() {
            let mut seen: HashMap<(i32, u32), usize> = HashMap::new();
            for obs in table.rows() {
                let nth = seen.entry(obs.index()).or_insert(0);
                let key = (obs.year, obs.period, *nth);
                *nth += 1;
                let row = *positions.entry(key).or_insert_with(|| {
                    index.push(obs.index());
                    cells.push(vec![None; width]);
                    index.len() - 1
                });
                cells[row][col] = Some(obs.clone());
            }
            labels.push(label);
        }

        Self {
            labels,
            index,
            cells,
        }
    }

    /// Observations of `label` in row order.
    pub fn column(&self, label: &str) -> Option<Vec<Option<&Observation>>> {
        let col = self.labels.iter().position(|l| l == label)?;
        Some(self.cells.iter().map(|row| row[col].as_ref()).collect())
    }

    pub fn value(&self, row: usize, label: &str) -> Option<f64> {
        let col = self.labels.iter().position(|l| l == label)?;
        self.cells.get(row)?.get(col)?.as_ref().map(|o| o.value)
    }

    pub fn height(&self) -> usize {
        self.index.len()
    }
}

/// One row of a stacked table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedRow {
    pub label: String,
    #[serde(flatten)]
    pub observation: Observation,
}

/// Series one after another, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackedTable {
    pub labels: Vec<String>,
    pub rows: Vec<StackedRow>,
}

impl StackedTable {
    fn stack(parts: Vec<(String, &SeriesTable)>) -> Self {
        let mut labels = Vec::with_capacity(parts.len());
        let mut rows = Vec::new();
        for (label, table) in parts {
            rows.extend(table.rows().iter().map(|o| StackedRow {
                label: label.clone(),
                observation: o.clone(),
            }));
            labels.push(label);
        }
        Self { labels, rows }
    }

    /// Rows belonging to `label`.
    pub fn rows_of<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Observation> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.label == label)
            .map(|r| &r.observation)
    }
}

/// Result of a table selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum CombinedTable {
    Wide(WideTable),
    Stacked(StackedTable),
}

impl CombinedTable {
    /// Concatenate labelled tables along `axis`, keeping their order.
    pub fn concat(parts: Vec<(String, &SeriesTable)>, axis: Axis) -> Self {
        match axis {
            Axis::Columns => Self::Wide(WideTable::join(parts)),
            Axis::Rows => Self::Stacked(StackedTable::stack(parts)),
        }
    }

    /// Labels in selection order.
    pub fn labels(&self) -> &[String] {
        match self {
            Self::Wide(t) => &t.labels,
            Self::Stacked(t) => &t.labels,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Self::Wide(_) => Axis::Columns,
            Self::Stacked(_) => Axis::Rows,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        match self {
            Self::Wide(t) => t.height(),
            Self::Stacked(t) => t.rows.len(),
        }
    }

    pub fn as_wide(&self) -> Option<&WideTable> {
        match self {
            Self::Wide(t) => Some(t),
            Self::Stacked(_) => None,
        }
    }

    pub fn as_stacked(&self) -> Option<&StackedTable> {
        match self {
            Self::Stacked(t) => Some(t),
            Self::Wide(_) => None,
        }
    }
}
