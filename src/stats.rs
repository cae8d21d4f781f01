use crate::models::SeriesKey;
use crate::results::ResultSet;
use serde::{Deserialize, Serialize};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: SeriesKey,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute statistics of the `Value` column per series, in response order.
pub fn series_summary(results: &ResultSet) -> Vec<Summary> {
    results
        .tables()
        .map(|(key, table)| {
            let mut vals = table.values();
            vals.sort_by(f64::total_cmp);
            let count = vals.len();
            let min = vals.first().copied();
            let max = vals.last().copied();
            let mean = if count > 0 {
                Some(vals.iter().sum::<f64>() / count as f64)
            } else {
                None
            };
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2])
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
            };
            Summary {
                key: key.clone(),
                count,
                min,
                max,
                mean,
                median,
            }
        })
        .collect()
}
