use crate::table::{COLUMNS, CombinedTable, SeriesTable, StackedTable, WideTable};
use anyhow::Result;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Neutralize spreadsheet formulas: text starting with `=`, `+`, `-` or `@`
/// gets a leading single quote.
fn safe_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Save a combined table as CSV with header.
///
/// Wide tables get one `<label> Period Name` / `<label> Value` column pair per
/// series and empty cells where a series has no row; stacked tables get a
/// leading `Series` column.
pub fn save_csv<P: AsRef<Path>>(table: &CombinedTable, path: P) -> Result<()> {
    match table {
        CombinedTable::Wide(t) => save_wide_csv(t, path),
        CombinedTable::Stacked(t) => save_stacked_csv(t, path),
    }
}

fn save_wide_csv<P: AsRef<Path>>(table: &WideTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec![COLUMNS[0].to_string(), COLUMNS[1].to_string()];
    for label in &table.labels {
        let label = safe_cell(label);
        header.push(format!("{label} {}", COLUMNS[2]));
        header.push(format!("{label} {}", COLUMNS[3]));
    }
    wtr.write_record(&header)?;

    for ((year, period), row) in table.index.iter().zip(&table.cells) {
        let mut record = vec![year.to_string(), period.to_string()];
        for cell in row {
            match cell {
                Some(o) => {
                    record.push(safe_cell(&o.period_name).into_owned());
                    record.push(o.value.to_string());
                }
                None => {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn save_stacked_csv<P: AsRef<Path>>(table: &StackedTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["Series", COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3]])?;
    for r in &table.rows {
        let o = &r.observation;
        wtr.serialize((
            safe_cell(&r.label),
            o.year,
            o.period,
            safe_cell(&o.period_name),
            o.value,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a single series table as CSV with the four standard columns.
pub fn save_series_csv<P: AsRef<Path>>(table: &SeriesTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(COLUMNS)?;
    for o in table.rows() {
        wtr.serialize((o.year, o.period, safe_cell(&o.period_name), o.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a combined table as pretty JSON.
pub fn save_json<P: AsRef<Path>>(table: &CombinedTable, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(table)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
