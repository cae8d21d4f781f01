use blsdata::{Axis, CombinedTable, Observation, SeriesTable};
use blsdata::storage;
use std::fs;
use tempfile::tempdir;

fn obs(year: i32, period: u32, name: &str, value: f64) -> Observation {
    Observation {
        year,
        period,
        period_name: name.into(),
        value,
    }
}

fn sample() -> (SeriesTable, SeriesTable) {
    let a = SeriesTable::new(vec![
        obs(2020, 2, "February", 3.5),
        obs(2020, 1, "January", 3.6),
    ]);
    let b = SeriesTable::new(vec![obs(2020, 1, "January", 257.971)]);
    (a, b)
}

#[test]
fn save_wide_csv_and_json() {
    let (a, b) = sample();
    let table = CombinedTable::concat(
        vec![("LNS14000000".into(), &a), ("CUUR0000SA0".into(), &b)],
        Axis::Columns,
    );
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("wide.csv");
    storage::save_csv(&table, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv_txt.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Year,Period,LNS14000000 Period Name,LNS14000000 Value,CUUR0000SA0 Period Name,CUUR0000SA0 Value"
    );
    assert_eq!(lines.next().unwrap(), "2020,2,February,3.5,,");
    assert_eq!(lines.next().unwrap(), "2020,1,January,3.6,January,257.971");
    assert!(lines.next().is_none());

    let json_path = dir.path().join("wide.json");
    storage::save_json(&table, &json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v["layout"], "wide");
    assert_eq!(v["labels"].as_array().unwrap().len(), 2);
    assert!(v["cells"][0][1].is_null());
}

#[test]
fn save_stacked_csv() {
    let (a, b) = sample();
    let table = CombinedTable::concat(vec![("A".into(), &a), ("B".into(), &b)], Axis::Rows);
    let dir = tempdir().unwrap();
    let path = dir.path().join("stacked.csv");
    storage::save_csv(&table, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Series", "Year", "Period", "Period Name", "Value"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[2][0], "B");
    assert_eq!(&rows[2][4], "257.971");
}

#[test]
fn save_single_series_csv() {
    let (a, _) = sample();
    let dir = tempdir().unwrap();
    let path = dir.path().join("series.csv");
    storage::save_series_csv(&a, &path).unwrap();
    let txt = fs::read_to_string(&path).unwrap();
    assert!(txt.starts_with("Year,Period,Period Name,Value\n"));
    assert_eq!(txt.lines().count(), 1 + a.len());
}

// Labels come from catalog metadata, which we do not control: keep spreadsheet
// apps from evaluating them as formulas.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let s = SeriesTable::new(vec![obs(2020, 1, "@foo", -1.5)]);
    let table = CombinedTable::concat(vec![("=HYPERLINK(\"http://evil\")".into(), &s)], Axis::Rows);
    let dir = tempdir().unwrap();
    let path = dir.path().join("injection.csv");
    storage::save_csv(&table, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    assert!(row[0].starts_with('\''), "label not prefixed: {}", &row[0]);
    assert!(row[0].contains("=HYPERLINK"));
    assert_eq!(&row[3], "'@foo");
    // Numbers stay numbers.
    assert_eq!(&row[4], "-1.5");
}
