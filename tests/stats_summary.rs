use blsdata::models::ApiResponse;
use blsdata::stats::series_summary;
use blsdata::{ResultSet, SeriesKey};
use serde_json::json;

fn point(period: &str, value: &str) -> serde_json::Value {
    json!({"year": "2020", "period": period, "periodName": period, "value": value})
}

#[test]
fn summary_per_series_with_even_and_odd_medians() {
    // A: [4, 1, 3, 2] -> median (2+3)/2 = 2.5
    // B: [30, 10, 20] -> median 20
    // C: no rows
    let resp: ApiResponse = serde_json::from_value(json!({
        "status": "REQUEST_SUCCEEDED",
        "message": [],
        "Results": {"series": [
            {"seriesID": "A", "data": [point("M04", "4"), point("M03", "1"), point("M02", "3"), point("M01", "2")]},
            {"seriesID": "B", "data": [point("M03", "30"), point("M02", "10"), point("M01", "20")]},
            {"seriesID": "C", "data": []}
        ]}
    }))
    .unwrap();
    let results = ResultSet::from_response(&resp).unwrap();
    let got = series_summary(&results);
    assert_eq!(got.len(), 3);

    let a = &got[0];
    assert_eq!(a.key, SeriesKey::new(0, "A"));
    assert_eq!(a.count, 4);
    assert_eq!(a.min, Some(1.0));
    assert_eq!(a.max, Some(4.0));
    assert!((a.mean.unwrap() - 2.5).abs() < 1e-9);
    assert!((a.median.unwrap() - 2.5).abs() < 1e-9);

    let b = &got[1];
    assert_eq!(b.key, SeriesKey::new(1, "B"));
    assert_eq!(b.mean, Some(20.0));
    assert_eq!(b.median, Some(20.0));

    let c = &got[2];
    assert_eq!(c.count, 0);
    assert_eq!(c.min, None);
    assert_eq!(c.mean, None);
    assert_eq!(c.median, None);
}
