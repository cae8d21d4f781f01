use blsdata::models::{ApiResponse, Payload};
use blsdata::SeriesRequest;

#[test]
fn parse_sample_json() {
    let sample = r#"
    {
      "status": "REQUEST_SUCCEEDED",
      "responseTime": 143,
      "message": [],
      "Results": {
        "series": [
          {
            "seriesID": "LNS14000000",
            "catalog": {
              "series_title": "(Seas) Unemployment Rate",
              "series_id": "LNS14000000",
              "seasonality": "Seasonally Adjusted",
              "survey_name": "Labor Force Statistics from the Current Population Survey"
            },
            "data": [
              {"year":"2020","period":"M02","periodName":"February","latest":"true","value":"3.5","footnotes":[{}]},
              {"year":"2020","period":"M01","periodName":"January","value":"3.6","footnotes":[{}]}
            ]
          }
        ]
      }
    }
    "#;

    let resp: ApiResponse = serde_json::from_str(sample).unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.response_time, Some(143));
    assert!(resp.message.is_empty());

    let series = resp.series();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].series_id, "LNS14000000");
    assert_eq!(series[0].data.len(), 2);
    assert_eq!(series[0].data[0].period, "M02");
    assert_eq!(series[0].data[0].period_name, "February");
    assert_eq!(series[0].data[1].value, "3.6");

    let catalog = series[0].catalog_entry().unwrap();
    assert_eq!(catalog["seasonality"], "Seasonally Adjusted");
}

#[test]
fn missing_results_and_messages_default_to_empty() {
    let resp: ApiResponse = serde_json::from_str(
        r#"{"status":"REQUEST_NOT_PROCESSED","message":["daily threshold reached"]}"#,
    )
    .unwrap();
    assert!(!resp.is_success());
    assert_eq!(resp.message, vec!["daily threshold reached".to_string()]);
    assert!(resp.series().is_empty());

    let resp: ApiResponse = serde_json::from_str(r#"{"status":"REQUEST_SUCCEEDED"}"#).unwrap();
    assert!(resp.message.is_empty());
}

#[test]
fn non_object_catalog_is_no_catalog() {
    let resp: ApiResponse = serde_json::from_str(
        r#"{"status":"REQUEST_SUCCEEDED","message":[],
            "Results":{"series":[
              {"seriesID":"A","data":[],"catalog":"n/a"},
              {"seriesID":"B","data":[],"catalog":null},
              {"seriesID":"C","data":[]}
            ]}}"#,
    )
    .unwrap();
    for s in resp.series() {
        assert!(s.catalog_entry().is_none(), "{} has a catalog", s.series_id);
    }
}

#[test]
fn payload_serializes_null_key_and_catalog_flag() {
    let req = SeriesRequest::new(vec!["CUUR0000SA0".into()], None, "2015", "2016").unwrap();
    let payload: Payload = req.payload();
    let v = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "seriesid": ["CUUR0000SA0"],
            "startyear": "2015",
            "endyear": "2016",
            "registrationkey": null,
            "catalog": true
        })
    );
}
