//! Integration tests for the model types.

use qrs_model::{Quarter, Source, Table, Value};

#[test]
fn value_serde_round_trip() {
    let values = vec![
        Value::text("抗体"),
        Value::Number(3.0),
        Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()),
        Value::Missing,
    ];
    let json = serde_json::to_string(&values).unwrap();
    let back: Vec<Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(values, back);
}

#[test]
fn table_serde_round_trip() {
    let mut table = Table::new(["通用名", "剂型"]);
    table.push_row(vec![Value::text("阿司匹林"), Value::text("片剂")]);
    let json = serde_json::to_string(&table).unwrap();
    let back: Table = serde_json::from_str(&json).unwrap();
    assert_eq!(table, back);
}

#[test]
fn source_codes_are_unique() {
    let codes: Vec<&str> = Source::ALL.iter().map(|source| source.code()).collect();
    let mut deduped = codes.clone();
    deduped.dedup();
    assert_eq!(codes.len(), 4);
    assert_eq!(codes, deduped);
}

#[test]
fn quarter_bounds_cover_the_year_without_overlap() {
    let quarters = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];
    for pair in quarters.windows(2) {
        let (_, end) = pair[0].bounds(2025);
        let (start, _) = pair[1].bounds(2025);
        assert_eq!(end.succ_opt().unwrap(), start);
    }
}
