// End-to-end coverage of the public loading surface: decode, classify,
// assemble, and the session replacement semantics.

use std::collections::HashSet;

use datawalker::{
    AnalyticType, DatasetLoader, FormatHint, IngestConfig, IngestError, LoadSession,
    SemanticType,
};

#[test]
fn csv_rows_keep_the_header_key_set() {
    let csv = "name,age,city\nAlice,30,NYC\nBob,25,LA\nCara,41,SF\n";
    let loader = DatasetLoader::with_defaults();
    let payload = loader.load_bytes(csv.as_bytes(), FormatHint::Csv).unwrap();

    assert_eq!(payload.rows.len(), 3);
    let header: HashSet<&str> = ["name", "age", "city"].into_iter().collect();
    for row in &payload.rows {
        let keys: HashSet<&str> = row.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, header);
    }
}

#[test]
fn date_sales_scenario() {
    let csv = "date,sales\n2024-01-15,1200\n2024-01-16,300\n";
    let loader = DatasetLoader::with_defaults();
    let payload = loader.load_bytes(csv.as_bytes(), FormatHint::Csv).unwrap();

    let rows = serde_json::to_value(&payload.rows).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([
            {"date": "2024-01-15", "sales": 1200},
            {"date": "2024-01-16", "sales": 300},
        ])
    );

    assert_eq!(payload.fields[0].fid, "date");
    assert_eq!(payload.fields[0].semantic_type, SemanticType::Temporal);
    assert_eq!(payload.fields[0].analytic_type, AnalyticType::Dimension);
    assert_eq!(payload.fields[1].fid, "sales");
    assert_eq!(payload.fields[1].semantic_type, SemanticType::Quantitative);
    assert_eq!(payload.fields[1].analytic_type, AnalyticType::Measure);

    // The renderer contract fixes the descriptor key names
    let fields = serde_json::to_value(&payload.fields).unwrap();
    assert_eq!(
        fields,
        serde_json::json!([
            {"fid": "date", "name": "Date", "semanticType": "temporal", "analyticType": "dimension"},
            {"fid": "sales", "name": "Sales", "semanticType": "quantitative", "analyticType": "measure"},
        ])
    );
}

#[test]
fn json_rows_round_trip() {
    let original = serde_json::json!([
        {"city": "Lisbon", "population": 545923, "coastal": true},
        {"city": "Oslo", "population": 709037, "coastal": true},
        {"city": "Madrid", "population": 3223334, "coastal": false},
    ]);
    let input = serde_json::to_vec(&original).unwrap();

    let loader = DatasetLoader::with_defaults();
    let payload = loader.load_bytes(&input, FormatHint::Json).unwrap();

    let reencoded = serde_json::to_value(&payload.rows).unwrap();
    assert_eq!(reencoded, original);
}

#[test]
fn empty_input_yields_empty_dataset_error() {
    let loader = DatasetLoader::with_defaults();
    for hint in [FormatHint::Csv, FormatHint::Json, FormatHint::Xlsx] {
        assert!(matches!(
            loader.load_bytes(b"", hint),
            Err(IngestError::EmptyDataset(_))
        ));
    }
}

#[test]
fn header_only_csv_is_rejected_before_the_renderer() {
    let loader = DatasetLoader::with_defaults();
    let err = loader.load_bytes(b"a,b,c\n", FormatHint::Csv).unwrap_err();
    assert!(matches!(err, IngestError::EmptyDataset(_)));
}

#[test]
fn json_top_level_object_is_a_shape_error() {
    let loader = DatasetLoader::with_defaults();
    let err = loader
        .load_bytes(br#"{"not": "an array"}"#, FormatHint::Json)
        .unwrap_err();
    assert!(matches!(err, IngestError::Shape(_)));
}

#[test]
fn a_new_load_replaces_the_previous_dataset_wholesale() {
    let loader = DatasetLoader::with_defaults();
    let session = LoadSession::new();

    let first = session.begin();
    let payload = loader
        .load_bytes(b"a,b\n1,2", FormatHint::Csv)
        .unwrap();
    session.complete(first, payload);

    let second = session.begin();
    let payload = loader
        .load_bytes(b"x\nhello\nworld", FormatHint::Csv)
        .unwrap();
    session.complete(second, payload);

    let current = session.current().unwrap();
    assert_eq!(current.fields.len(), 1);
    assert_eq!(current.fields[0].fid, "x");
    assert_eq!(current.rows.len(), 2);
}

#[test]
fn stale_results_are_discarded() {
    let loader = DatasetLoader::with_defaults();
    let session = LoadSession::new();

    let slow = session.begin();
    let fast = session.begin();

    let fast_payload = loader.load_bytes(b"a\n1", FormatHint::Csv).unwrap();
    assert!(session.complete(fast, fast_payload).is_some());

    let slow_payload = loader.load_bytes(b"b\n2", FormatHint::Csv).unwrap();
    assert!(session.complete(slow, slow_payload).is_none());

    assert_eq!(session.current().unwrap().fields[0].fid, "a");
}

#[tokio::test]
async fn load_path_derives_the_hint_from_the_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    std::fs::write(&path, "region,total\neast,10\nwest,20\n").unwrap();

    let loader = DatasetLoader::with_defaults();
    let payload = loader.load_path(&path).await.unwrap();

    assert_eq!(payload.rows.len(), 2);
    assert_eq!(payload.fields[1].semantic_type, SemanticType::Quantitative);
}

#[tokio::test]
async fn load_path_rejects_unknown_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let loader = DatasetLoader::with_defaults();
    let err = loader.load_path(&path).await.unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(_)));
}

#[test]
fn configured_heuristics_change_classification() {
    let csv = "priority\nlow\nhigh\nmedium\n";

    let plain = DatasetLoader::with_defaults()
        .load_bytes(csv.as_bytes(), FormatHint::Csv)
        .unwrap();
    assert_eq!(plain.fields[0].semantic_type, SemanticType::Nominal);

    let config = IngestConfig::with_ordinal_keywords(vec![
        "low".to_string(),
        "medium".to_string(),
        "high".to_string(),
    ]);
    let ordinal = DatasetLoader::new(config)
        .unwrap()
        .load_bytes(csv.as_bytes(), FormatHint::Csv)
        .unwrap();
    assert_eq!(ordinal.fields[0].semantic_type, SemanticType::Ordinal);
}
