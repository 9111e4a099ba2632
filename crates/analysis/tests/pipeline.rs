//! End-to-end tests for the table analysis pipeline.
//!
//! Fixtures are raw JSON so category order is exactly as written.

use tablecheck_analysis::{analyze, TableAnalyzer};
use tablecheck_core::{AnalyzerConfig, CellValue, Document, OrdinalScope, TableCheckError};

fn document(json: &str) -> Document {
    Document::from_json_str(json).expect("valid document")
}

fn stats(doc: &Document, config: &AnalyzerConfig) -> Vec<(u32, usize, f64, f64)> {
    analyze(doc, config)
        .unwrap()
        .table_statistics
        .rows
        .iter()
        .map(|r| (r.page_number, r.table_index, r.mean, r.std))
        .collect()
}

/// Two tables on page 1, one on page 2, an untagged table, and fields in and
/// out of them.
fn financial_document() -> Document {
    document(
        r#"{
        "id": "doc-test",
        "x": {
            "tables__table": [
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 50, "bottom": 50,
                           "df": [[1, "2.0", "x"], [3, "NaN", 4]]}]},
                {"tags": []},
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 60, "right": 50, "bottom": 100,
                           "df": [["a", "b"], ["-", ""]]}]},
                {"tags": [{"page": {"page_number": 2}, "left": 0, "top": 0, "right": 50, "bottom": 50,
                           "df": [["$1,000", "(200)"]]}]}
            ],
            "revenue": [
                {"value": 10, "tags": [{"page": {"page_number": 1}, "left": 5, "top": 5, "right": 10, "bottom": 10}]},
                {"value": 100, "tags": [{"page": {"page_number": 1}, "left": 70, "top": 70, "right": 80, "bottom": 80}]},
                {"value": 200, "tags": [{"page": {"page_number": 3}, "left": 5, "top": 5, "right": 10, "bottom": 10}]}
            ],
            "assets": [
                {"value": "n/a", "tags": []},
                {"value": 7, "tags": [{"page": {"page_number": 1}, "left": 5, "top": 65, "right": 10, "bottom": 70}]},
                {"value": 8, "tags": [{"page": {"page_number": 2}, "left": 1, "top": 1, "right": 2, "bottom": 2}]}
            ]
        }
    }"#,
    )
}

#[test]
fn test_reports_for_financial_document() {
    let doc = financial_document();
    assert_eq!(
        doc.x.keys().collect::<Vec<_>>(),
        ["tables__table", "revenue", "assets"]
    );

    // (1,1) is referenced but has no numbers
    assert_eq!(
        stats(&doc, &AnalyzerConfig::default()),
        vec![(1, 0, 2.5, 1.12), (2, 0, 400.0, 600.0)]
    );

    let report = analyze(&doc, &AnalyzerConfig::default()).unwrap();
    assert_eq!(report.unmatched_fields.len(), 1);
    assert_eq!(
        report.unmatched_fields.get("revenue").unwrap(),
        [(1, CellValue::Int(100)), (3, CellValue::Int(200))]
    );
}

#[test]
fn test_repeated_runs_are_identical() {
    let doc = financial_document();
    let first = analyze(&doc, &AnalyzerConfig::default()).unwrap();
    let second = analyze(&doc, &AnalyzerConfig::default()).unwrap();
    assert_eq!(first, second);

    let mut analyzer = TableAnalyzer::new(AnalyzerConfig::default()).unwrap();
    let third = analyzer.analyze(&doc).unwrap();
    let fourth = analyzer.analyze(&doc).unwrap();
    assert_eq!(first, third);
    assert_eq!(third, fourth);
}

#[test]
fn test_untagged_tables_never_reported() {
    let doc = document(
        r#"{
        "id": "doc-test",
        "x": {
            "tables__table": [{"tags": []}, {"tags": []}],
            "revenue": [
                {"value": 1, "tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 1, "bottom": 1}]}
            ]
        }
    }"#,
    );
    let report = analyze(&doc, &AnalyzerConfig::default()).unwrap();
    assert!(report.table_statistics.is_empty());
    assert_eq!(
        report.unmatched_fields.get("revenue").unwrap(),
        [(1, CellValue::Int(1))]
    );
}

#[test]
fn test_table_without_fields_still_reported() {
    let doc = document(
        r#"{
        "id": "doc-test",
        "x": {
            "tables__table": [
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 50, "bottom": 50,
                           "df": [[1, 3]]}]}
            ],
            "revenue": [
                {"value": 5, "tags": [{"page": {"page_number": 2}, "left": 5, "top": 5, "right": 10, "bottom": 10}]}
            ]
        }
    }"#,
    );
    assert_eq!(stats(&doc, &AnalyzerConfig::default()), vec![(1, 0, 2.0, 1.0)]);

    let report = analyze(&doc, &AnalyzerConfig::default()).unwrap();
    assert_eq!(
        report.unmatched_fields.get("revenue").unwrap(),
        [(2, CellValue::Int(5))]
    );
}

#[test]
fn test_table_inside_earlier_table_is_absorbed() {
    // the second table and the field both lie fully inside the first table
    let doc = document(
        r#"{
        "id": "doc-test",
        "x": {
            "tables__table": [
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 100, "bottom": 100,
                           "df": [[1]]}]},
                {"tags": [{"page": {"page_number": 1}, "left": 10, "top": 10, "right": 20, "bottom": 20,
                           "df": [[2]]}]}
            ],
            "revenue": [
                {"value": 1, "tags": [{"page": {"page_number": 1}, "left": 12, "top": 12, "right": 14, "bottom": 14}]}
            ]
        }
    }"#,
    );
    assert_eq!(stats(&doc, &AnalyzerConfig::default()), vec![(1, 0, 1.0, 0.0)]);
}

#[test]
fn test_shared_table_registered_once_in_first_reference_order() {
    // "valuation" sorts after "tables__table" but is written first
    let doc = document(
        r#"{
        "id": "doc-test",
        "x": {
            "valuation": [
                {"value": 10, "tags": [{"page": {"page_number": 2}, "left": 5, "top": 5, "right": 10, "bottom": 10}]},
                {"value": 20, "tags": [{"page": {"page_number": 2}, "left": 20, "top": 20, "right": 30, "bottom": 30}]}
            ],
            "tables__table": [
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 50, "bottom": 50,
                           "df": [[1, 3]]}]},
                {"tags": [{"page": {"page_number": 2}, "left": 0, "top": 0, "right": 50, "bottom": 50,
                           "df": [[10, 20]]}]}
            ]
        }
    }"#,
    );
    assert_eq!(
        stats(&doc, &AnalyzerConfig::default()),
        vec![(2, 0, 15.0, 5.0), (1, 0, 2.0, 1.0)]
    );

    let report = analyze(&doc, &AnalyzerConfig::default()).unwrap();
    assert!(report.unmatched_fields.is_empty());
}

#[test]
fn test_threshold_is_inclusive() {
    let doc = document(
        r#"{
        "id": "doc-test",
        "x": {
            "tables__table": [
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 100, "bottom": 100,
                           "df": [[1]]}]}
            ],
            "revenue": [
                {"value": 1, "tags": [{"page": {"page_number": 1}, "left": 95, "top": 0, "right": 105, "bottom": 10}]}
            ]
        }
    }"#,
    );

    let at = AnalyzerConfig {
        similarity_threshold: 0.5,
        ..AnalyzerConfig::default()
    };
    let report = analyze(&doc, &at).unwrap();
    assert_eq!(report.table_statistics.len(), 1);
    assert!(report.unmatched_fields.is_empty());

    // the table still matches its own tag
    let above = AnalyzerConfig {
        similarity_threshold: 0.51,
        ..AnalyzerConfig::default()
    };
    let report = analyze(&doc, &above).unwrap();
    assert_eq!(report.table_statistics.len(), 1);
    assert_eq!(
        report.unmatched_fields.get("revenue").unwrap(),
        [(1, CellValue::Int(1))]
    );
}

#[test]
fn test_ordinal_scopes() {
    let doc = document(
        r#"{
        "id": "doc-test",
        "x": {
            "tables__table": [
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 10, "bottom": 10, "df": [[1]]}]},
                {"tags": [{"page": {"page_number": 2}, "left": 0, "top": 0, "right": 10, "bottom": 10, "df": [[2]]}]},
                {"tags": [{"page": {"page_number": 2}, "left": 20, "top": 20, "right": 30, "bottom": 30, "df": [[3]]}]}
            ]
        }
    }"#,
    );

    let indices = |config: &AnalyzerConfig| -> Vec<(u32, usize)> {
        stats(&doc, config).into_iter().map(|(p, i, _, _)| (p, i)).collect()
    };

    assert_eq!(indices(&AnalyzerConfig::default()), vec![(1, 0), (2, 0), (2, 1)]);

    let global = AnalyzerConfig {
        ordinal_scope: OrdinalScope::Global,
        ..AnalyzerConfig::default()
    };
    assert_eq!(indices(&global), vec![(1, 0), (2, 1), (2, 2)]);
    assert_eq!(stats(&doc, &global)[2], (2, 2, 3.0, 0.0));
}

#[test]
fn test_ignored_columns_from_config() {
    let doc = document(
        r#"{
        "id": "doc-test",
        "x": {
            "tables__table": [
                {"tags": [{"page": {"page_number": 1}, "left": 0, "top": 0, "right": 100, "bottom": 100,
                           "df": [["2019", 10, 30], ["2020", 20, 40]]}]}
            ]
        }
    }"#,
    );
    let config = AnalyzerConfig {
        ignored_columns: vec![0],
        ..AnalyzerConfig::default()
    };
    assert_eq!(stats(&doc, &config), vec![(1, 0, 25.0, 11.18)]);
}

#[test]
fn test_missing_table_category_is_a_lookup_error() {
    let doc = document(r#"{"id": "doc-test", "x": {"revenue": []}}"#);
    let err = analyze(&doc, &AnalyzerConfig::default()).unwrap_err();
    assert!(matches!(err, TableCheckError::MissingCategory { ref category, .. } if category == "tables__table"));
}

#[test]
fn test_empty_reports_signal_emptiness() {
    let doc = document(r#"{"id": "doc-test", "x": {"tables__table": []}}"#);
    let report = analyze(&doc, &AnalyzerConfig::default()).unwrap();
    assert!(report.table_statistics.is_empty());
    assert!(report.unmatched_fields.is_empty());

    let batch = report.table_statistics.to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 0);
    let batch = report.unmatched_fields.to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 0);
}
