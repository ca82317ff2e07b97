//! Batches pushed through the public API, checked against hand-computed reports.

use claims::{assert_matches, assert_some};
use event_pipeline_rs::config::PipelineConfig;
use event_pipeline_rs::{Article, Error, Pipeline, Stage, process_orders, split_messages};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn one_valid_one_malformed_one_invalid_order() {
    // Arrange
    let batch = [
        r#"{"orderId":"O1","customerName":"A","product":"P","quantity":2,"price":10.00,"status":0}"#,
        "{not json",
        r#"{"orderId":"O2","customerName":"B","product":"P","quantity":0,"price":5.00,"status":0}"#,
    ];

    // Act
    let report = process_orders(&batch).await;

    // Assert
    assert_eq!(report.decoded, 2);
    assert_eq!(report.decode_failures, 1);
    assert_eq!(report.processed, 1);
    assert_eq!(report.validation_failures, 1);
    assert_matches!(
        &report.failures[1],
        Error::Validation { violations, .. } if violations == &["Quantity must be greater than 0"]
    );

    let summary = assert_some!(report.summary);
    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.total_value, dec!(20.00));
    assert_eq!(summary.average_value, dec!(20.00));
    assert_eq!(summary.count_for(Stage::Intermediate), 1);
    assert_eq!(summary.status_counts[1].status, "Processing");
}

#[tokio::test]
async fn article_batch_with_every_rule_broken_once() {
    let pipeline = Pipeline::<Article>::new(PipelineConfig::default());
    let valid = json!({
        "ArticleId": "NEWS-20250101-00000001",
        "Title": "Scientists Announce Breakthrough in AI Research",
        "Content": "The latest findings suggest significant potential...",
        "Author": "Michael Chen",
        "Source": "Science Today",
        "Category": "Science",
        "ViewCount": 5432,
        "SentimentScore": 0.33,
        "Status": "Published",
        "Tags": ["research", "discovery", "experiment", "breakthrough", "study"],
    });
    let mut invalid = valid.clone();
    invalid["ArticleId"] = json!("NEWS-20250101-00000002");
    invalid["Title"] = json!("  ");
    invalid["ViewCount"] = json!(-1);

    let batch = [valid.to_string(), invalid.to_string()];
    let report = pipeline.process_batch(&batch).await;

    assert_eq!(report.processed, 1);
    assert_eq!(
        report.failures[0].to_string(),
        "validation error: article NEWS-20250101-00000002: Title is required, ViewCount cannot be negative"
    );

    let summary = assert_some!(report.summary);
    assert_eq!(summary.count_for(Stage::Success), 1);
    assert_eq!(summary.pattern("viral"), 1);
    assert_eq!(summary.pattern("well_tagged"), 1);
    assert_eq!(summary.average_secondary_score, Some(0.33));

    let snapshot = assert_some!(pipeline.ledger().latest());
    assert_eq!(snapshot.score, 53.95);
    assert_eq!(snapshot.status, "Featured");
}

#[tokio::test]
async fn report_serializes_to_json() {
    let report = process_orders(&[
        r#"{"orderId":"O1","customerName":"A","product":"P","quantity":2,"price":10.00}"#,
    ])
    .await;

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["processed"], 1);
    assert_eq!(value["summary"]["kind"], "order");
    assert_eq!(value["summary"]["total_count"], 1);
    assert_eq!(value["summary"]["rankings"][0]["top"][0]["value"], "P");
    assert_eq!(value["failures"], json!([]));
}

#[tokio::test]
async fn non_utf8_line_in_a_file_is_one_decode_failure() {
    let mut input = b"\xff\xfe\n".to_vec();
    input.extend_from_slice(
        br#"{"orderId":"O1","customerName":"A","product":"P","quantity":1,"price":"3.50","orderDate":"2024-01-15T10:30:00"}"#,
    );
    input.push(b'\n');

    let report = process_orders(&split_messages(&input)).await;

    assert_eq!(report.received, 2);
    assert_eq!(report.decoded, 1);
    assert_eq!(report.decode_failures, 1);
    assert_eq!(report.processed, 1);
    assert_matches!(&report.failures[0], Error::Utf8(_));
    assert_eq!(assert_some!(report.summary).total_value, dec!(3.50));
}
