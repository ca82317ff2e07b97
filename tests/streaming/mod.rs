//! Generators feeding a pipeline over the in-memory stream.

use std::time::Duration;

use event_pipeline_rs::config::{GeneratorConfig, PipelineConfig};
use event_pipeline_rs::generator::{Generate, run_generator};
use event_pipeline_rs::transport::memory_stream;
use event_pipeline_rs::{Article, Order, Pipeline, Stage};

fn fast<R: Generate>() -> GeneratorConfig {
    GeneratorConfig {
        interval: Duration::from_millis(10),
        ..GeneratorConfig::for_kind::<R>()
    }
}

#[tokio::test]
async fn generated_orders_flow_through_the_pipeline() {
    // Arrange
    let config = fast::<Order>();
    let pipeline = Pipeline::<Order>::new(PipelineConfig::default());
    let (producer, mut consumer) = memory_stream("orders", 256, 32);

    // Act
    let fired = run_generator::<Order>(&config, &producer, Some(3)).await.unwrap();
    drop(producer);

    let mut processed = 0;
    while let Some(batch) = consumer.next_batch().await {
        let bodies: Vec<&str> = batch.iter().map(|m| m.body.as_str()).collect();
        let report = pipeline.process_batch(&bodies).await;
        assert!(report.is_clean(), "unexpected failures: {:?}", report.failures);
        processed += report.processed;
    }

    // Assert
    assert_eq!(fired, 3);
    assert!((15..=45).contains(&processed), "processed {processed}");
    assert_eq!(pipeline.store().len(), processed);
    assert_eq!(pipeline.ledger().len(), processed);
    assert!(
        pipeline
            .ledger()
            .snapshots()
            .iter()
            .all(|snapshot| snapshot.stage == Stage::Intermediate && snapshot.status == "Processing")
    );
}

#[tokio::test]
async fn ledger_stays_bounded_under_a_long_run() {
    let config = fast::<Article>();
    let pipeline = Pipeline::<Article>::new(PipelineConfig::default());
    let (producer, mut consumer) = memory_stream("news", 16, 8);

    let generator = tokio::spawn(async move {
        run_generator::<Article>(&config, &producer, Some(40)).await
    });

    let mut processed = 0;
    while let Some(batch) = consumer.next_batch().await {
        let bodies: Vec<&str> = batch.iter().map(|m| m.body.as_str()).collect();
        processed += pipeline.process_batch(&bodies).await.processed;
    }

    assert_eq!(generator.await.unwrap().unwrap(), 40);
    assert!(processed >= 120, "processed {processed}");
    assert_eq!(pipeline.ledger().len(), pipeline.ledger().capacity());
    assert_eq!(pipeline.store().len(), processed);
}
