//! Property-based tests over randomly mixed batches of valid, invalid and garbled messages.

use event_pipeline_rs::config::PipelineConfig;
use event_pipeline_rs::{BatchReport, Order, Pipeline, aggregate};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum Message {
    Valid { quantity: i32, cents: i64, status: u8 },
    Invalid { quantity: i32 },
    Garbled(String),
}

impl Message {
    fn body(&self, idx: usize) -> String {
        match self {
            Message::Valid {
                quantity,
                cents,
                status,
            } => format!(
                r#"{{"orderId":"O{idx}","customerName":"Ivy Martinez","product":"P{}","quantity":{quantity},"price":"{}","status":{status}}}"#,
                idx % 4,
                Decimal::new(*cents, 2)
            ),
            Message::Invalid { quantity } => format!(
                r#"{{"orderId":"O{idx}","customerName":"","product":"P","quantity":{quantity},"price":1}}"#
            ),
            Message::Garbled(text) => format!("{{{text}"),
        }
    }
}

fn message() -> impl Strategy<Value = Message> {
    prop_oneof![
        3 => (1i32..20, 1i64..200_000, 0u8..4)
            .prop_map(|(quantity, cents, status)| Message::Valid { quantity, cents, status }),
        1 => (-5i32..5).prop_map(|quantity| Message::Invalid { quantity }),
        1 => "[a-z ]{0,12}".prop_map(Message::Garbled),
    ]
}

fn run(bodies: &[String]) -> (BatchReport, Pipeline<Order>) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let pipeline = Pipeline::<Order>::new(PipelineConfig::default());
    let report = runtime.block_on(pipeline.process_batch(bodies));
    (report, pipeline)
}

proptest! {
    #[test]
    fn every_message_is_accounted_for(messages in prop::collection::vec(message(), 0..40)) {
        let bodies: Vec<String> = messages.iter().enumerate().map(|(idx, m)| m.body(idx)).collect();

        let (report, _) = run(&bodies);

        let valid = messages.iter().filter(|m| matches!(m, Message::Valid { .. })).count();
        let invalid = messages.iter().filter(|m| matches!(m, Message::Invalid { .. })).count();
        prop_assert_eq!(report.received, messages.len());
        prop_assert_eq!(report.decoded + report.decode_failures, report.received);
        prop_assert_eq!(
            report.processed + report.validation_failures + report.processing_failures,
            report.decoded
        );
        prop_assert_eq!(report.processed, valid);
        prop_assert_eq!(report.validation_failures, invalid);
        prop_assert_eq!(report.failures.len(), report.received - report.processed);
        prop_assert_eq!(report.summary.is_some(), valid > 0);
    }

    #[test]
    fn summary_matches_the_stored_records(messages in prop::collection::vec(message(), 1..30)) {
        let bodies: Vec<String> = messages.iter().enumerate().map(|(idx, m)| m.body(idx)).collect();

        let (report, pipeline) = run(&bodies);

        let processed: Vec<Order> = (0..bodies.len())
            .filter_map(|idx| pipeline.store().get(&format!("O{idx}")))
            .collect();
        match report.summary {
            Some(summary) => {
                prop_assert_eq!(summary.total_count, processed.len());
                prop_assert_eq!(&summary, &aggregate(&processed));
                let total: Decimal = processed.iter().map(Order::total_value).sum();
                prop_assert_eq!(summary.total_value, total);
            }
            None => prop_assert!(processed.is_empty()),
        }
    }
}
