use std::sync::Arc;

use rust_decimal_macros::dec;

use super::*;

/// Helper: a snapshot distinguishable by its id.
fn snapshot(n: usize) -> MetricsSnapshot {
    MetricsSnapshot {
        kind: "order",
        id: format!("ORD-{n}"),
        subject: "Alice Johnson".to_string(),
        category: "Laptop".to_string(),
        value: dec!(20.00),
        score: 1.0,
        stage: Stage::Intermediate,
        status: "Processing",
        processed_at: Utc::now(),
    }
}

fn ids(ledger: &MetricsLedger) -> Vec<String> {
    ledger.snapshots().into_iter().map(|s| s.id).collect()
}

#[test]
fn new_ledger_is_empty() {
    let ledger = MetricsLedger::new(100);

    assert!(ledger.is_empty());
    assert_eq!(ledger.latest(), None);
    assert_eq!(ledger.capacity(), 100);
}

#[test]
fn keeps_insertion_order_below_capacity() {
    let ledger = MetricsLedger::new(100);

    for n in 0..3 {
        assert_eq!(ledger.record(snapshot(n)), None);
    }

    assert_eq!(ids(&ledger), ["ORD-0", "ORD-1", "ORD-2"]);
    assert_eq!(ledger.latest().map(|s| s.id), Some("ORD-2".to_string()));
}

#[test]
fn hundred_and_first_snapshot_evicts_the_oldest() {
    let ledger = MetricsLedger::new(100);
    for n in 0..100 {
        ledger.record(snapshot(n));
    }
    assert_eq!(ledger.len(), 100);

    let evicted = ledger.record(snapshot(100));

    assert_eq!(evicted.map(|s| s.id), Some("ORD-0".to_string()));
    assert_eq!(ledger.len(), 100);
    let expected: Vec<String> = (1..=100).map(|n| format!("ORD-{n}")).collect();
    assert_eq!(ids(&ledger), expected);
}

#[test]
fn eviction_is_first_in_first_out() {
    let ledger = MetricsLedger::new(2);

    ledger.record(snapshot(1));
    ledger.record(snapshot(2));
    ledger.record(snapshot(3));
    ledger.record(snapshot(4));

    assert_eq!(ids(&ledger), ["ORD-3", "ORD-4"]);
}

#[test]
fn concurrent_writers_never_exceed_capacity() {
    let ledger = Arc::new(MetricsLedger::new(50));

    std::thread::scope(|s| {
        for worker in 0..8 {
            let ledger = Arc::clone(&ledger);
            s.spawn(move || {
                for n in 0..100 {
                    ledger.record(snapshot(worker * 1000 + n));
                }
            });
        }
    });

    assert_eq!(ledger.len(), 50);
}

#[test]
fn capture_copies_record_fields() {
    use crate::domain::Order;

    let order = Order {
        order_id: "ORD-7".to_string(),
        customer_name: "Grace Lee".to_string(),
        product: "Monitor".to_string(),
        quantity: 3,
        price: dec!(100.00),
        order_date: Utc::now(),
        stage: Stage::Success,
    };

    let snapshot = MetricsSnapshot::capture(&order, 42.5);

    assert_eq!(snapshot.kind, "order");
    assert_eq!(snapshot.id, "ORD-7");
    assert_eq!(snapshot.subject, "Grace Lee");
    assert_eq!(snapshot.category, "Monitor");
    assert_eq!(snapshot.value, dec!(300.00));
    assert_eq!(snapshot.score, 42.5);
    assert_eq!(snapshot.status, "Completed");
}
