use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::domain::{Order, Stage};
use crate::generator::{Generate, record_id};

const CUSTOMERS: [&str; 10] = [
    "Alice Johnson",
    "Bob Smith",
    "Carol Brown",
    "David Wilson",
    "Emma Davis",
    "Frank Miller",
    "Grace Lee",
    "Henry Garcia",
    "Ivy Martinez",
    "Jack Anderson",
];

// Product with its list price in cents
const PRODUCTS: [(&str, i64); 10] = [
    ("Laptop", 99_999),
    ("Smartphone", 69_999),
    ("Headphones", 14_999),
    ("Tablet", 49_999),
    ("Monitor", 29_999),
    ("Keyboard", 7_999),
    ("Mouse", 4_999),
    ("Webcam", 8_999),
    ("Speaker", 19_999),
    ("Charger", 3_999),
];

impl Generate for Order {
    const MIN_PER_FIRING: usize = 5;
    const MAX_PER_FIRING: usize = 15;

    fn generate<G: Rng>(rng: &mut G, now: DateTime<Utc>) -> Self {
        let customer = CUSTOMERS[rng.gen_range(0..CUSTOMERS.len())];
        let (product, list_cents) = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];

        // list price varied by up to 20% either way, in per mille
        let factor = Decimal::new(rng.gen_range(800..=1200), 3);
        let price = (Decimal::new(list_cents, 2) * factor).round_dp(2);

        Order {
            order_id: record_id("ORD", now),
            customer_name: customer.to_string(),
            product: product.to_string(),
            quantity: rng.gen_range(1..=10),
            price,
            order_date: now,
            stage: Stage::Initial,
        }
    }
}
