//! Module defining the order record kind

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::{
    Grouping, Highlight, Money, Pattern, Record, ScoreInputs, ScoreWeights, Stage, require,
};

/// Orders above this total value are held in processing instead of completing.
pub const HIGH_VALUE_THRESHOLD: Money = Decimal::from_parts(1000, 0, 0, false, 0);
/// Orders above this total value get a log line of their own.
pub const NOTABLE_VALUE: Money = Decimal::from_parts(500, 0, 0, false, 0);
/// Orders with more units than this count as bulk orders.
pub const BULK_QUANTITY: i32 = 10;

/// A customer order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer_name: String,
    pub product: String,
    pub quantity: i32,
    pub price: Money,
    pub order_date: DateTime<Utc>,
    pub stage: Stage,
}

impl Order {
    /// Price times quantity, `None` when the product does not fit a decimal.
    pub fn checked_total_value(&self) -> Option<Money> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Price times quantity, saturating at the decimal bounds.
    pub fn total_value(&self) -> Money {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

fn product(order: &Order) -> &str {
    &order.product
}

fn is_high_value(order: &Order) -> bool {
    order.total_value() > HIGH_VALUE_THRESHOLD
}

fn is_bulk(order: &Order) -> bool {
    order.quantity > BULK_QUANTITY
}

impl Record for Order {
    const KIND: &'static str = "order";

    const STAGE_LABELS: [&'static str; 4] = ["Created", "Processing", "Completed", "Cancelled"];

    // Orders carry no signed score: the value drives the log term and the units the linear term.
    const SCORE_WEIGHTS: ScoreWeights = ScoreWeights {
        primary: 10.0,
        secondary: 20.0,
        auxiliary: 2.0,
    };

    const GROUPINGS: &'static [Grouping<Self>] = &[Grouping {
        name: "product",
        key: product,
    }];

    const PATTERNS: &'static [Pattern<Self>] = &[
        Pattern {
            name: "high_value",
            matches: is_high_value,
        },
        Pattern {
            name: "bulk",
            matches: is_bulk,
        },
    ];

    fn id(&self) -> &str {
        &self.order_id
    }

    fn subject(&self) -> &str {
        &self.customer_name
    }

    fn category(&self) -> &str {
        &self.product
    }

    fn stage(&self) -> Stage {
        self.stage
    }

    fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        require(&mut violations, &self.order_id, "OrderId");
        require(&mut violations, &self.customer_name, "CustomerName");
        require(&mut violations, &self.product, "Product");
        if self.quantity <= 0 {
            violations.push("Quantity must be greater than 0".to_string());
        }
        if self.price <= Decimal::ZERO {
            violations.push("Price must be greater than 0".to_string());
        }
        violations
    }

    fn promotes(&self) -> bool {
        !is_high_value(self)
    }

    fn value(&self) -> Money {
        self.total_value()
    }

    fn checked_value(&self) -> Option<Money> {
        self.checked_total_value()
    }

    fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            primary_count: self.total_value().to_f64().unwrap_or(f64::NAN),
            secondary_score: 0.0,
            auxiliary_len: usize::try_from(self.quantity).unwrap_or(0),
        }
    }

    fn highlights(&self) -> Vec<Highlight> {
        let mut highlights = Vec::new();
        let total = self.total_value();
        if total > NOTABLE_VALUE {
            highlights.push(Highlight::new(
                "high_value",
                format!("{} for {total:.2}", self.product),
            ));
        }
        if is_bulk(self) {
            highlights.push(Highlight::new(
                "bulk",
                format!("{} units of {}", self.quantity, self.product),
            ));
        }
        highlights
    }
}
