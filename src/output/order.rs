use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Error;
use crate::domain::{Money, Order};
use crate::output::{Encode, OutboundMessage, encode_with, routing_key};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderMessage<'a> {
    order_id: &'a str,
    customer_name: &'a str,
    product: &'a str,
    quantity: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    price: Money,
    order_date: DateTime<Utc>,
    status: usize,
}

impl Encode for Order {
    fn encode(&self) -> Result<OutboundMessage, Error> {
        let wire = OrderMessage {
            order_id: &self.order_id,
            customer_name: &self.customer_name,
            product: &self.product,
            quantity: self.quantity,
            price: self.price,
            order_date: self.order_date,
            status: self.stage.ordinal(),
        };
        encode_with(
            &wire,
            [
                ("orderType", "newOrder".to_string()),
                ("customerId", routing_key(&self.customer_name)),
                ("totalValue", format!("{:.2}", self.total_value())),
            ],
        )
    }
}
