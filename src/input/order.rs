use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::Order;
use crate::error::Error;
use crate::input::{Decode, RawStatus, lenient_timestamp, resolve_stage};

// Intermediate type mirroring the (lowercased) message fields
#[derive(Deserialize)]
struct RawOrder {
    #[serde(rename = "orderid")]
    order_id: Option<String>,
    #[serde(rename = "customername")]
    customer_name: Option<String>,
    product: Option<String>,
    quantity: Option<i32>,
    price: Option<Decimal>,
    #[serde(rename = "orderdate", default, deserialize_with = "lenient_timestamp")]
    order_date: Option<DateTime<Utc>>,
    status: Option<RawStatus>,
}

impl TryFrom<RawOrder> for Order {
    type Error = Error;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        let RawOrder {
            order_id,
            customer_name,
            product,
            quantity,
            price,
            order_date,
            status,
        } = raw;

        Ok(Order {
            order_id: order_id.unwrap_or_default(),
            customer_name: customer_name.unwrap_or_default(),
            product: product.unwrap_or_default(),
            quantity: quantity.unwrap_or_default(),
            price: price.unwrap_or_default(),
            order_date: order_date.unwrap_or_default(),
            stage: resolve_stage::<Order>(status)?,
        })
    }
}

impl Decode for Order {
    fn decode_fields(fields: Value) -> Result<Self, Error> {
        let raw: RawOrder = serde_json::from_value(fields)?;
        Order::try_from(raw)
    }
}
