//! The transaction model and the enrichment step that validates raw dataset
//! records and attaches computed reward points.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

use crate::points::reward_points;

/// The date format used by dataset files, e.g. "2024-01-15".
const PURCHASE_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A transaction record as it appears in a dataset file.
///
/// Datasets are untrusted, so every field is optional: records may omit
/// fields or be `null` entirely, and a price may arrive as a number or a
/// numeric string. Validation happens in [enrich], never during parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransaction {
    /// The identifier assigned by the dataset, not assumed to be unique.
    pub transaction_id: Option<u64>,
    /// The identifier of the purchasing customer.
    pub customer_id: Option<u64>,
    /// The display name of the purchasing customer.
    pub customer_name: Option<String>,
    /// The purchase date string, expected in "2024-01-15" form.
    pub purchase_date: Option<String>,
    /// The name of the purchased product.
    pub product_purchased: Option<String>,
    /// The purchase price in dollars. Accepts numbers and numeric strings.
    #[serde(deserialize_with = "deserialize_lenient_price")]
    pub price: Option<f64>,
}

/// A validated transaction with its computed reward points.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// An identifier unique within one enrichment pass (UUID v4).
    pub id: String,
    /// The identifier assigned by the dataset.
    pub transaction_id: u64,
    /// The identifier of the purchasing customer.
    pub customer_id: u64,
    /// The display name of the purchasing customer.
    pub customer_name: String,
    /// The purchase date, or `None` when the raw date string did not parse.
    pub purchase_date: Option<Date>,
    /// The name of the purchased product.
    pub product_purchased: String,
    /// The purchase price in dollars, always finite and greater than zero.
    pub price: f64,
    /// The reward points earned by this purchase.
    pub reward_points: u64,
}

/// Validate raw dataset records and attach reward points and a fresh id.
///
/// Records whose price is missing, non-numeric, non-finite, zero, or negative
/// are dropped. Records with unparseable dates are kept with
/// `purchase_date: None` so their points still count toward totals. Input
/// order is preserved and the function never fails: bad records are skipped,
/// an empty input produces an empty output.
pub fn enrich(records: Vec<RawTransaction>) -> Vec<Transaction> {
    records
        .into_iter()
        .filter_map(|record| {
            let price = record.price.filter(|price| price.is_finite() && *price > 0.0)?;

            Some(Transaction {
                id: Uuid::new_v4().to_string(),
                transaction_id: record.transaction_id.unwrap_or_default(),
                customer_id: record.customer_id.unwrap_or_default(),
                customer_name: record.customer_name.unwrap_or_default(),
                purchase_date: record
                    .purchase_date
                    .as_deref()
                    .and_then(parse_purchase_date),
                product_purchased: record.product_purchased.unwrap_or_default(),
                price,
                reward_points: reward_points(price),
            })
        })
        .collect()
}

/// Parse a dataset date string in "2024-01-15" form.
///
/// Anything else, including datetime strings and garbage like "not-a-date",
/// is treated as an invalid date and returns `None`.
pub fn parse_purchase_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), PURCHASE_DATE_FORMAT).ok()
}

fn deserialize_lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientPrice)
}

/// Accepts JSON numbers and numeric strings, mapping everything else to
/// `None` so a malformed price drops the record at enrichment instead of
/// failing the whole dataset.
struct LenientPrice;

impl<'de> Visitor<'de> for LenientPrice {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.trim().parse().ok())
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(LenientPrice)
    }
}
