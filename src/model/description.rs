//! Display-ready catalog entries published to the host.
//!
//! The host's purchasing layer validates receipts as opaque strings, so
//! [`build_receipt`] reproduces the platform's receipt layout byte for byte,
//! including its irregular spacing.

use crate::model::{OwnershipRecord, ProductInfo};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const MICROS_PER_UNIT: u64 = 1_000_000;
const MICROS_PER_CENT: u64 = 10_000;

/// Prices at or above this many units are shown without decimals.
const WHOLE_UNIT_THRESHOLD: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub localized_price_string: String,
    pub title: String,
    pub description: String,
    pub currency_code: String,
    pub localized_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDescription {
    pub product_id: String,
    pub metadata: ProductMetadata,
    pub receipt: Option<String>,
    pub transaction_id: Option<String>,
}

impl ProductDescription {
    /// Builds the published entry for `info`, attaching a receipt when the
    /// product is currently owned.
    pub fn from_info(info: &ProductInfo, owned: Option<&OwnershipRecord>, store_name: &str) -> Self {
        let metadata = ProductMetadata {
            localized_price_string: format_price(info.price_micros, &info.currency),
            title: info.name.clone(),
            description: info.description.clone(),
            currency_code: info.currency.clone(),
            localized_price: info.price_micros as f64 / MICROS_PER_UNIT as f64,
        };

        Self {
            product_id: info.id.clone(),
            metadata,
            receipt: owned.map(|record| build_receipt(store_name, record)),
            transaction_id: owned.map(|record| record.order_id.clone()),
        }
    }
}

/// Formats a micro-unit price as `"<currency> <amount>"`.
///
/// Below 100 units the amount has two decimals (`USD 0.99`); from 100 units on
/// it is rounded half-up to a whole number (`USD 150`).
pub fn format_price(price_micros: u64, currency: &str) -> String {
    if price_micros < WHOLE_UNIT_THRESHOLD * MICROS_PER_UNIT {
        let cents = (price_micros + MICROS_PER_CENT / 2) / MICROS_PER_CENT;
        format!("{} {}.{:02}", currency, cents / 100, cents % 100)
    } else {
        let units = (price_micros + MICROS_PER_UNIT / 2) / MICROS_PER_UNIT;
        format!("{} {}", currency, units)
    }
}

/// Receipt payload for an owned product.
pub fn build_receipt(store_name: &str, record: &OwnershipRecord) -> String {
    let mut receipt = String::with_capacity(96);
    let _ = write!(
        receipt,
        "{{\"Store\":\"{}\",\"TransactionID\":\"{}\", \"Payload\":{{ \"product\":\"{}\"}}}}",
        store_name, record.order_id, record.product_id
    );
    receipt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductClass;

    #[test]
    fn test_format_price_below_threshold_has_decimals() {
        assert_eq!(format_price(990_000, "USD"), "USD 0.99");
        assert_eq!(format_price(0, "EUR"), "EUR 0.00");
        assert_eq!(format_price(99_990_000, "USD"), "USD 99.99");
    }

    #[test]
    fn test_format_price_at_and_above_threshold_is_whole() {
        assert_eq!(format_price(100_000_000, "USD"), "USD 100");
        assert_eq!(format_price(150_000_000, "USD"), "USD 150");
        assert_eq!(format_price(150_500_000, "USD"), "USD 151");
        assert_eq!(format_price(150_499_999, "USD"), "USD 150");
    }

    #[test]
    fn test_receipt_layout() {
        let record = OwnershipRecord::new("coin_pack_1", "token", "OID123", "sig");
        assert_eq!(
            build_receipt("AppGallery", &record),
            r#"{"Store":"AppGallery","TransactionID":"OID123", "Payload":{ "product":"coin_pack_1"}}"#
        );
    }

    #[test]
    fn test_description_attaches_receipt_only_when_owned() {
        let info = ProductInfo::new("gem_1", ProductClass::Consumable, 1_990_000, "USD")
            .with_name("Gem")
            .with_description("A shiny gem");

        let plain = ProductDescription::from_info(&info, None, "AppGallery");
        assert_eq!(plain.metadata.localized_price_string, "USD 1.99");
        assert_eq!(plain.metadata.title, "Gem");
        assert!(plain.receipt.is_none());
        assert!(plain.transaction_id.is_none());

        let record = OwnershipRecord::new("gem_1", "tok", "OID9", "sig");
        let owned = ProductDescription::from_info(&info, Some(&record), "AppGallery");
        assert_eq!(owned.transaction_id.as_deref(), Some("OID9"));
        assert!(owned.receipt.unwrap().contains("\"TransactionID\":\"OID9\""));
    }
}
