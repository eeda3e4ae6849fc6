use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Product classification used by the platform to partition the catalog.
///
/// The order of [`ProductClass::SEQUENCE`] is the order in which the catalog is
/// loaded. It carries no priority meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductClass {
    Consumable,
    NonConsumable,
    Subscription,
}

impl ProductClass {
    /// Fixed load sequence.
    pub const SEQUENCE: [ProductClass; 3] = [
        ProductClass::Consumable,
        ProductClass::NonConsumable,
        ProductClass::Subscription,
    ];

    /// The class loaded after this one, or `None` for the last class.
    pub fn next(self) -> Option<ProductClass> {
        match self {
            ProductClass::Consumable => Some(ProductClass::NonConsumable),
            ProductClass::NonConsumable => Some(ProductClass::Subscription),
            ProductClass::Subscription => None,
        }
    }

    /// Numeric price type the platform uses on the wire.
    pub fn price_type(self) -> u8 {
        match self {
            ProductClass::Consumable => 0,
            ProductClass::NonConsumable => 1,
            ProductClass::Subscription => 2,
        }
    }

    pub fn from_price_type(code: u8) -> Option<ProductClass> {
        match code {
            0 => Some(ProductClass::Consumable),
            1 => Some(ProductClass::NonConsumable),
            2 => Some(ProductClass::Subscription),
            _ => None,
        }
    }
}

impl Display for ProductClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProductClass::Consumable => "consumable",
            ProductClass::NonConsumable => "non_consumable",
            ProductClass::Subscription => "subscription",
        };
        write!(f, "{}", name)
    }
}

/// A product the host wants in its catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub id: String,
    pub class: ProductClass,
}

impl ProductRequest {
    pub fn new(id: impl Into<String>, class: ProductClass) -> Self {
        Self {
            id: id.into(),
            class,
        }
    }
}

/// Product details as returned by the platform.
///
/// # Pricing
/// `price_micros` is the price in millionths of a currency unit
/// (990000 micros = 0.99).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub price_micros: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub price_type: ProductClass,
}

impl ProductInfo {
    /// Creates a product info record with empty name and description.
    pub fn new(
        id: impl Into<String>,
        price_type: ProductClass,
        price_micros: u64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            price_micros,
            currency: currency.into(),
            name: String::new(),
            description: String::new(),
            price_type,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Evidence of a completed purchase that has not been consumed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    pub product_id: String,
    pub purchase_token: String,
    pub order_id: String,
    pub signature: String,
}

impl OwnershipRecord {
    pub fn new(
        product_id: impl Into<String>,
        purchase_token: impl Into<String>,
        order_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            purchase_token: purchase_token.into(),
            order_id: order_id.into(),
            signature: signature.into(),
        }
    }
}
