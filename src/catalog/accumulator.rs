use crate::model::{OwnershipRecord, ProductDescription, ProductInfo};
use std::collections::HashMap;

/// The two maps a store accumulates: product details and unconsumed purchases,
/// both keyed by product id.
///
/// Inserting an id that is already present overwrites the entry, so loading the
/// same data twice leaves the accumulator unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogAccumulator {
    products: HashMap<String, ProductInfo>,
    owned: HashMap<String, OwnershipRecord>,
}

impl CatalogAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_products(&mut self, infos: impl IntoIterator<Item = ProductInfo>) {
        for info in infos {
            self.products.insert(info.id.clone(), info);
        }
    }

    pub fn insert_owned(&mut self, records: impl IntoIterator<Item = OwnershipRecord>) {
        for record in records {
            self.owned.insert(record.product_id.clone(), record);
        }
    }

    /// Stores the purchase data of a successful purchase, returning the
    /// unconsumed record it replaced, if any.
    pub fn record_purchase(&mut self, record: OwnershipRecord) -> Option<OwnershipRecord> {
        self.owned.insert(record.product_id.clone(), record)
    }

    /// Removes the ownership record of `product_id` if it still carries `token`.
    pub fn remove_consumed(&mut self, product_id: &str, token: &str) -> bool {
        match self.owned.get(product_id) {
            Some(record) if record.purchase_token == token => {
                self.owned.remove(product_id);
                true
            }
            _ => false,
        }
    }

    /// Folds a freshly loaded catalog into this one.
    pub fn merge(&mut self, loaded: CatalogAccumulator) {
        self.products.extend(loaded.products);
        self.owned.extend(loaded.owned);
    }

    pub fn product(&self, product_id: &str) -> Option<&ProductInfo> {
        self.products.get(product_id)
    }

    pub fn owned(&self, product_id: &str) -> Option<&OwnershipRecord> {
        self.owned.get(product_id)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    /// Display-ready entries for every known product, sorted by product id.
    pub fn describe(&self, store_name: &str) -> Vec<ProductDescription> {
        let mut descriptions: Vec<ProductDescription> = self
            .products
            .values()
            .map(|info| ProductDescription::from_info(info, self.owned.get(&info.id), store_name))
            .collect();
        descriptions.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        descriptions
    }
}
