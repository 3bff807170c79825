//! Transient picker and composer state of an open order form.
//!
//! Nothing here is part of the order itself: the supplier picker only tracks what the
//! user typed and whether its dropdown is open, and the composer stages one product
//! until it is committed to the draft as a line item.

use crate::entities::product;
use rust_decimal::Decimal;

/// Search state of the supplier picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierPicker {
    /// Text in the supplier input
    pub search: String,
    /// Whether the suggestion dropdown is showing
    pub dropdown_open: bool,
}

/// A product staged for the next line item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemComposer {
    /// Catalog id of the staged product
    pub product_id: Option<i64>,
    /// Name of the staged product; empty when nothing is staged
    pub name: String,
    /// Quantity to order
    pub quantity: u32,
    /// Unit price to order at
    pub price: Decimal,
    /// Text in the product search input
    pub search: String,
}

impl LineItemComposer {
    /// An empty composer with quantity 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quantity: 1,
            ..Self::default()
        }
    }

    /// Stages `product`, copying its name and unit price.
    pub fn stage(&mut self, product: &product::Model) {
        self.product_id = Some(product.id);
        self.name.clone_from(&product.name);
        self.price = product.price;
        self.search.clone_from(&product.name);
    }

    /// Drops the staged product and its search text, keeping the quantity.
    pub fn clear_staged(&mut self) {
        self.product_id = None;
        self.name.clear();
        self.price = Decimal::ZERO;
        self.search.clear();
    }

    /// Clears everything after a commit.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether "add item" is enabled: a product, a quantity and a price are all set.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.product_id.is_some()
            && !self.name.is_empty()
            && self.quantity > 0
            && !self.price.is_zero()
    }
}
