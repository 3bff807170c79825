//! Shared test utilities for `SupplyBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating catalog rows and order forms with sensible defaults.

use crate::{
    core::{
        catalog::{self, Catalog, CatalogSource, NewProduct, NewSupplier},
        form::{FormAction, NewPurchaseOrder, OrderForm},
    },
    entities::{product, supplier},
    errors::Result,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Supplier input with only a name; supplies "general".
pub fn new_supplier(name: &str) -> NewSupplier {
    NewSupplier {
        name: name.to_string(),
        supplies: "general".to_string(),
        tax_id: None,
        email: None,
        notes: None,
    }
}

/// Product input with stock 10, unit "unit" and category "general".
pub fn new_product(name: &str, price: Decimal, supplier: &str, sku: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        supplier: supplier.to_string(),
        stock: 10,
        unit: "unit".to_string(),
        sku: sku.to_string(),
        category: "general".to_string(),
    }
}

/// An in-memory supplier row.
pub fn sample_supplier(id: i64, name: &str) -> supplier::Model {
    let now = Utc::now();
    supplier::Model {
        id,
        name: name.to_string(),
        supplies: "general".to_string(),
        tax_id: None,
        email: None,
        notes: None,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

/// An in-memory product row.
pub fn sample_product(id: i64, name: &str, price: Decimal, supplier: &str) -> product::Model {
    let now = Utc::now();
    product::Model {
        id,
        name: name.to_string(),
        price,
        supplier: supplier.to_string(),
        stock: 10,
        unit: "unit".to_string(),
        sku: format!("SKU-{id}"),
        category: "general".to_string(),
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

/// The standard catalog, without a database.
///
/// * Acme Foods: Flour (10), Sugar (8)
/// * Ace Hardware: Hammer (25), Nails (4)
/// * Best Co: no products
pub fn sample_catalog() -> Catalog {
    Catalog {
        suppliers: vec![
            sample_supplier(1, "Acme Foods"),
            sample_supplier(2, "Ace Hardware"),
            sample_supplier(3, "Best Co"),
        ],
        products: vec![
            sample_product(1, "Flour", dec!(10), "Acme Foods"),
            sample_product(2, "Sugar", dec!(8), "Acme Foods"),
            sample_product(3, "Hammer", dec!(25), "Ace Hardware"),
            sample_product(4, "Nails", dec!(4), "Ace Hardware"),
        ],
    }
}

/// A catalog source that always returns the same catalog.
pub struct StaticCatalog(pub Catalog);

impl CatalogSource for StaticCatalog {
    async fn fetch_suppliers(&self) -> Result<Vec<supplier::Model>> {
        Ok(self.0.suppliers.clone())
    }

    async fn fetch_products(&self) -> Result<Vec<product::Model>> {
        Ok(self.0.products.clone())
    }
}

/// Sets up a database holding the standard catalog (see [`sample_catalog`]).
pub async fn setup_with_catalog() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    for name in ["Acme Foods", "Ace Hardware", "Best Co"] {
        catalog::create_supplier(&db, new_supplier(name)).await?;
    }
    catalog::create_product(&db, new_product("Flour", dec!(10), "Acme Foods", "SKU-1")).await?;
    catalog::create_product(&db, new_product("Sugar", dec!(8), "Acme Foods", "SKU-2")).await?;
    catalog::create_product(&db, new_product("Hammer", dec!(25), "Ace Hardware", "SKU-3")).await?;
    catalog::create_product(&db, new_product("Nails", dec!(4), "Ace Hardware", "SKU-4")).await?;
    Ok(db)
}

/// Builds a valid submission against the database catalog:
/// Acme Foods, 2 x Flour (20) and 3 x Sugar (24), total 44.
pub async fn submitted_order(
    db: &DatabaseConnection,
    order_number: &str,
) -> Result<NewPurchaseOrder> {
    let catalog = Catalog::load(db).await;
    let id_of = |name: &str| {
        catalog
            .products
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .unwrap_or_default()
    };
    let (flour, sugar) = (id_of("Flour"), id_of("Sugar"));

    let mut form = OrderForm::new(
        catalog,
        order_number.to_string(),
        Utc::now(),
        Duration::days(7),
    );
    for action in [
        FormAction::SelectSupplier("Acme Foods".to_string()),
        FormAction::SelectProduct(flour),
        FormAction::SetQuantity(2),
        FormAction::AddItem,
        FormAction::SelectProduct(sugar),
        FormAction::SetQuantity(3),
        FormAction::AddItem,
        FormAction::SetDeliveryAddress("12 Dock Road".to_string()),
        FormAction::SetPaymentMethod("transfer".to_string()),
    ] {
        form.apply(action)?;
    }

    Ok(form.submission("test_user")?)
}
