//! Catalog business logic - suppliers and products an order can be placed against.
//!
//! The order form reads the catalog through [`CatalogSource`] once per open and keeps
//! the result in a [`Catalog`]. A failed load is logged and leaves that half of the
//! catalog empty, so the form still opens and its pickers simply find nothing.
//! The remaining functions manage the catalog rows stored in the database.

use crate::{
    entities::{Product, Supplier, product, supplier},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, error, info};

/// Where an order form gets its reference data from.
pub trait CatalogSource {
    /// Returns every supplier that can be ordered from.
    fn fetch_suppliers(&self) -> impl Future<Output = Result<Vec<supplier::Model>>> + Send;

    /// Returns every orderable product.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<product::Model>>> + Send;
}

impl CatalogSource for DatabaseConnection {
    async fn fetch_suppliers(&self) -> Result<Vec<supplier::Model>> {
        get_all_active_suppliers(self).await
    }

    async fn fetch_products(&self) -> Result<Vec<product::Model>> {
        get_all_active_products(self).await
    }
}

/// Snapshot of suppliers and products taken when a form opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// All suppliers
    pub suppliers: Vec<supplier::Model>,
    /// All products
    pub products: Vec<product::Model>,
}

impl Catalog {
    /// Loads suppliers and products concurrently from `source`.
    ///
    /// Failures are logged and yield an empty list for the affected half.
    pub async fn load<S: CatalogSource + Sync>(source: &S) -> Self {
        let (suppliers, products) =
            tokio::join!(source.fetch_suppliers(), source.fetch_products());

        let suppliers = suppliers.unwrap_or_else(|e| {
            error!("Failed to load suppliers: {e}");
            Vec::new()
        });
        let products = products.unwrap_or_else(|e| {
            error!("Failed to load products: {e}");
            Vec::new()
        });

        debug!(
            "Catalog loaded with {} suppliers and {} products",
            suppliers.len(),
            products.len()
        );
        Self {
            suppliers,
            products,
        }
    }

    /// Finds a supplier by name, ignoring case.
    #[must_use]
    pub fn supplier_named(&self, name: &str) -> Option<&supplier::Model> {
        let name_lower = name.trim().to_lowercase();
        self.suppliers
            .iter()
            .find(|s| s.name.to_lowercase() == name_lower)
    }

    /// Finds a product by id.
    #[must_use]
    pub fn product(&self, product_id: i64) -> Option<&product::Model> {
        self.products.iter().find(|p| p.id == product_id)
    }
}

/// Input for [`create_supplier`]; also the shape of a `[[suppliers]]` config entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSupplier {
    /// Supplier name, unique
    pub name: String,
    /// Category of goods supplied
    pub supplies: String,
    /// Optional tax identifier
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Optional contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Optional additional information
    #[serde(default)]
    pub notes: Option<String>,
}

/// Input for [`create_product`]; also the shape of a `[[products]]` config entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Unit price
    pub price: Decimal,
    /// Name of an existing supplier
    pub supplier: String,
    /// Units in stock
    #[serde(default)]
    pub stock: i32,
    /// Unit of measure
    pub unit: String,
    /// Stock keeping unit, unique
    pub sku: String,
    /// Product category
    pub category: String,
}

/// Retrieves all active suppliers, ordered alphabetically by name.
pub async fn get_all_active_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::IsDeleted.eq(false))
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active products, ordered alphabetically by name.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an active supplier by name, ignoring case.
pub async fn get_supplier_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<supplier::Model>> {
    let name_lower = name.trim().to_lowercase();
    let suppliers = get_all_active_suppliers(db).await?;
    Ok(suppliers
        .into_iter()
        .find(|s| s.name.to_lowercase() == name_lower))
}

/// Retrieves the active products of one supplier, ordered by name.
pub async fn get_products_for_supplier(
    db: &DatabaseConnection,
    supplier_name: &str,
) -> Result<Vec<product::Model>> {
    let name_lower = supplier_name.trim().to_lowercase();
    let products = get_all_active_products(db).await?;
    Ok(products
        .into_iter()
        .filter(|p| p.supplier.to_lowercase() == name_lower)
        .collect())
}

/// Whether any supplier row has this name (ignoring case), soft-deleted ones included.
pub async fn supplier_name_exists(db: &DatabaseConnection, name: &str) -> Result<bool> {
    let name_lower = name.trim().to_lowercase();
    let suppliers = Supplier::find().all(db).await?;
    Ok(suppliers
        .iter()
        .any(|s| s.name.to_lowercase() == name_lower))
}

/// Whether any product row has this SKU, soft-deleted ones included.
pub async fn sku_exists(db: &DatabaseConnection, sku: &str) -> Result<bool> {
    let found = Product::find()
        .filter(product::Column::Sku.eq(sku.trim()))
        .one(db)
        .await?;
    Ok(found.is_some())
}

/// Finds an active product by SKU, ignoring case.
pub async fn get_product_by_sku(
    db: &DatabaseConnection,
    sku: &str,
) -> Result<Option<product::Model>> {
    let sku_lower = sku.trim().to_lowercase();
    let products = get_all_active_products(db).await?;
    Ok(products
        .into_iter()
        .find(|p| p.sku.to_lowercase() == sku_lower))
}

/// Creates a supplier after validating its name.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails (including a duplicate name).
pub async fn create_supplier(
    db: &DatabaseConnection,
    new_supplier: NewSupplier,
) -> Result<supplier::Model> {
    if new_supplier.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Supplier name cannot be empty".to_string(),
        });
    }

    let now = chrono::Utc::now();
    let supplier = supplier::ActiveModel {
        name: Set(new_supplier.name.trim().to_string()),
        supplies: Set(new_supplier.supplies),
        tax_id: Set(new_supplier.tax_id),
        email: Set(new_supplier.email),
        notes: Set(new_supplier.notes),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = supplier.insert(db).await?;
    info!("Created supplier '{}'", result.name);
    Ok(result)
}

/// Creates a product for an existing supplier.
///
/// The stored supplier name is the supplier's canonical spelling, whatever case the
/// input used.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative
/// - The stock is negative
/// - No active supplier has the given name
/// - The database insert fails (including a duplicate SKU)
pub async fn create_product(
    db: &DatabaseConnection,
    new_product: NewProduct,
) -> Result<product::Model> {
    if new_product.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if new_product.price < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: new_product.price,
        });
    }

    if new_product.stock < 0 {
        return Err(Error::InvalidQuantity {
            quantity: i64::from(new_product.stock),
        });
    }

    let supplier = get_supplier_by_name(db, &new_product.supplier)
        .await?
        .ok_or_else(|| Error::SupplierNotFound {
            name: new_product.supplier.clone(),
        })?;

    let now = chrono::Utc::now();
    let product = product::ActiveModel {
        name: Set(new_product.name.trim().to_string()),
        price: Set(new_product.price),
        supplier: Set(supplier.name),
        stock: Set(new_product.stock),
        unit: Set(new_product.unit),
        sku: Set(new_product.sku.trim().to_string()),
        category: Set(new_product.category),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Soft deletes a supplier so it no longer shows up in pickers.
///
/// # Errors
/// Returns an error if the supplier does not exist, is already deleted, or the update fails.
pub async fn delete_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<supplier::Model> {
    let mut supplier: supplier::ActiveModel = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .filter(|s| !s.is_deleted)
        .ok_or_else(|| Error::SupplierNotFound {
            name: supplier_id.to_string(),
        })?
        .into();

    supplier.is_deleted = Set(true);
    supplier.updated_at = Set(chrono::Utc::now());

    supplier.update(db).await.map_err(Into::into)
}

/// Soft deletes a product so it no longer shows up in pickers.
///
/// # Errors
/// Returns an error if the product does not exist, is already deleted, or the update fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.is_deleted = Set(true);
    product.updated_at = Set(chrono::Utc::now());

    product.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    struct FailingSuppliers {
        products: Vec<product::Model>,
    }

    impl CatalogSource for FailingSuppliers {
        async fn fetch_suppliers(&self) -> Result<Vec<supplier::Model>> {
            Err(Error::Config {
                message: "supplier service unavailable".to_string(),
            })
        }

        async fn fetch_products(&self) -> Result<Vec<product::Model>> {
            Ok(self.products.clone())
        }
    }

    #[tokio::test]
    async fn test_load_keeps_going_when_one_half_fails() {
        let source = FailingSuppliers {
            products: vec![sample_product(1, "Flour", dec!(10), "Acme Foods")],
        };

        let catalog = Catalog::load(&source).await;

        assert!(catalog.suppliers.is_empty());
        assert_eq!(catalog.products.len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_database() -> Result<()> {
        let db = setup_with_catalog().await?;

        let catalog = Catalog::load(&db).await;

        assert_eq!(catalog.suppliers.len(), 3);
        assert_eq!(catalog.products.len(), 4);
        // Alphabetical
        assert_eq!(catalog.suppliers[0].name, "Ace Hardware");
        assert!(catalog.supplier_named("acme foods").is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_supplier_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_supplier(&db, new_supplier("   ")).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = setup_test_db().await?;
        create_supplier(&db, new_supplier("Acme Foods")).await?;

        let result = create_product(&db, new_product("", dec!(1), "Acme Foods", "SKU-1")).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));

        let result =
            create_product(&db, new_product("Flour", dec!(-1), "Acme Foods", "SKU-1")).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let result = create_product(&db, new_product("Flour", dec!(1), "Nobody", "SKU-1")).await;
        assert!(matches!(result, Err(Error::SupplierNotFound { name: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_uses_canonical_supplier_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_supplier(&db, new_supplier("Acme Foods")).await?;

        let product =
            create_product(&db, new_product("Flour", dec!(12.5), "ACME foods", "SKU-1")).await?;

        assert_eq!(product.supplier, "Acme Foods");
        assert_eq!(product.price, dec!(12.5));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_supplier_name_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_supplier(&db, new_supplier("Acme Foods")).await?;

        let result = create_supplier(&db, new_supplier("Acme Foods")).await;
        assert!(matches!(result, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_products_for_supplier() -> Result<()> {
        let db = setup_with_catalog().await?;

        let products = get_products_for_supplier(&db, "acme foods").await?;
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Sugar"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_rows_hidden_from_catalog() -> Result<()> {
        let db = setup_with_catalog().await?;
        let flour = get_products_for_supplier(&db, "Acme Foods").await?[0].clone();
        let best = get_supplier_by_name(&db, "Best Co").await?.unwrap();

        delete_product(&db, flour.id).await?;
        delete_supplier(&db, best.id).await?;

        let catalog = Catalog::load(&db).await;
        assert!(catalog.product(flour.id).is_none());
        assert!(catalog.supplier_named("Best Co").is_none());

        let again = delete_product(&db, flour.id).await;
        assert!(matches!(again, Err(Error::ProductNotFound { name: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_existence_checks_include_deleted_rows() -> Result<()> {
        let db = setup_with_catalog().await?;
        let best = get_supplier_by_name(&db, "Best Co").await?.unwrap();
        let hammer = get_product_by_sku(&db, "sku-3").await?.unwrap();
        assert_eq!(hammer.name, "Hammer");

        delete_supplier(&db, best.id).await?;
        delete_product(&db, hammer.id).await?;

        assert!(supplier_name_exists(&db, "best co").await?);
        assert!(sku_exists(&db, "SKU-3").await?);
        assert!(get_product_by_sku(&db, "SKU-3").await?.is_none());
        assert!(!supplier_name_exists(&db, "Nobody").await?);
        assert!(!sku_exists(&db, "SKU-99").await?);
        Ok(())
    }
}
