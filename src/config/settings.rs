//! Application settings loaded from config.toml
//!
//! The file configures the order form (delivery lead time, suggested payment
//! methods) and can list suppliers and products to seed into an empty catalog.
//! Every section is optional.

use crate::{
    core::{
        catalog::{self, NewProduct, NewSupplier},
        draft::MAX_LEAD_TIME_DAYS,
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Order form behaviour
    #[serde(default)]
    pub form: FormSettings,
    /// Suppliers to create if missing
    #[serde(default)]
    pub suppliers: Vec<NewSupplier>,
    /// Products to create if missing
    #[serde(default)]
    pub products: Vec<NewProduct>,
}

/// Order form settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Days between draft creation and the default estimated delivery
    pub default_lead_time_days: i64,
    /// Payment methods offered by autocomplete
    pub payment_methods: Vec<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            default_lead_time_days: 7,
            payment_methods: vec![
                "Bank transfer".to_string(),
                "Cash".to_string(),
                "Check".to_string(),
                "Credit card".to_string(),
            ],
        }
    }
}

impl FormSettings {
    /// Default lead time as a duration, clamped to `0..=MAX_LEAD_TIME_DAYS` days
    #[must_use]
    pub fn lead_time(&self) -> chrono::Duration {
        chrono::Duration::days(
            self.default_lead_time_days
                .clamp(0, i64::from(MAX_LEAD_TIME_DAYS)),
        )
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
/// - The lead time is negative or longer than `MAX_LEAD_TIME_DAYS`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    debug!("Loading configuration from {:?}", path.as_ref());
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// # Errors
/// Returns an error if the TOML is invalid or the lead time is out of range.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    let days = config.form.default_lead_time_days;
    if !(0..=i64::from(MAX_LEAD_TIME_DAYS)).contains(&days) {
        return Err(Error::InvalidLeadTime { days });
    }

    Ok(config)
}

/// Loads configuration from `SUPPLY_BUDDY_CONFIG`, or ./config.toml when unset.
///
/// A missing file is not an error: defaults are used.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("SUPPLY_BUDDY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        info!("No config file at {path}; using defaults");
        Ok(Config::default())
    }
}

/// Creates the configured suppliers and products that are not in the catalog yet.
///
/// Suppliers are matched by name (ignoring case), products by SKU. Soft-deleted rows
/// count as present, so a seed removed through the bot stays removed. Products whose
/// supplier is not active are skipped. Returns the number of suppliers and products
/// created.
pub async fn seed_catalog(db: &DatabaseConnection, config: &Config) -> Result<(usize, usize)> {
    let mut suppliers_created = 0;
    for new_supplier in &config.suppliers {
        if !catalog::supplier_name_exists(db, &new_supplier.name).await? {
            catalog::create_supplier(db, new_supplier.clone()).await?;
            suppliers_created += 1;
        }
    }

    let mut products_created = 0;
    for new_product in &config.products {
        if catalog::sku_exists(db, &new_product.sku).await? {
            continue;
        }
        if catalog::get_supplier_by_name(db, &new_product.supplier)
            .await?
            .is_none()
        {
            warn!(
                "Skipping seed product {} ({}): supplier '{}' is not active",
                new_product.name, new_product.sku, new_product.supplier
            );
            continue;
        }
        catalog::create_product(db, new_product.clone()).await?;
        products_created += 1;
    }

    info!("Seeded {suppliers_created} suppliers and {products_created} products");
    Ok((suppliers_created, products_created))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"
        [form]
        default_lead_time_days = 3
        payment_methods = ["Cash", "Net 30"]

        [[suppliers]]
        name = "Acme Foods"
        supplies = "produce"
        email = "orders@acme.example"

        [[products]]
        name = "Flour 25kg"
        price = 12.5
        supplier = "Acme Foods"
        stock = 40
        unit = "bag"
        sku = "ACME-FL-25"
        category = "baking"
    "#;

    #[test]
    fn test_parse_config() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.form.default_lead_time_days, 3);
        assert_eq!(config.form.payment_methods, vec!["Cash", "Net 30"]);
        assert_eq!(config.suppliers[0].email.as_deref(), Some("orders@acme.example"));
        assert_eq!(config.suppliers[0].tax_id, None);
        assert_eq!(config.products[0].price, dec!(12.5));
        assert_eq!(config.products[0].stock, 40);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.form.default_lead_time_days, 7);
        assert_eq!(config.form.lead_time(), chrono::Duration::days(7));
        assert!(config.suppliers.is_empty());
    }

    #[test]
    fn test_out_of_range_lead_time_rejected() {
        let result = parse_config("[form]\ndefault_lead_time_days = -1\n");
        assert!(matches!(result, Err(Error::InvalidLeadTime { days: -1 })));

        let result = parse_config("[form]\ndefault_lead_time_days = 9223372036854775807\n");
        assert!(matches!(result, Err(Error::InvalidLeadTime { days: _ })));

        let config = parse_config("[form]\ndefault_lead_time_days = 3650\n").unwrap();
        assert_eq!(config.form.lead_time(), chrono::Duration::days(3650));
    }

    #[test]
    fn test_lead_time_is_clamped() {
        let settings = FormSettings {
            default_lead_time_days: i64::MAX,
            ..FormSettings::default()
        };
        assert_eq!(
            settings.lead_time(),
            chrono::Duration::days(i64::from(MAX_LEAD_TIME_DAYS))
        );
    }

    #[tokio::test]
    async fn test_seed_catalog_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SAMPLE)?;

        assert_eq!(seed_catalog(&db, &config).await?, (1, 1));
        assert_eq!(seed_catalog(&db, &config).await?, (0, 0));

        let products = catalog::get_products_for_supplier(&db, "Acme Foods").await?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].unit, "bag");
        Ok(())
    }

    #[tokio::test]
    async fn test_reseed_after_soft_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SAMPLE)?;
        seed_catalog(&db, &config).await?;

        let flour = catalog::get_product_by_sku(&db, "ACME-FL-25").await?.unwrap();
        catalog::delete_product(&db, flour.id).await?;
        let acme = catalog::get_supplier_by_name(&db, "Acme Foods").await?.unwrap();
        catalog::delete_supplier(&db, acme.id).await?;

        assert_eq!(seed_catalog(&db, &config).await?, (0, 0));
        assert!(catalog::get_all_active_products(&db).await?.is_empty());
        assert!(catalog::get_all_active_suppliers(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_skips_product_of_deleted_supplier() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SAMPLE)?;
        let acme = catalog::create_supplier(&db, config.suppliers[0].clone()).await?;
        catalog::delete_supplier(&db, acme.id).await?;

        assert_eq!(seed_catalog(&db, &config).await?, (0, 0));
        Ok(())
    }
}
