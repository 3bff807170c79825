//! Catalog browsing commands - `/catalog suppliers` and `/catalog products`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{catalog, report},
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tracing::info;

    /// Parent command for browsing the catalog.
    #[poise::command(
        slash_command,
        subcommands(
            "catalog_suppliers",
            "catalog_products",
            "catalog_delete_supplier",
            "catalog_delete_product"
        )
    )]
    pub async fn catalog(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Catalog commands:\n\
            `/catalog suppliers` - List suppliers\n\
            `/catalog products` - List products\n\
            `/catalog delete_supplier` - Remove a supplier\n\
            `/catalog delete_product` - Remove a product";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists all suppliers.
    #[poise::command(slash_command, rename = "suppliers")]
    pub async fn catalog_suppliers(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let suppliers = catalog::get_all_active_suppliers(&ctx.data().database).await?;

        if suppliers.is_empty() {
            ctx.say("No suppliers found. Add some to the config file.")
                .await?;
            return Ok(());
        }

        let mut message = String::from("**Suppliers**\n");
        for supplier in &suppliers {
            let _ = write!(message, "• **{}** - {}", supplier.name, supplier.supplies);
            if let Some(email) = &supplier.email {
                let _ = write!(message, " ({email})");
            }
            message.push('\n');
        }

        ctx.say(message).await?;
        Ok(())
    }

    /// Lists products, optionally only those of one supplier.
    #[poise::command(slash_command, rename = "products")]
    pub async fn catalog_products(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this supplier's products"]
        #[autocomplete = "autocomplete::autocomplete_supplier_name"]
        supplier: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let products = match &supplier {
            Some(name) => catalog::get_products_for_supplier(db, name).await?,
            None => catalog::get_all_active_products(db).await?,
        };

        if products.is_empty() {
            let reply = match supplier {
                Some(name) => format!("No products found for '{name}'."),
                None => "No products found.".to_string(),
            };
            ctx.say(reply).await?;
            return Ok(());
        }

        let mut message = String::from("**Products**\n");
        for product in &products {
            let _ = writeln!(
                message,
                "• **{}** ({}) - {} per {} · {} in stock · {}",
                product.name,
                product.sku,
                report::format_money(product.price),
                product.unit,
                product.stock,
                product.supplier
            );
        }

        ctx.say(message).await?;
        Ok(())
    }

    /// Removes a supplier from the pickers. Saved orders are not affected.
    #[poise::command(slash_command, rename = "delete_supplier")]
    pub async fn catalog_delete_supplier(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Supplier to remove"]
        #[autocomplete = "autocomplete::autocomplete_supplier_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(supplier) = catalog::get_supplier_by_name(db, &name).await? else {
            ctx.say(format!("❌ Supplier '{name}' not found.")).await?;
            return Ok(());
        };

        let deleted = catalog::delete_supplier(db, supplier.id).await?;
        info!("Deleted supplier '{}'", deleted.name);
        ctx.say(format!("🗑️ Removed supplier **{}**.", deleted.name))
            .await?;
        Ok(())
    }

    /// Removes a product from the pickers. Saved orders are not affected.
    #[poise::command(slash_command, rename = "delete_product")]
    pub async fn catalog_delete_product(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "SKU of the product to remove"]
        #[autocomplete = "autocomplete::autocomplete_product_sku"]
        sku: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(product) = catalog::get_product_by_sku(db, &sku).await? else {
            ctx.say(format!("❌ No product with SKU '{sku}'.")).await?;
            return Ok(());
        };

        let deleted = catalog::delete_product(db, product.id).await?;
        info!("Deleted product {} ({})", deleted.name, deleted.sku);
        ctx.say(format!(
            "🗑️ Removed product **{}** ({}).",
            deleted.name, deleted.sku
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
