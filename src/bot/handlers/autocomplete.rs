//! Autocomplete handlers for Discord slash command parameters.
//!
//! The supplier and product handlers are the order form's pickers: they filter the
//! catalog snapshot held by the user's open form, so suggestions always match what
//! the form will accept. Outside a form they fall back to the live catalog.

use crate::{
    bot::BotData,
    core::{catalog, draft::OrderStatus, search},
    errors::Error,
};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Suggests supplier names containing the typed text.
pub async fn autocomplete_supplier_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let data = ctx.data();
    let user_id = ctx.author().id.to_string();

    let from_form = data
        .sessions
        .with_form(&user_id, |form| {
            search::filter_suppliers(&form.catalog().suppliers, partial)
                .into_iter()
                .map(|s| s.name.clone())
                .take(MAX_SUGGESTIONS)
                .collect::<Vec<_>>()
        })
        .await;
    if let Some(names) = from_form {
        return names;
    }

    let Ok(suppliers) = catalog::get_all_active_suppliers(&data.database).await else {
        return Vec::new();
    };
    search::filter_suppliers(&suppliers, partial)
        .into_iter()
        .map(|s| s.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests products of the form's current supplier whose name contains the typed text.
///
/// Returns nothing when no form is open or no supplier is selected.
pub async fn autocomplete_order_product(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let user_id = ctx.author().id.to_string();

    ctx.data()
        .sessions
        .with_form(&user_id, |form| {
            form.search_products(partial)
                .into_iter()
                .map(|p| p.name.clone())
                .take(MAX_SUGGESTIONS)
                .collect()
        })
        .await
        .unwrap_or_default()
}

/// Suggests configured payment methods containing the typed text.
pub async fn autocomplete_payment_method(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_payment_methods(&ctx.data().settings.payment_methods, partial)
}

fn matching_payment_methods(methods: &[String], partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    methods
        .iter()
        .filter(|method| method.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// Suggests SKUs of active products whose SKU or name contains the typed text.
pub async fn autocomplete_product_sku(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(products) = catalog::get_all_active_products(&ctx.data().database).await else {
        return Vec::new();
    };
    let partial_lower = partial.to_lowercase();

    products
        .into_iter()
        .filter(|p| {
            p.sku.to_lowercase().contains(&partial_lower)
                || p.name.to_lowercase().contains(&partial_lower)
        })
        .map(|p| p.sku)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests order statuses starting with the typed text.
pub async fn autocomplete_order_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    OrderStatus::ALL
        .iter()
        .map(|status| status.as_str())
        .filter(|status| status.starts_with(&partial_lower))
        .map(str::to_string)
        .collect()
}
