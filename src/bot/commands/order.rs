//! Order form Discord commands - `/order` and its subcommands.
//!
//! Each subcommand is one user action on the caller's open order form. The form
//! lives in the bot's session registry between commands and is discarded when the
//! order is submitted or cancelled.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            form::{FormAction, OrderForm},
            purchase_order, report,
        },
        errors::{Error, Result},
    };
    use rust_decimal::Decimal;
    use std::fmt::Write;
    use tracing::info;

    const NO_FORM: &str = "❌ You have no open order. Start one with `/order open`.";

    /// Applies `actions` to the caller's form and replies with the updated summary.
    ///
    /// Form errors are the user's to fix, so they are reported inline instead of
    /// failing the command.
    async fn apply_and_show(
        ctx: poise::Context<'_, BotData, Error>,
        actions: Vec<FormAction>,
        note: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let Some(outcome) = data.sessions.apply(&user_id, actions).await else {
            ctx.say(NO_FORM).await?;
            return Ok(());
        };

        let summary = data
            .sessions
            .with_form(&user_id, report::draft_summary)
            .await
            .unwrap_or_default();

        let mut message = String::new();
        if let Err(e) = outcome {
            let _ = writeln!(message, "❌ {e}");
        }
        if let Some(note) = note {
            let _ = writeln!(message, "{note}");
        }
        message.push_str(&summary);

        ctx.say(message).await?;
        Ok(())
    }

    /// Parent command for building a purchase order step by step.
    #[poise::command(
        slash_command,
        subcommands(
            "order_open",
            "order_supplier",
            "order_item",
            "order_remove",
            "order_details",
            "order_show",
            "order_submit",
            "order_cancel"
        )
    )]
    pub async fn order(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Purchase order commands:\n\
            `/order open` - Start a new order\n\
            `/order supplier` - Choose the supplier\n\
            `/order item` - Add an item from the supplier's catalog\n\
            `/order remove` - Remove an item by position\n\
            `/order details` - Set delivery address, payment method and notes\n\
            `/order show` - Show the current order\n\
            `/order submit` - Submit the order\n\
            `/order cancel` - Discard the order";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Starts a new purchase order, discarding any unsubmitted one.
    #[poise::command(slash_command, rename = "open")]
    pub async fn order_open(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let last_order_number = purchase_order::get_last_order_number(&data.database).await?;
        let form = OrderForm::open(
            &data.database,
            last_order_number.as_deref(),
            data.settings.lead_time(),
        )
        .await;

        let suppliers = form.catalog().suppliers.len();
        let products = form.catalog().products.len();
        let summary = report::draft_summary(&form);
        data.sessions.open(&user_id, form).await;
        info!("User {user_id} opened an order form");

        ctx.say(format!(
            "📝 New order started ({suppliers} suppliers, {products} products available). \
             Pick a supplier with `/order supplier`.\n{summary}"
        ))
        .await?;
        Ok(())
    }

    /// Chooses the supplier. Changing supplier drops any product being staged.
    #[poise::command(slash_command, rename = "supplier")]
    pub async fn order_supplier(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Supplier to order from"]
        #[autocomplete = "autocomplete::autocomplete_supplier_name"]
        name: String,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();

        let Some(known) = ctx
            .data()
            .sessions
            .with_form(&user_id, |form| form.catalog().supplier_named(&name).is_some())
            .await
        else {
            ctx.say(NO_FORM).await?;
            return Ok(());
        };

        let (action, note) = if known {
            (FormAction::SelectSupplier(name), None)
        } else {
            let note = format!(
                "⚠️ '{name}' is not in the supplier catalog, so no products can be added."
            );
            (FormAction::TypeSupplier(name), Some(note))
        };

        apply_and_show(ctx, vec![action], note).await
    }

    /// Adds an item from the selected supplier's catalog.
    ///
    /// The unit price defaults to the catalog price.
    #[poise::command(slash_command, rename = "item")]
    pub async fn order_item(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to add"]
        #[autocomplete = "autocomplete::autocomplete_order_product"]
        product: String,
        #[description = "Quantity (defaults to 1)"]
        #[min = 1]
        quantity: Option<u32>,
        #[description = "Unit price, if different from the catalog price"] price: Option<f64>,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();

        let price = match price.map(Decimal::try_from).transpose() {
            Ok(price) => price.map(|p| p.round_dp(4)),
            Err(_) => {
                ctx.say("❌ Invalid price: must be a valid number").await?;
                return Ok(());
            }
        };

        let product_lower = product.trim().to_lowercase();
        let Some(found) = ctx
            .data()
            .sessions
            .with_form(&user_id, |form| {
                form.search_products("")
                    .into_iter()
                    .find(|p| p.name.to_lowercase() == product_lower)
                    .map(|p| p.id)
            })
            .await
        else {
            ctx.say(NO_FORM).await?;
            return Ok(());
        };

        let Some(product_id) = found else {
            ctx.say(format!(
                "❌ '{product}' is not sold by the selected supplier. Choose a supplier first with `/order supplier`.",
            ))
            .await?;
            return Ok(());
        };

        let mut actions = vec![
            FormAction::TypeProductSearch(product),
            FormAction::SelectProduct(product_id),
            FormAction::SetQuantity(quantity.unwrap_or(1)),
        ];
        if let Some(price) = price {
            actions.push(FormAction::SetPrice(price));
        }
        actions.push(FormAction::AddItem);

        apply_and_show(ctx, actions, None).await
    }

    /// Removes an item by its position in the order (1 = first).
    #[poise::command(slash_command, rename = "remove")]
    pub async fn order_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Position of the item, as shown by /order show"]
        #[min = 1]
        position: u32,
    ) -> Result<()> {
        let Some(index) = position
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
        else {
            ctx.say("❌ Positions start at 1.").await?;
            return Ok(());
        };

        apply_and_show(ctx, vec![FormAction::RemoveItem(index)], None).await
    }

    /// Sets delivery address, payment method, notes and delivery time.
    #[poise::command(slash_command, rename = "details")]
    pub async fn order_details(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Delivery address"] address: Option<String>,
        #[description = "Payment method"]
        #[autocomplete = "autocomplete::autocomplete_payment_method"]
        payment: Option<String>,
        #[description = "Notes for the supplier"] notes: Option<String>,
        #[description = "Days until delivery, counted from when the order was started"]
        #[max = 3650]
        delivery_days: Option<u32>,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();

        let Some(delivery) = ctx
            .data()
            .sessions
            .with_form(&user_id, |form| {
                delivery_days
                    .map(|days| form.draft().delivery_after_days(days))
                    .transpose()
            })
            .await
        else {
            ctx.say(NO_FORM).await?;
            return Ok(());
        };

        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let mut actions = Vec::new();
        if let Some(address) = address {
            actions.push(FormAction::SetDeliveryAddress(address));
        }
        if let Some(payment) = payment {
            actions.push(FormAction::SetPaymentMethod(payment));
        }
        if let Some(notes) = notes {
            actions.push(FormAction::SetNotes(notes));
        }
        if let Some(at) = delivery {
            actions.push(FormAction::SetEstimatedDelivery(at));
        }

        apply_and_show(ctx, actions, None).await
    }

    /// Shows the order being built.
    #[poise::command(slash_command, rename = "show")]
    pub async fn order_show(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user_id = ctx.author().id.to_string();

        match ctx
            .data()
            .sessions
            .with_form(&user_id, report::draft_summary)
            .await
        {
            Some(summary) => ctx.say(summary).await?,
            None => ctx.say(NO_FORM).await?,
        };
        Ok(())
    }

    /// Validates and submits the order.
    #[poise::command(slash_command, rename = "submit")]
    pub async fn order_submit(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        match data.sessions.submit(&user_id, &data.database).await {
            None => {
                ctx.say(NO_FORM).await?;
            }
            Some(Ok(saved)) => {
                ctx.say(format!(
                    "✅ Order **{}** submitted to {} for **{}**.",
                    saved.order_number,
                    saved.supplier,
                    report::format_money(saved.total)
                ))
                .await?;
            }
            Some(Err(Error::Validation(validation))) => {
                let mut message = String::from("⚠️ The order is not ready yet:\n");
                for issue in validation.issues() {
                    let _ = writeln!(message, "• **{}**: {}", issue.field, issue.message);
                }
                ctx.say(message).await?;
            }
            Some(Err(e)) => {
                ctx.say("❌ Failed to save the order. Your draft is still open; please try again.")
                    .await?;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Discards the order without saving.
    #[poise::command(slash_command, rename = "cancel")]
    pub async fn order_cancel(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user_id = ctx.author().id.to_string();

        match ctx.data().sessions.close(&user_id).await {
            Some(form) => {
                ctx.say(format!(
                    "🗑️ Discarded draft {}.",
                    form.draft().order_number()
                ))
                .await?;
            }
            None => {
                ctx.say(NO_FORM).await?;
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
