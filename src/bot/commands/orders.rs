//! Saved order commands - `/orders list`, `/orders show` and `/orders status`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{draft::OrderStatus, purchase_order, report},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const DEFAULT_LIST_LIMIT: u32 = 10;

    /// Parent command for submitted orders.
    #[poise::command(
        slash_command,
        subcommands("orders_list", "orders_show", "orders_status")
    )]
    pub async fn orders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Saved order commands:\n\
            `/orders list` - List recent orders\n\
            `/orders show` - Show one order with its items\n\
            `/orders status` - Move an order to a new status";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists the most recent orders.
    #[poise::command(slash_command, rename = "list")]
    pub async fn orders_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "How many orders to show (defaults to 10)"]
        #[min = 1]
        #[max = 50]
        limit: Option<u32>,
    ) -> Result<()> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let orders =
            purchase_order::list_recent_orders(&ctx.data().database, u64::from(limit)).await?;

        if orders.is_empty() {
            ctx.say("No orders have been submitted yet.").await?;
            return Ok(());
        }

        let mut message = String::from("**Recent Orders**\n");
        for order in &orders {
            let _ = writeln!(
                message,
                "• **{}** {} · {} · {} · {}",
                order.order_number,
                order.supplier,
                report::format_money(order.total),
                order.status,
                order.created_at.format("%Y-%m-%d")
            );
        }

        ctx.say(message).await?;
        Ok(())
    }

    /// Shows a submitted order with its items and status history.
    #[poise::command(slash_command, rename = "show")]
    pub async fn orders_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order number, e.g. ORD-001"] number: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(order) = purchase_order::get_order_by_number(db, &number).await? else {
            ctx.say(format!("❌ Order '{number}' not found.")).await?;
            return Ok(());
        };

        let items = purchase_order::get_order_items(db, order.id).await?;
        let history = purchase_order::get_status_history(db, order.id).await?;

        let mut message = report::order_summary(&order, &items);
        if !history.is_empty() {
            message.push_str("\nHistory:\n");
            for entry in &history {
                let _ = writeln!(
                    message,
                    "• {} at {}",
                    entry.status,
                    entry.changed_at.format("%Y-%m-%d %H:%M")
                );
            }
        }

        ctx.say(message).await?;
        Ok(())
    }

    /// Moves a submitted order to a new status.
    #[poise::command(slash_command, rename = "status")]
    pub async fn orders_status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order number, e.g. ORD-001"] number: String,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_order_status"]
        status: String,
    ) -> Result<()> {
        let status: OrderStatus = match status.parse() {
            Ok(status) => status,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        match purchase_order::update_order_status(&ctx.data().database, &number, status).await {
            Ok(order) => {
                ctx.say(format!(
                    "✅ Order **{}** is now **{}**.",
                    order.order_number, order.status
                ))
                .await?;
            }
            Err(e @ (Error::OrderNotFound { .. } | Error::InvalidStatusTransition { .. })) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
