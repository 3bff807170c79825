//! General Discord commands - ping and help.
//! These commands don't touch the database or the order forms.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**SupplyBuddy Help**\n\
        Build purchase orders for your suppliers one step at a time.\n\n\
        **Order Form**\n\
        • `/order open` - Starts a new order with the next order number.\n\
        • `/order supplier <name>` - Chooses the supplier. Changing it clears the staged product.\n\
        • `/order item <product> [quantity] [price]` - Adds a product from the supplier's catalog.\n\
        • `/order remove <position>` - Removes an item from the order.\n\
        • `/order details [address] [payment] [notes] [delivery_days]` - Sets the delivery details.\n\
        • `/order show` - Shows the order so far.\n\
        • `/order submit` - Checks and submits the order.\n\
        • `/order cancel` - Discards the order.\n\n\
        **Saved Orders**\n\
        • `/orders list [limit]` - Lists recent orders.\n\
        • `/orders show <number>` - Shows an order with its items.\n\
        • `/orders status <number> <status>` - Moves an order to a new status.\n\n\
        **Catalog**\n\
        • `/catalog suppliers` - Lists suppliers.\n\
        • `/catalog products [supplier]` - Lists products, optionally for one supplier.\n\
        • `/catalog delete_supplier <name>` - Removes a supplier.\n\
        • `/catalog delete_product <sku>` - Removes a product.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
