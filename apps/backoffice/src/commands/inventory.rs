//! Stock levels and reorder alerts.

use anyhow::{bail, Result};
use nubras_client::InventoryUpdate;
use nubras_core::{InventoryAlerts, InventoryItem, StatusBadge};

use super::operator_error;
use crate::cli::{InventoryCommands, InventoryListArgs, SetStockArgs};
use crate::context::Context;
use crate::output::{self, badge, print_json, Table};

pub async fn run(ctx: &Context, command: InventoryCommands) -> Result<()> {
    match command {
        InventoryCommands::List(args) => list(ctx, args).await,
        InventoryCommands::Show(args) => show(ctx, &args.id).await,
        InventoryCommands::SetStock(args) => set_stock(ctx, args).await,
    }
}

fn item_table<'a>(ctx: &Context, items: impl IntoIterator<Item = &'a InventoryItem>) -> Table {
    let mut table = Table::new(["Item", "SKU", "Stock", "Min", "Reorder", "Status", "Unit price", "Value"])
        .align_right(&[2, 3, 4, 6, 7]);
    for item in items {
        let mut status = badge(item.stock_status().badge());
        if item.needs_reorder() {
            status.push_str(" [Reorder]");
        }
        table.row([
            item.name.clone(),
            output::or_dash(item.sku.as_deref()).to_string(),
            item.stock.to_string(),
            item.min_stock.to_string(),
            item.reorder_point.to_string(),
            status,
            ctx.money(item.unit_price),
            ctx.money(item.stock_value()),
        ]);
    }
    table
}

async fn list(ctx: &Context, args: InventoryListArgs) -> Result<()> {
    let items = ctx.client.list_inventory().await.map_err(operator_error)?;

    if args.alerts {
        let alerts = InventoryAlerts::from_items(&items);
        if ctx.json {
            return print_json(&alerts);
        }
        if alerts.is_empty() {
            println!("No stock alerts.");
            return Ok(());
        }
        for (title, group) in [
            ("Out of stock", &alerts.out_of_stock),
            ("Low stock", &alerts.low_stock),
            ("At or below reorder point", &alerts.reorder),
        ] {
            if group.is_empty() {
                continue;
            }
            println!("{} ({})", title, group.len());
            print!("{}", item_table(ctx, group).render());
            println!();
        }
        return Ok(());
    }

    if ctx.json {
        return print_json(&items);
    }
    item_table(ctx, &items).print_or("No inventory items.");
    Ok(())
}

async fn show(ctx: &Context, id: &str) -> Result<()> {
    let item = ctx.client.get_inventory_item(id).await.map_err(operator_error)?;
    if ctx.json {
        return print_json(&item);
    }
    print!("{}", item_table(ctx, [&item]).render());
    println!();
    println!("Category:  {}", output::or_dash(item.category.as_deref()));
    println!("Unit:      {}", output::or_dash(item.unit.as_deref()));
    println!("Supplier:  {}", output::or_dash(item.supplier_id.as_deref()));
    Ok(())
}

async fn set_stock(ctx: &Context, args: SetStockArgs) -> Result<()> {
    let update = InventoryUpdate {
        stock: args.stock,
        min_stock: args.min_stock,
        reorder_point: args.reorder_point,
        unit_price: args.unit_price,
    };
    if update.is_empty() {
        bail!("Nothing to update: give a stock level or --min-stock, --reorder-point, --unit-price");
    }

    let item = ctx
        .client
        .update_inventory_item(&args.id, &update)
        .await
        .map_err(operator_error)?;

    if ctx.json {
        return print_json(&item);
    }
    println!(
        "{} now has {} in stock {}",
        item.name,
        item.stock,
        badge(item.stock_status().badge())
    );
    Ok(())
}
