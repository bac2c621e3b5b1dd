//! Return requests: review and rejection.

use anyhow::Result;
use nubras_core::{ReturnRequest, StatusBadge};

use super::operator_error;
use crate::cli::{RejectArgs, ReturnsCommands};
use crate::context::Context;
use crate::output::{self, badge, print_json, Table};

pub async fn run(ctx: &Context, command: ReturnsCommands) -> Result<()> {
    match command {
        ReturnsCommands::List => list(ctx).await,
        ReturnsCommands::Show(args) => show(ctx, &args.id).await,
        ReturnsCommands::Reject(args) => reject(ctx, args).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let returns = ctx.client.list_returns().await.map_err(operator_error)?;

    if ctx.json {
        return print_json(&returns);
    }

    let mut table = Table::new(["Return", "Order", "Status", "Items", "Refund", "Created"])
        .align_right(&[3, 4]);
    for r in &returns {
        table.row([
            r.display_number().to_string(),
            output::or_dash(r.order_id.as_deref()).to_string(),
            badge(r.status.badge()),
            r.items.len().to_string(),
            ctx.money(r.total_refund_amount()),
            output::date(r.created_at),
        ]);
    }
    table.print_or("No return requests.");
    Ok(())
}

fn print_detail(ctx: &Context, r: &ReturnRequest) {
    println!("{}  {}", r.display_number(), badge(r.status.badge()));
    println!("Order:   {}", output::or_dash(r.order_id.as_deref()));
    println!("Reason:  {}", output::or_dash(r.reason.as_deref()));
    if let Some(rejection) = r.rejection_reason.as_deref() {
        println!("Rejected because: {}", rejection);
    }
    println!();

    let mut items = Table::new(["Item", "Qty", "Condition", "Type", "Original", "Refund"])
        .align_right(&[1, 4, 5]);
    for item in &r.items {
        items.row([
            item.name.clone(),
            item.quantity.to_string(),
            badge(item.condition.badge()),
            badge(item.return_type.badge()),
            ctx.money(item.original_total),
            ctx.money(item.refund_amount),
        ]);
    }
    items.print_or("No items.");
    println!();
    println!("Original:  {}", ctx.money(r.total_original_amount()));
    println!("Refund:    {}", ctx.money(r.total_refund_amount()));

    if let Err(e) = r.check_refunds() {
        println!("warning: {}", e);
    }
}

async fn show(ctx: &Context, id: &str) -> Result<()> {
    let r = ctx.client.get_return(id).await.map_err(operator_error)?;
    if ctx.json {
        return print_json(&r);
    }
    print_detail(ctx, &r);
    Ok(())
}

async fn reject(ctx: &Context, args: RejectArgs) -> Result<()> {
    let r = ctx
        .client
        .reject_return(&args.id, &args.reason)
        .await
        .map_err(operator_error)?;

    if ctx.json {
        return print_json(&r);
    }
    println!("Return {} rejected.", r.display_number());
    Ok(())
}
