//! Quotation listing and printing.

use anyhow::Result;
use nubras_core::{invoice, Quotation};
use serde_json::json;

use super::operator_error;
use crate::cli::{PrintArgs, QuotationsCommands};
use crate::context::Context;
use crate::output::{self, badges, print_json, Table};
use crate::print;

pub async fn run(ctx: &Context, command: QuotationsCommands) -> Result<()> {
    match command {
        QuotationsCommands::List => list(ctx).await,
        QuotationsCommands::Print(args) => print_quotation(ctx, args).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let quotations = ctx.client.list_quotations().await.map_err(operator_error)?;

    if ctx.json {
        let rows: Vec<_> = quotations
            .iter()
            .map(|q| json!({ "quotation": q, "expired": q.is_past_validity(ctx.now) }))
            .collect();
        return print_json(&rows);
    }

    let mut table = Table::new(["Quotation", "Customer", "Status", "Valid until", "Total", "Sale"])
        .align_right(&[4]);
    for q in &quotations {
        table.row(row(q, ctx));
    }
    table.print_or("No quotations.");
    Ok(())
}

fn row(q: &Quotation, ctx: &Context) -> [String; 6] {
    [
        q.display_number().to_string(),
        q.customer.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| "-".into()),
        badges(&q.display_badges(ctx.now)),
        output::date(q.valid_until),
        ctx.money(q.total),
        output::or_dash(q.converted_to_sale.as_deref()).to_string(),
    ]
}

async fn print_quotation(ctx: &Context, args: PrintArgs) -> Result<()> {
    let quotation = ctx.client.get_quotation(&args.id).await.map_err(operator_error)?;

    let recomputed = quotation.recomputed_totals(ctx.config.tax_rate());
    if recomputed.total != quotation.total {
        tracing::warn!(
            quotation = %quotation.display_number(),
            stored = %quotation.total,
            recomputed = %recomputed.total,
            "Quotation total differs from its line items"
        );
    }

    let mut options = ctx.config.render_options();
    options.auto_print &= !args.no_print;
    let html = invoice::render_quotation(&quotation, &ctx.config.business, &options, ctx.now);

    print::deliver(
        args.out.as_deref(),
        !args.no_open,
        "quotation",
        quotation.display_number(),
        &html,
    )?;
    Ok(())
}
