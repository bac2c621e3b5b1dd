//! # Sales Orders
//!
//! ```text
//! orders list      ──► GET /sales            + due flags, payment badges
//! orders show      ──► GET /sales/:id        + amount consistency checks
//! orders overview  ──► GET /sales/overview   + summary of GET /sales
//! orders invoice   ──► GET /sales/:id        → invoice HTML → browser
//! orders pay       ──► GET /sales/:id        → guard → POST /transactions
//! ```

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use nubras_core::order::Discrepancy;
use nubras_core::{invoice, SalesOrder, SalesSummary, StatusBadge};
use serde_json::json;
use tracing::info;

use super::operator_error;
use crate::cli::{OrdersCommands, OrdersListArgs, PayArgs, PrintArgs};
use crate::context::Context;
use crate::output::{self, badge, badges, print_json, Table};
use crate::print;

pub async fn run(ctx: &Context, command: OrdersCommands) -> Result<()> {
    match command {
        OrdersCommands::List(args) => list(ctx, args).await,
        OrdersCommands::Show(args) => show(ctx, &args.id).await,
        OrdersCommands::Overview => overview(ctx).await,
        OrdersCommands::Invoice(args) => print_invoice(ctx, args).await,
        OrdersCommands::Pay(args) => pay(ctx, args).await,
    }
}

/// Applies the list filters (all given filters must match), most urgent
/// first, then earliest due date. Orders without a due date sort last.
fn select<'a>(
    orders: &'a [SalesOrder],
    filter: &OrdersListArgs,
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<&'a SalesOrder> {
    let mut selected: Vec<&SalesOrder> = orders
        .iter()
        .filter(|o| filter.status.map_or(true, |s| o.status == s))
        .filter(|o| !filter.overdue || o.is_overdue(now))
        .filter(|o| !filter.due_soon || o.is_due_soon_within(now, window))
        .collect();
    selected.sort_by_key(|o| (o.priority.rank(), o.due_date.is_none(), o.due_date));
    selected
}

async fn list(ctx: &Context, args: OrdersListArgs) -> Result<()> {
    let orders = ctx.client.list_sales_orders().await.map_err(operator_error)?;
    let window = ctx.config.due_soon_window();
    let selected = select(&orders, &args, ctx.now, window);

    if ctx.json {
        return print_json(&selected);
    }

    let mut table = Table::new([
        "Order", "Customer", "Status", "Priority", "Payment", "Total", "Pending", "Due", "Flags",
    ])
    .align_right(&[5, 6]);

    for order in selected {
        table.row([
            order.display_number().to_string(),
            order.customer.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| "-".into()),
            badge(order.status.badge()),
            badge(order.priority.badge()),
            badge(order.payment_status.badge()),
            ctx.money(order.total_amount),
            ctx.money(order.amount_pending),
            output::date(order.due_date),
            badges(&order.due_flags(ctx.now, window)),
        ]);
    }
    table.print_or("No sales orders match.");
    Ok(())
}

pub(crate) fn describe_discrepancy(d: &Discrepancy, currency: &str) -> String {
    match d {
        Discrepancy::Total { stored, expected } => format!(
            "total is {} but subtotal + VAT - discount is {}",
            output::money(*stored, currency),
            output::money(*expected, currency)
        ),
        Discrepancy::Pending { stored, expected } => format!(
            "pending is {} but total - paid is {}",
            output::money(*stored, currency),
            output::money(*expected, currency)
        ),
        Discrepancy::NegativePending { stored } => {
            format!("pending is negative ({}), order is overpaid", output::money(*stored, currency))
        }
    }
}

async fn show(ctx: &Context, id: &str) -> Result<()> {
    let order = ctx.client.get_sales_order(id).await.map_err(operator_error)?;
    let discrepancies = order.discrepancies();

    if ctx.json {
        let notes: Vec<String> = discrepancies
            .iter()
            .map(|d| describe_discrepancy(d, ctx.currency()))
            .collect();
        return print_json(&json!({ "order": order, "discrepancies": notes }));
    }

    let window = ctx.config.due_soon_window();
    println!(
        "{}  {} {} {}",
        order.display_number(),
        badge(order.status.badge()),
        badge(order.priority.badge()),
        badges(&order.due_flags(ctx.now, window))
    );
    if let Some(customer) = &order.customer {
        println!("Customer:  {} ({})", customer.name, output::or_dash(customer.phone.as_deref()));
    }
    println!("Due:       {}", output::date(order.due_date));
    println!("Delivery:  {}", output::date(order.delivery_date));
    println!();

    let mut items = Table::new(["Item", "Qty", "Price", "Total"]).align_right(&[1, 2, 3]);
    for item in &order.items {
        let name = match &item.measurements {
            Some(m) if !m.trim().is_empty() => format!("{} ({})", item.name, m),
            _ => item.name.clone(),
        };
        items.row([
            name,
            item.quantity.to_string(),
            ctx.money(item.price),
            ctx.money(item.line_total()),
        ]);
    }
    items.print_or("No items.");
    println!();

    println!("Subtotal:  {}", ctx.money(order.subtotal));
    if !order.discount_amount.is_zero() {
        println!("Discount:  {}", ctx.money(-order.discount_amount));
    }
    println!("VAT:       {}", ctx.money(order.tax_amount));
    println!("Total:     {}", ctx.money(order.total_amount));
    println!("Paid:      {}", ctx.money(order.amount_paid));
    println!(
        "Pending:   {}  {}",
        ctx.money(order.amount_pending),
        badge(order.payment_status.badge())
    );

    if let Some(notes) = order.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        println!("Notes:     {}", notes);
    }

    for d in &discrepancies {
        println!("warning: {}", describe_discrepancy(d, ctx.currency()));
    }
    Ok(())
}

async fn overview(ctx: &Context) -> Result<()> {
    let server = ctx.client.sales_overview().await.map_err(operator_error)?;
    let orders = ctx.client.list_sales_orders().await.map_err(operator_error)?;
    let summary = SalesSummary::from_orders(&orders, ctx.now, ctx.config.due_soon_window());

    if ctx.json {
        return print_json(&json!({ "server": server, "summary": summary }));
    }

    println!("Dashboard (server)");
    println!("  Orders:     {}", server.total_orders);
    println!("  Revenue:    {}", ctx.money(server.total_revenue));
    println!("  Pending:    {}", ctx.money(server.pending_amount));
    println!("  Completed:  {}", server.completed_orders);
    println!("  Open:       {}", server.pending_orders);
    println!("  Overdue:    {}", server.overdue_orders);
    println!();

    println!("Summary of {} orders", summary.orders);
    let mut by_status = Table::new(["Status", "Orders"]).align_right(&[1]);
    for status in nubras_core::OrderStatus::ALL {
        by_status.row([badge(status.badge()), summary.by_status.get(status).to_string()]);
    }
    if summary.by_status.unknown > 0 {
        by_status.row([badge(nubras_core::Badge::UNKNOWN), summary.by_status.unknown.to_string()]);
    }
    print!("{}", by_status.render());
    println!("  Revenue:      {}", ctx.money(summary.revenue));
    println!("  Collected:    {}", ctx.money(summary.collected));
    println!("  Outstanding:  {}", ctx.money(summary.outstanding));
    println!("  Overdue:      {}", summary.overdue);
    println!("  Due soon:     {}", summary.due_soon);
    Ok(())
}

async fn print_invoice(ctx: &Context, args: PrintArgs) -> Result<()> {
    let order = ctx.client.get_sales_order(&args.id).await.map_err(operator_error)?;

    for d in order.discrepancies() {
        tracing::warn!(order = %order.display_number(), "{}", describe_discrepancy(&d, ctx.currency()));
    }

    let mut options = ctx.config.render_options();
    options.auto_print &= !args.no_print;
    let html = invoice::render_order_invoice(&order, &ctx.config.business, &options);

    print::deliver(args.out.as_deref(), !args.no_open, "invoice", order.display_number(), &html)?;
    Ok(())
}

async fn pay(ctx: &Context, args: PayArgs) -> Result<()> {
    let receipt = ctx
        .client
        .pay_order(&args.id, args.method, args.amount)
        .await
        .map_err(operator_error)?;
    info!(order_id = %args.id, "Payment submitted");

    if ctx.json {
        return print_json(&receipt);
    }
    println!(
        "Recorded {} payment of {} against {}",
        args.method.label(),
        ctx.money(args.amount),
        args.id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nubras_core::{Money, OrderStatus};

    fn order(id: &str, status: &str, due: &str) -> SalesOrder {
        serde_json::from_value(json!({
            "id": id,
            "status": status,
            "dueDate": due,
            "totalAmount": 100,
            "amountPending": 100
        }))
        .unwrap()
    }

    fn filter(status: Option<OrderStatus>, overdue: bool, due_soon: bool) -> OrdersListArgs {
        OrdersListArgs { status, overdue, due_soon }
    }

    #[test]
    fn test_select_filters_combine() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let window = Duration::days(3);
        let orders = vec![
            order("late", "confirmed", "2024-05-18T00:00:00Z"),
            order("soon", "processing", "2024-05-22T00:00:00Z"),
            order("done", "completed", "2024-05-10T00:00:00Z"),
            order("later", "draft", "2024-06-30T00:00:00Z"),
        ];

        let ids = |v: Vec<&SalesOrder>| v.iter().map(|o| o.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(select(&orders, &filter(None, false, false), now, window)).len(), 4);
        assert_eq!(ids(select(&orders, &filter(None, true, false), now, window)), vec!["late"]);
        assert_eq!(ids(select(&orders, &filter(None, false, true), now, window)), vec!["soon"]);
        assert_eq!(
            ids(select(&orders, &filter(Some(OrderStatus::Draft), false, false), now, window)),
            vec!["later"]
        );
        assert!(select(&orders, &filter(Some(OrderStatus::Completed), true, false), now, window).is_empty());
    }

    #[test]
    fn test_select_sorts_by_priority_then_due_date() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let mut urgent = order("urgent", "confirmed", "2024-06-10T00:00:00Z");
        urgent.priority = nubras_core::Priority::Urgent;
        let mut undated = order("undated", "confirmed", "2024-05-01T00:00:00Z");
        undated.due_date = None;
        let orders = vec![
            undated,
            order("june", "confirmed", "2024-06-01T00:00:00Z"),
            order("may", "confirmed", "2024-05-25T00:00:00Z"),
            urgent,
        ];

        let ids: Vec<_> = select(&orders, &filter(None, false, false), now, Duration::days(3))
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["urgent", "may", "june", "undated"]);
    }

    #[test]
    fn test_describe_discrepancy() {
        let d = Discrepancy::Pending {
            stored: Money::from_major(900),
            expected: Money::from_major(850),
        };
        assert_eq!(
            describe_discrepancy(&d, "AED"),
            "pending is AED 900.00 but total - paid is AED 850.00"
        );
    }
}
