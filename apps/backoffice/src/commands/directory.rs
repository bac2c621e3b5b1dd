//! Customer and staff listings.

use anyhow::Result;

use super::operator_error;
use crate::context::Context;
use crate::output::{or_dash, print_json, Table};

pub async fn customers(ctx: &Context) -> Result<()> {
    let customers = ctx.client.list_customers().await.map_err(operator_error)?;
    if ctx.json {
        return print_json(&customers);
    }

    let mut table = Table::new(["Name", "Phone", "Email", "Orders", "Spent"]).align_right(&[3, 4]);
    for c in &customers {
        table.row([
            c.name.clone(),
            or_dash(c.phone.as_deref()).to_string(),
            or_dash(c.email.as_deref()).to_string(),
            c.total_orders.to_string(),
            ctx.money(c.total_spent),
        ]);
    }
    table.print_or("No customers.");
    Ok(())
}

pub async fn staff(ctx: &Context) -> Result<()> {
    let staff = ctx.client.list_staff().await.map_err(operator_error)?;
    if ctx.json {
        return print_json(&staff);
    }

    let mut table = Table::new(["Name", "Role", "Phone", "Email", "Active"]);
    for s in &staff {
        table.row([
            s.name.clone(),
            or_dash(Some(s.role.as_str())).to_string(),
            or_dash(s.phone.as_deref()).to_string(),
            or_dash(s.email.as_deref()).to_string(),
            if s.active { "yes" } else { "no" }.to_string(),
        ]);
    }
    table.print_or("No staff.");
    Ok(())
}
