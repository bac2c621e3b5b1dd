//! Supplier directory.

use anyhow::Result;
use nubras_client::NewSupplier;

use super::operator_error;
use crate::cli::{AddSupplierArgs, SuppliersCommands};
use crate::context::Context;
use crate::output::{or_dash, print_json, Table};

pub async fn run(ctx: &Context, command: SuppliersCommands) -> Result<()> {
    match command {
        SuppliersCommands::List => list(ctx).await,
        SuppliersCommands::Add(args) => add(ctx, args).await,
        SuppliersCommands::Remove(args) => remove(ctx, &args.id).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let suppliers = ctx.client.list_suppliers().await.map_err(operator_error)?;
    if ctx.json {
        return print_json(&suppliers);
    }

    let mut table = Table::new(["Id", "Name", "Contact", "Phone", "Email", "Restocks"]).align_right(&[5]);
    for s in &suppliers {
        table.row([
            s.id.clone(),
            s.name.clone(),
            or_dash(s.contact_person.as_deref()).to_string(),
            or_dash(s.phone.as_deref()).to_string(),
            or_dash(s.email.as_deref()).to_string(),
            s.restock_count.to_string(),
        ]);
    }
    table.print_or("No suppliers.");
    Ok(())
}

async fn add(ctx: &Context, args: AddSupplierArgs) -> Result<()> {
    let request = NewSupplier {
        name: args.name,
        contact_person: args.contact,
        phone: args.phone,
        email: args.email,
        address: args.address,
    };
    let supplier = ctx.client.create_supplier(&request).await.map_err(operator_error)?;

    if ctx.json {
        return print_json(&supplier);
    }
    println!("Added supplier {} ({})", supplier.name, supplier.id);
    Ok(())
}

async fn remove(ctx: &Context, id: &str) -> Result<()> {
    ctx.client.delete_supplier(id).await.map_err(operator_error)?;
    if ctx.json {
        return print_json(&serde_json::json!({ "deleted": id }));
    }
    println!("Deleted supplier {}", id);
    Ok(())
}
