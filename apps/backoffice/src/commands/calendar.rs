//! Fittings, deliveries and appointments.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use nubras_client::NewCalendarEvent;
use nubras_core::CalendarEvent;

use super::operator_error;
use crate::cli::{AddEventArgs, CalendarCommands, CalendarListArgs};
use crate::context::Context;
use crate::output::{self, or_dash, print_json, Table};

pub async fn run(ctx: &Context, command: CalendarCommands) -> Result<()> {
    match command {
        CalendarCommands::List(args) => list(ctx, args).await,
        CalendarCommands::Add(args) => add(ctx, args).await,
    }
}

/// Events in the window (or all of them), in start order.
fn in_window(
    mut events: Vec<CalendarEvent>,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Vec<CalendarEvent> {
    if let Some((from, to)) = window {
        events.retain(|e| e.falls_within(from, to));
    }
    events.sort_by_key(|e| e.start);
    events
}

/// `from + days`; negative lengths count as zero. A window reaching past
/// the last representable instant is open-ended.
fn window_end(from: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days.max(0))
        .and_then(|length| from.checked_add_signed(length))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

async fn list(ctx: &Context, args: CalendarListArgs) -> Result<()> {
    let events = ctx.client.list_calendar_events().await.map_err(operator_error)?;

    let window = if args.all {
        None
    } else {
        let from = args.from.unwrap_or(ctx.now);
        Some((from, window_end(from, args.days)))
    };
    let events = in_window(events, window);

    if ctx.json {
        return print_json(&events);
    }

    let mut table = Table::new(["Start", "End", "Type", "Title", "Order", "Notes"]);
    for e in &events {
        table.row([
            output::date_time(e.start),
            e.end.map(output::date_time).unwrap_or_else(|| "-".into()),
            e.event_type.label().to_string(),
            e.title.clone(),
            or_dash(e.order_id.as_deref()).to_string(),
            or_dash(e.notes.as_deref()).to_string(),
        ]);
    }
    table.print_or("No events in this window.");
    Ok(())
}

async fn add(ctx: &Context, args: AddEventArgs) -> Result<()> {
    let event = NewCalendarEvent {
        title: args.title,
        start: args.start,
        end: args.end,
        event_type: args.event_type,
        order_id: args.order,
        notes: args.notes,
    };
    let created = ctx
        .client
        .create_calendar_event(&event)
        .await
        .map_err(operator_error)?;

    if ctx.json {
        return print_json(&created);
    }
    println!(
        "Added {} \"{}\" on {}",
        created.event_type.label().to_lowercase(),
        created.title,
        output::date_time(created.start)
    );
    Ok(())
}
