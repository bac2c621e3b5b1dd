//! Command-line surface of `nubras`.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use nubras_core::{EventType, Money, OrderStatus, PaymentMethod};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "nubras", about = "Al Nubras back-office tool", version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "NUBRAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Render command output as pretty JSON
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sales orders
    #[command(subcommand)]
    Orders(OrdersCommands),
    /// Quotations
    #[command(subcommand)]
    Quotations(QuotationsCommands),
    /// Return requests
    #[command(subcommand)]
    Returns(ReturnsCommands),
    /// Stock levels
    #[command(subcommand)]
    Inventory(InventoryCommands),
    /// Suppliers
    #[command(subcommand)]
    Suppliers(SuppliersCommands),
    /// Fittings, deliveries and appointments
    #[command(subcommand)]
    Calendar(CalendarCommands),
    /// Customers
    #[command(subcommand)]
    Customers(ListOnly),
    /// Staff
    #[command(subcommand)]
    Staff(ListOnly),
    /// Log in and optionally save the session cookie to the config
    Login(LoginArgs),
    /// Show or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum OrdersCommands {
    /// List orders with status, payment and due-date flags
    List(OrdersListArgs),
    /// Show one order, including amount consistency checks
    Show(IdArg),
    /// Server dashboard figures plus a client-side summary
    Overview,
    /// Render the invoice and open it for printing
    Invoice(PrintArgs),
    /// Record a payment against an order
    Pay(PayArgs),
}

#[derive(Args, Debug)]
pub struct OrdersListArgs {
    /// Only orders in this status
    #[arg(long, value_parser = parse_order_status)]
    pub status: Option<OrderStatus>,
    /// Only overdue orders
    #[arg(long, action = ArgAction::SetTrue)]
    pub overdue: bool,
    /// Only orders due soon
    #[arg(long, action = ArgAction::SetTrue)]
    pub due_soon: bool,
}

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Order id
    pub id: String,
    /// Amount in major units, e.g. 850 or 850.50
    #[arg(long, value_parser = parse_money)]
    pub amount: Money,
    /// cash, card, bank-transfer or cheque
    #[arg(long, value_parser = parse_payment_method)]
    pub method: PaymentMethod,
}

// =============================================================================
// Quotations / Returns
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum QuotationsCommands {
    /// List quotations, flagging lapsed ones as expired
    List,
    /// Render a quotation and open it for printing
    Print(PrintArgs),
}

#[derive(Subcommand, Debug)]
pub enum ReturnsCommands {
    /// List return requests
    List,
    /// Show a return with its items
    Show(IdArg),
    /// Reject a pending return
    Reject(RejectArgs),
}

#[derive(Args, Debug)]
pub struct RejectArgs {
    /// Return id
    pub id: String,
    /// Reason shown to the customer
    #[arg(long)]
    pub reason: String,
}

// =============================================================================
// Inventory / Suppliers
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// List items with stock status
    List(InventoryListArgs),
    /// Show one item
    Show(IdArg),
    /// Set stock level and thresholds
    SetStock(SetStockArgs),
}

#[derive(Args, Debug)]
pub struct InventoryListArgs {
    /// Only out-of-stock, low-stock and reorder items
    #[arg(long, action = ArgAction::SetTrue)]
    pub alerts: bool,
}

#[derive(Args, Debug)]
pub struct SetStockArgs {
    /// Item id
    pub id: String,
    /// New stock level
    pub stock: Option<i64>,
    #[arg(long)]
    pub min_stock: Option<i64>,
    #[arg(long)]
    pub reorder_point: Option<i64>,
    /// New unit price in major units
    #[arg(long, value_parser = parse_money)]
    pub unit_price: Option<Money>,
}

#[derive(Subcommand, Debug)]
pub enum SuppliersCommands {
    /// List suppliers
    List,
    /// Add a supplier
    Add(AddSupplierArgs),
    /// Delete a supplier
    Remove(IdArg),
}

#[derive(Args, Debug)]
pub struct AddSupplierArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

// =============================================================================
// Calendar
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    /// List events, optionally within a window
    List(CalendarListArgs),
    /// Add an event
    Add(AddEventArgs),
}

#[derive(Args, Debug)]
pub struct CalendarListArgs {
    /// Window start, in UTC unless an offset is given (YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC 3339)
    #[arg(long, value_parser = parse_datetime)]
    pub from: Option<DateTime<Utc>>,
    /// Window length in days
    #[arg(long, default_value_t = 7)]
    pub days: i64,
    /// List every event, ignoring the window
    #[arg(long, action = ArgAction::SetTrue)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct AddEventArgs {
    #[arg(long)]
    pub title: String,
    /// Start, in UTC unless an offset is given (YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC 3339)
    #[arg(long, value_parser = parse_datetime)]
    pub start: DateTime<Utc>,
    /// End, in UTC unless an offset is given
    #[arg(long, value_parser = parse_datetime)]
    pub end: Option<DateTime<Utc>>,
    /// fitting, delivery, appointment or other
    #[arg(long = "type", default_value = "other", value_parser = parse_event_type)]
    pub event_type: EventType,
    /// Related sales order id
    #[arg(long)]
    pub order: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

// =============================================================================
// Shared
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ListOnly {
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct IdArg {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    pub id: String,
    /// Write the HTML here instead of the temp directory
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Write the file without opening a browser
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_open: bool,
    /// Do not open the print dialog automatically
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_print: bool,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "NUBRAS_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Save the session cookie to the config file
    #[arg(long, action = ArgAction::SetTrue)]
    pub save: bool,
}

// =============================================================================
// Value parsers
// =============================================================================

/// Parses a decimal amount in major units, rounding half-up to the minor unit.
pub fn parse_money(s: &str) -> Result<Money, String> {
    let amount = Decimal::from_str(s.trim()).map_err(|_| format!("'{}' is not an amount", s))?;
    Money::from_decimal(amount).ok_or_else(|| format!("'{}' is out of range", s))
}

pub fn parse_payment_method(s: &str) -> Result<PaymentMethod, String> {
    s.parse()
}

pub fn parse_event_type(s: &str) -> Result<EventType, String> {
    s.parse()
}

pub fn parse_order_status(s: &str) -> Result<OrderStatus, String> {
    s.parse()
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD` (midnight). Times
/// without an offset are taken as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| {
            format!(
                "'{}' is not a date (try 2024-05-20, 2024-05-20 10:30 or 2024-05-20T14:30:00+04:00)",
                s
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("850").unwrap(), Money::from_major(850));
        assert_eq!(parse_money("10.505").unwrap().minor(), 1051);
        assert!(parse_money("ten").is_err());
    }

    #[test]
    fn test_parse_datetime() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 20, 10, 30, 0).unwrap();
        assert_eq!(parse_datetime("2024-05-20 10:30").unwrap(), expected);
        assert_eq!(parse_datetime("2024-05-20T14:30:00+04:00").unwrap(), expected);
        assert_eq!(
            parse_datetime("2024-05-20").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap()
        );
        assert!(parse_datetime("next tuesday").is_err());
    }

    #[test]
    fn test_date_arguments_document_utc() {
        let cli = Cli::command();
        let calendar = cli.find_subcommand("calendar").unwrap();
        for (sub, arg) in [("list", "from"), ("add", "start"), ("add", "end")] {
            let help = calendar
                .find_subcommand(sub)
                .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
                .and_then(|a| a.get_help())
                .map(|h| h.to_string())
                .unwrap_or_default();
            assert!(help.contains("UTC"), "{} --{}: {}", sub, arg, help);
        }

        // "10:30" without an offset is 10:30 UTC, i.e. 14:30 in Dubai.
        let parsed = Cli::try_parse_from(["nubras", "calendar", "add", "--title", "Fitting", "--start", "2024-05-20 10:30"]).unwrap();
        match parsed.command {
            Commands::Calendar(CalendarCommands::Add(args)) => assert_eq!(
                args.start,
                DateTime::parse_from_rfc3339("2024-05-20T14:30:00+04:00").unwrap()
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_pay_arguments() {
        let cli = Cli::try_parse_from([
            "nubras", "orders", "pay", "o1", "--amount", "850.50", "--method", "bank-transfer",
        ])
        .unwrap();
        match cli.command {
            Commands::Orders(OrdersCommands::Pay(args)) => {
                assert_eq!(args.amount.minor(), 85_050);
                assert_eq!(args.method, PaymentMethod::BankTransfer);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_payment_method_is_rejected() {
        assert!(Cli::try_parse_from(["nubras", "orders", "pay", "o1", "--amount", "1", "--method", "bitcoin"]).is_err());
    }
}
