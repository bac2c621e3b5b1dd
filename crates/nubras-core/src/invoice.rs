//! # Printable Documents
//!
//! Renders sales-order invoices and quotations as self-contained HTML.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ <business name>              INVOICE       │
//! │ address · phone · TRN        SO-1042       │
//! ├────────────────────────────────────────────┤
//! │ Bill to        Dates          Status       │
//! ├────────────────────────────────────────────┤
//! │ Item            Qty   Unit price   Total   │
//! │ ...                                        │
//! ├────────────────────────────────────────────┤
//! │                     Subtotal / VAT / Total │
//! │                          Paid / Balance    │
//! └────────────────────────────────────────────┘
//! ```
//!
//! Every interpolated value goes through [`esc`]. With auto-print on, the
//! page opens the print dialog on load and closes itself afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::badge::{Badge, StatusBadge};
use crate::money::Money;
use crate::order::SalesOrder;
use crate::party::CustomerSummary;
use crate::pricing::LineItem;
use crate::quotation::Quotation;

/// Letterhead details printed on every document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// UAE tax registration number.
    pub trn: String,
    pub currency: String,
    pub footer: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: "Al Nubras".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            trn: String::new(),
            currency: crate::DEFAULT_CURRENCY.to_string(),
            footer: "Thank you for your business.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Open the print dialog on load and close the window afterwards.
    pub auto_print: bool,
}

/// Escapes text for an HTML body or a quoted attribute.
pub fn esc(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const AUTO_PRINT_SCRIPT: &str = r#"<script>
window.addEventListener('load', function () { window.print(); });
window.onafterprint = function () { window.close(); };
</script>"#;

// =============================================================================
// Public renderers
// =============================================================================

/// Invoice for a sales order, using the amounts exactly as stored.
pub fn render_order_invoice(
    order: &SalesOrder,
    business: &BusinessProfile,
    options: &RenderOptions,
) -> String {
    let number = order.display_number();
    let currency = business.currency.as_str();

    let mut meta = Vec::new();
    if let Some(created) = order.created_at {
        meta.push(("Date", date(created)));
    }
    if let Some(due) = order.due_date {
        meta.push(("Due", date(due)));
    }
    if let Some(delivery) = order.delivery_date {
        meta.push(("Delivery", date(delivery)));
    }
    if let Some(method) = order.payment_method {
        meta.push(("Payment", method.label().to_string()));
    }

    let mut totals = vec![("Subtotal", order.subtotal)];
    if !order.discount_amount.is_zero() {
        totals.push(("Discount", -order.discount_amount));
    }
    totals.push(("VAT", order.tax_amount));

    let mut body = String::new();
    body.push_str(&letterhead(business, "Invoice", number));
    body.push_str(&parties(order.customer.as_ref(), &meta, &[order.status.badge(), order.payment_status.badge()]));
    body.push_str(&items_table(&order.items, currency));
    body.push_str(&totals_block(
        &totals,
        ("Total", order.total_amount),
        &[("Paid", order.amount_paid), ("Balance due", order.outstanding())],
        currency,
    ));
    body.push_str(&notes(order.notes.as_deref()));
    body.push_str(&footer(business));

    html_shell(&format!("Invoice {}", number), &body, options)
}

/// Quotation document. Shows the validity date and an "Expired" flag
/// when `now` is past it.
pub fn render_quotation(
    quotation: &Quotation,
    business: &BusinessProfile,
    options: &RenderOptions,
    now: DateTime<Utc>,
) -> String {
    let number = quotation.display_number();
    let currency = business.currency.as_str();

    let mut meta = Vec::new();
    if let Some(created) = quotation.created_at {
        meta.push(("Date", date(created)));
    }
    if let Some(until) = quotation.valid_until {
        meta.push(("Valid until", date(until)));
    }

    let mut totals = vec![("Subtotal", quotation.subtotal)];
    if !quotation.discount.is_zero() {
        totals.push(("Discount", -quotation.discount));
    }
    totals.push(("VAT", quotation.tax));

    let mut body = String::new();
    body.push_str(&letterhead(business, "Quotation", number));
    body.push_str(&parties(quotation.customer.as_ref(), &meta, &quotation.display_badges(now)));
    body.push_str(&items_table(&quotation.items, currency));
    body.push_str(&totals_block(&totals, ("Total", quotation.total), &[], currency));
    body.push_str(&notes(quotation.notes.as_deref()));
    body.push_str(&footer(business));

    html_shell(&format!("Quotation {}", number), &body, options)
}

// =============================================================================
// Sections
// =============================================================================

fn date(value: DateTime<Utc>) -> String {
    value.format("%d %b %Y").to_string()
}

fn letterhead(business: &BusinessProfile, kind: &str, number: &str) -> String {
    let contact: Vec<String> = [
        business.address.as_str(),
        business.phone.as_str(),
        business.email.as_str(),
    ]
    .iter()
    .filter(|s| !s.trim().is_empty())
    .map(|s| esc(s))
    .collect();

    let trn = if business.trn.trim().is_empty() {
        String::new()
    } else {
        format!(r#"<div class="muted">TRN {}</div>"#, esc(&business.trn))
    };

    format!(
        r#"<header class="head">
<div><h1>{}</h1><div class="muted">{}</div>{}</div>
<div class="doc"><h2>{}</h2><div class="number">{}</div></div>
</header>
"#,
        esc(&business.name),
        contact.join(" &middot; "),
        trn,
        esc(kind),
        esc(number)
    )
}

fn parties(customer: Option<&CustomerSummary>, meta: &[(&str, String)], badges: &[Badge]) -> String {
    let bill_to = match customer {
        Some(c) => {
            let mut lines = vec![format!("<strong>{}</strong>", esc(&c.name))];
            for value in [&c.phone, &c.email, &c.address].into_iter().flatten() {
                lines.push(esc(value));
            }
            lines.join("<br/>")
        }
        None => r#"<span class="muted">Walk-in customer</span>"#.to_string(),
    };

    let meta_rows: String = meta
        .iter()
        .map(|(label, value)| format!("<div><span class=\"muted\">{}:</span> {}</div>", esc(label), esc(value)))
        .collect();

    let badge_html: String = badges
        .iter()
        .map(|b| format!(r#"<span class="badge {}">{}</span>"#, b.tone.css_class(), esc(b.label)))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<section class="parties">
<div><h3>Bill to</h3>{}</div>
<div><h3>Details</h3>{}</div>
<div><h3>Status</h3>{}</div>
</section>
"#,
        bill_to, meta_rows, badge_html
    )
}

fn items_table(items: &[LineItem], currency: &str) -> String {
    let rows: String = if items.is_empty() {
        r#"<tr><td colspan="4" class="muted center">No items</td></tr>"#.to_string()
    } else {
        items
            .iter()
            .map(|item| {
                let mut desc = esc(&item.name);
                if let Some(d) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
                    desc.push_str(&format!(r#"<div class="muted">{}</div>"#, esc(d)));
                }
                if let Some(m) = item.measurements.as_deref().filter(|m| !m.trim().is_empty()) {
                    desc.push_str(&format!(r#"<div class="muted">Measurements: {}</div>"#, esc(m)));
                }
                format!(
                    "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
                    desc,
                    item.quantity,
                    esc(&item.price.display_with(currency)),
                    esc(&item.line_total().display_with(currency)),
                )
            })
            .collect()
    };

    format!(
        r#"<table class="items">
<thead><tr><th>Item</th><th class="num">Qty</th><th class="num">Unit price</th><th class="num">Total</th></tr></thead>
<tbody>
{}</tbody>
</table>
"#,
        rows
    )
}

fn totals_block(
    lines: &[(&str, Money)],
    grand: (&str, Money),
    after: &[(&str, Money)],
    currency: &str,
) -> String {
    let row = |label: &str, amount: Money, class: &str| {
        format!(
            "<tr class=\"{}\"><td>{}</td><td class=\"num\">{}</td></tr>\n",
            class,
            esc(label),
            esc(&amount.display_with(currency))
        )
    };

    let mut out = String::from("<table class=\"totals\">\n");
    for (label, amount) in lines {
        out.push_str(&row(label, *amount, ""));
    }
    out.push_str(&row(grand.0, grand.1, "grand"));
    for (label, amount) in after {
        out.push_str(&row(label, *amount, ""));
    }
    out.push_str("</table>\n");
    out
}

fn notes(notes: Option<&str>) -> String {
    match notes.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => format!("<section class=\"notes\"><h3>Notes</h3><p>{}</p></section>\n", esc(n)),
        None => String::new(),
    }
}

fn footer(business: &BusinessProfile) -> String {
    if business.footer.trim().is_empty() {
        return String::new();
    }
    format!("<footer class=\"center muted\">{}</footer>\n", esc(&business.footer))
}

fn html_shell(title: &str, body: &str, options: &RenderOptions) -> String {
    let script = if options.auto_print { AUTO_PRINT_SCRIPT } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>{}</title>
<style>
body {{ font-family: "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; padding: 32px; color: #1a1a1a; font-size: 13px; }}
h1 {{ margin: 0; font-size: 22px; }}
h2 {{ margin: 0; font-size: 18px; text-transform: uppercase; letter-spacing: 2px; }}
h3 {{ margin: 0 0 6px 0; font-size: 11px; text-transform: uppercase; color: #666; }}
.head {{ display: flex; justify-content: space-between; border-bottom: 2px solid #1a1a1a; padding-bottom: 12px; }}
.doc {{ text-align: right; }}
.number {{ font-size: 15px; font-weight: 600; }}
.parties {{ display: flex; gap: 24px; margin: 18px 0; }}
.parties > div {{ flex: 1; }}
table {{ width: 100%; border-collapse: collapse; }}
.items th {{ text-align: left; border-bottom: 1px solid #1a1a1a; padding: 6px 4px; }}
.items td {{ border-bottom: 1px solid #e5e5e5; padding: 6px 4px; vertical-align: top; }}
.totals {{ width: 45%; margin: 14px 0 0 auto; }}
.totals td {{ padding: 4px; }}
.totals .grand td {{ border-top: 2px solid #1a1a1a; font-weight: 700; font-size: 15px; }}
.num {{ text-align: right; white-space: nowrap; }}
.muted {{ color: #666; }}
.center {{ text-align: center; }}
.notes {{ margin-top: 18px; }}
footer {{ margin-top: 32px; }}
.badge {{ display: inline-block; border-radius: 999px; padding: 2px 8px; font-size: 11px; }}
.badge-neutral {{ background: #eee; }}
.badge-info {{ background: #dbeafe; }}
.badge-success {{ background: #dcfce7; }}
.badge-warning {{ background: #fef3c7; }}
.badge-danger {{ background: #fee2e2; }}
@media print {{ body {{ padding: 0; }} }}
</style>
{}
</head>
<body>
{}</body>
</html>"#,
        esc(title),
        script,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotation::QuotationStatus;
    use chrono::{Duration, TimeZone};

    fn order() -> SalesOrder {
        serde_json::from_value(serde_json::json!({
            "id": "o1",
            "orderNumber": "SO-1042",
            "status": "confirmed",
            "customer": {"name": "Saeed <Al> & Sons", "phone": "+971500000000"},
            "items": [
                {"name": "Kandura", "quantity": 2, "price": 350, "measurements": "L 58, S 24"},
                {"name": "Alteration", "quantity": 1, "unitPrice": 300}
            ],
            "subtotal": 1000,
            "taxAmount": 50,
            "discountAmount": 0,
            "totalAmount": 1050,
            "amountPaid": 200,
            "amountPending": 850,
            "paymentStatus": "partial",
            "notes": "<script>alert(1)</script>"
        }))
        .unwrap()
    }

    fn business() -> BusinessProfile {
        BusinessProfile {
            trn: "100200300400003".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_esc() {
        assert_eq!(esc(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_invoice_shows_stored_amounts_with_two_decimals() {
        let html = render_order_invoice(&order(), &business(), &RenderOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("SO-1042"));
        assert!(html.contains("AED 1000.00"));
        assert!(html.contains("AED 50.00"));
        assert!(html.contains("AED 1050.00"));
        assert!(html.contains("AED 850.00"));
        assert!(html.contains("AED 700.00"));
        assert!(html.contains("TRN 100200300400003"));
        assert!(html.contains("Measurements: L 58, S 24"));
        assert!(html.contains("Partially Paid"));
    }

    #[test]
    fn test_invoice_escapes_interpolated_text() {
        let html = render_order_invoice(&order(), &business(), &RenderOptions::default());
        assert!(html.contains("Saeed &lt;Al&gt; &amp; Sons"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_auto_print_script_only_when_enabled() {
        let plain = render_order_invoice(&order(), &business(), &RenderOptions { auto_print: false });
        assert!(!plain.contains("window.print()"));

        let printing = render_order_invoice(&order(), &business(), &RenderOptions { auto_print: true });
        assert!(printing.contains("window.print()"));
        assert!(printing.contains("window.close()"));
    }

    #[test]
    fn test_quotation_flags_expired() {
        let now = Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();
        let mut q: Quotation = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "quotationNumber": "QT-7",
            "status": "sent",
            "items": [{"name": "Bisht", "quantity": 1, "price": 2000}],
            "subtotal": 2000, "tax": 100, "discount": 0, "total": 2100
        }))
        .unwrap();
        q.valid_until = Some(now - Duration::days(1));

        let html = render_quotation(&q, &business(), &RenderOptions::default(), now);
        assert!(html.contains("Quotation"));
        assert!(html.contains("Valid until"));
        assert!(html.contains(">Expired<"));
        assert!(html.contains("AED 2100.00"));

        q.status = QuotationStatus::Accepted;
        let html = render_quotation(&q, &business(), &RenderOptions::default(), now);
        assert!(!html.contains(">Expired<"));
    }

    #[test]
    fn test_missing_customer_and_items() {
        let mut o = order();
        o.customer = None;
        o.items.clear();
        let html = render_order_invoice(&o, &business(), &RenderOptions::default());
        assert!(html.contains("Walk-in customer"));
        assert!(html.contains("No items"));
    }
}
