//! Terminal rendering: aligned tables, badges and JSON.

use anyhow::Result;
use chrono::{DateTime, Utc};
use nubras_core::{Badge, Money};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `[Label]`, the terminal form of a badge.
pub fn badge(b: Badge) -> String {
    format!("[{}]", b.label)
}

pub fn badges(list: &[Badge]) -> String {
    list.iter().map(|b| badge(*b)).collect::<Vec<_>>().join(" ")
}

pub fn money(amount: Money, currency: &str) -> String {
    amount.display_with(currency)
}

pub fn date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn date_time(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

/// Column-aligned plain-text table.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    right_aligned: Vec<usize>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Right-aligns the given columns (amounts, counts).
    pub fn align_right(mut self, columns: &[usize]) -> Self {
        self.right_aligned.extend_from_slice(columns);
        self
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = (0..columns)
                .map(|i| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    if self.right_aligned.contains(&i) {
                        format!("{}{}", " ".repeat(pad), cell)
                    } else {
                        format!("{}{}", cell, " ".repeat(pad))
                    }
                })
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&line(&self.headers));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }

    /// Prints the table, or `empty` when there are no rows.
    pub fn print_or(&self, empty: &str) {
        if self.is_empty() {
            println!("{}", empty);
        } else {
            print!("{}", self.render());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nubras_core::{OrderStatus, StatusBadge};

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(["Order", "Total"]).align_right(&[1]);
        table.row(["SO-1", "AED 1050.00"]);
        table.row(["SO-10042", "AED 5.00"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Order           Total");
        assert_eq!(lines[1], "--------  -----------");
        assert_eq!(lines[2], "SO-1      AED 1050.00");
        assert_eq!(lines[3], "SO-10042     AED 5.00");
    }

    #[test]
    fn test_table_counts_chars_not_bytes() {
        let mut table = Table::new(["Name", "X"]);
        table.row(["نبراس", "1"]);
        let rendered = table.render();
        assert!(rendered.lines().nth(2).unwrap().starts_with("نبراس  1"));
    }

    #[test]
    fn test_badges_and_dates() {
        assert_eq!(badge(OrderStatus::Confirmed.badge()), "[Confirmed]");
        assert_eq!(badges(&[Badge::OVERDUE, Badge::DUE_SOON]), "[Overdue] [Due Soon]");
        assert_eq!(date(None), "-");
        let d = Utc.with_ymd_and_hms(2024, 5, 20, 10, 30, 0).unwrap();
        assert_eq!(date(Some(d)), "2024-05-20");
        assert_eq!(date_time(d), "2024-05-20 10:30");
        assert_eq!(or_dash(Some(" ")), "-");
    }
}
