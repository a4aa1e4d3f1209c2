//! Plain-text tables for the terminal.

use chrono::{DateTime, Local, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use stockbook_core::ProductId;
use stockbook_infra::reports::{LowStockReport, MovementReport, ValueReport};
use stockbook_inventory::Product;

const RULE: usize = 70;
const WIDE_RULE: usize = 80;
/// Product names in the movement table are cut to this many characters.
const MOVEMENT_NAME_WIDTH: usize = 10;

pub fn rule(width: usize) -> String {
    "-".repeat(width)
}

/// Keep at most `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Two decimal places, no grouping.
pub fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Two decimal places with `,` thousands separators.
pub fn money_grouped(value: Decimal) -> String {
    let plain = money(value);
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac_part}")
}

/// Local-time rendering used for every timestamp shown to the user.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S").to_string()
}

pub fn product_list<'a>(products: impl Iterator<Item = (&'a ProductId, &'a Product)>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<25} {:<8} {:<12} {:<15}\n",
        "ID", "Name", "Qty", "Price", "Category"
    ));
    out.push_str(&rule(RULE));
    out.push('\n');
    for (id, p) in products {
        out.push_str(&format!(
            "{:<6} {:<25} {:<8} {:<12} {:<15}\n",
            id.to_string(),
            p.name(),
            p.quantity(),
            money(p.unit_price()),
            p.category()
        ));
    }
    out
}

pub fn low_stock(report: &LowStockReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<25} {:<8} {:<8} {:<15}\n",
        "ID", "Name", "Qty", "Minimum", "Status"
    ));
    out.push_str(&rule(RULE));
    out.push('\n');
    for e in &report.entries {
        out.push_str(&format!(
            "{:<6} {:<25} {:<8} {:<8} {:<15}\n",
            e.product_id.to_string(),
            e.name,
            e.quantity,
            e.min_stock,
            e.status.as_str()
        ));
    }
    out
}

pub fn movements(report: &MovementReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<10} {:<10} {:<8} {:<20}\n",
        "ID", "Product", "Kind", "Qty", "Date"
    ));
    out.push_str(&rule(RULE));
    out.push('\n');
    for row in &report.rows {
        out.push_str(&format!(
            "{:<6} {:<10} {:<10} {:<8} {:<20}\n",
            row.movement_id.to_string(),
            truncate_chars(&row.product_name, MOVEMENT_NAME_WIDTH),
            row.kind.as_str(),
            row.quantity,
            timestamp(row.recorded_at)
        ));
    }
    out
}

pub fn value(report: &ValueReport) -> String {
    let totals = &report.totals;
    let mut out = String::new();
    out.push_str(&format!("Products: {}\n", totals.product_count));
    out.push_str(&format!("Total units: {}\n", totals.total_units));
    out.push_str(&format!(
        "Total stock value: {}\n",
        money_grouped(totals.total_value)
    ));
    out.push_str("\n=== BREAKDOWN BY PRODUCT ===\n");
    out.push_str(&format!(
        "{:<6} {:<25} {:<8} {:<15} {:<15}\n",
        "ID", "Name", "Qty", "Unit price", "Line value"
    ));
    out.push_str(&rule(WIDE_RULE));
    out.push('\n');
    for line in &report.lines {
        out.push_str(&format!(
            "{:<6} {:<25} {:<8} {:<15} {:<15}\n",
            line.product_id.to_string(),
            line.name,
            line.quantity,
            money(line.unit_price),
            money(line.line_value)
        ));
    }
    out
}
