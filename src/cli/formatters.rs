//! Text rendering for amounts, calendar grids and summary bars.

use std::collections::BTreeMap;

use crate::ledger::{calendar::first_weekday, MonthKey};

const BAR_WIDTH: usize = 24;
const WEEKDAY_HEADER: &str = " Sun     Mon     Tue     Wed     Thu     Fri     Sat";
const CELL_WIDTH: usize = 8;

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        other => other,
    }
}

fn minor_units_for(code: &str) -> usize {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// `1234.5` in USD renders as `$1,234.50`; negatives get a leading `-`.
pub fn format_currency(amount: f64, code: &str) -> String {
    let body = format_number(amount.abs(), minor_units_for(code));
    let symbol = symbol_for(code);
    let sign = if amount < 0.0 { "-" } else { "" };
    if symbol == code {
        format!("{}{} {}", sign, code, body)
    } else {
        format!("{}{}{}", sign, symbol, body)
    }
}

/// Compact amount for calendar cells: no symbol, no fraction when whole.
pub fn format_compact(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format_number(amount, 0)
    } else {
        format_number(amount, 2)
    }
}

fn format_number(value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value);
    match body.find('.') {
        Some(pos) => format!("{}{}", group_digits(&body[..pos]), &body[pos..]),
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    format!("{}{}", sign, grouped)
}

/// A proportional bar of `#` characters; `max` maps to the full width.
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled.clamp(1, BAR_WIDTH))
}

/// Month grid starting on Sunday. Days with spending show their total below the
/// day number; the filtered day is bracketed.
pub fn calendar_grid(
    month: MonthKey,
    totals: &BTreeMap<String, f64>,
    selected_day: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![WEEKDAY_HEADER.to_string()];
    let offset = first_weekday(month.year(), month.month_index()) as usize;
    let days = month.days() as usize;

    let mut cells: Vec<Option<usize>> = vec![None; offset];
    cells.extend((1..=days).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    for week in cells.chunks(7) {
        let mut day_row = String::new();
        let mut total_row = String::new();
        for cell in week {
            match cell {
                Some(day) => {
                    let date = month.date_string(*day as u32);
                    let label = if selected_day == Some(date.as_str()) {
                        format!("[{:>2}]", day)
                    } else {
                        format!(" {:>2} ", day)
                    };
                    day_row.push_str(&format!("{:<width$}", label, width = CELL_WIDTH));
                    let total = totals
                        .get(&date)
                        .map(|amount| format_compact(*amount))
                        .unwrap_or_default();
                    total_row.push_str(&format!(" {:<width$}", total, width = CELL_WIDTH - 1));
                }
                None => {
                    day_row.push_str(&" ".repeat(CELL_WIDTH));
                    total_row.push_str(&" ".repeat(CELL_WIDTH));
                }
            }
        }
        lines.push(day_row.trim_end().to_string());
        let total_row = total_row.trim_end().to_string();
        if !total_row.is_empty() {
            lines.push(total_row);
        }
    }
    lines
}
