//! Cell formatting rules per column kind.
//!
//! The rendering layer paints cells; this module only decides the text and,
//! for badges, the tone.

use chrono::NaiveTime;
use std::fmt;

use crate::config::config::FormatConfig;
use crate::data::row::DataValue;
use crate::data::type_inference::TypeInference;
use crate::table::columns::{ColumnDefinition, ColumnKind};

/// Names accepted by [`ColumnKind::Custom`]
pub const CUSTOM_FORMATTERS: &[&str] = &["masked_account", "percentage", "upi_handle"];

pub fn is_known_formatter(name: &str) -> bool {
    CUSTOM_FORMATTERS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Danger,
    Warning,
    Info,
    Neutral,
}

/// Tone for a payment, merchant or KYC status label
pub fn badge_tone(status: &str) -> BadgeTone {
    match status.trim().to_ascii_lowercase().as_str() {
        "success" | "successful" | "succeeded" | "captured" | "settled" | "completed"
        | "active" | "approved" | "verified" | "paid" => BadgeTone::Success,
        "failed" | "failure" | "declined" | "rejected" | "inactive" | "blocked"
        | "suspended" | "expired" | "cancelled" => BadgeTone::Danger,
        "pending" | "processing" | "initiated" | "in review" | "under review" | "on hold"
        | "submitted" => BadgeTone::Warning,
        "refunded" | "partially refunded" | "reversed" | "disputed" => BadgeTone::Info,
        _ => BadgeTone::Neutral,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Badge { label: String, tone: BadgeTone },
}

impl CellContent {
    pub fn text(&self) -> &str {
        match self {
            CellContent::Text(text) => text,
            CellContent::Badge { label, .. } => label,
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Render a cell value for a column; a missing value renders empty
pub fn format_cell(
    column: &ColumnDefinition,
    value: Option<&DataValue>,
    config: &FormatConfig,
) -> CellContent {
    let value = match value {
        Some(value) if !value.is_null() => value,
        _ => return CellContent::Text(String::new()),
    };

    match &column.kind {
        ColumnKind::Plain => CellContent::Text(value.to_string()),
        ColumnKind::Badge => {
            let label = value.to_string();
            let tone = badge_tone(&label);
            CellContent::Badge { label, tone }
        }
        ColumnKind::Currency => CellContent::Text(match value.as_f64() {
            Some(amount) => {
                format_currency(amount, &config.currency_symbol, config.currency_decimals)
            }
            None => value.to_string(),
        }),
        ColumnKind::Date => CellContent::Text(format_date(value, config)),
        ColumnKind::Custom(name) => CellContent::Text(format_custom(name, value)),
    }
}

/// "₹1,234,567.89" style rendering; negatives get a leading minus
pub fn format_currency(amount: f64, symbol: &str, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{}{}{}.{}", sign, symbol, grouped, fraction),
        None => format!("{}{}{}", sign, symbol, grouped),
    }
}

/// Date cells: midnight timestamps use the date format, others the datetime one
pub fn format_date(value: &DataValue, config: &FormatConfig) -> String {
    let raw = value.to_string();
    match TypeInference::parse_datetime(&raw) {
        Some(parsed) if parsed.time() == NaiveTime::MIN => {
            parsed.format(&config.date_format).to_string()
        }
        Some(parsed) => parsed.format(&config.datetime_format).to_string(),
        None => raw,
    }
}

fn format_custom(name: &str, value: &DataValue) -> String {
    match name {
        "masked_account" => mask_account(&value.to_string()),
        "percentage" => match value.as_f64() {
            Some(percent) => format!("{:.1}%", percent),
            None => value.to_string(),
        },
        "upi_handle" => {
            let handle = value.to_string();
            if handle.contains('@') {
                handle.trim().to_lowercase()
            } else {
                handle
            }
        }
        // Unknown names are rejected when a schema is validated
        _ => value.to_string(),
    }
}

/// Keep the last four characters of an account number
fn mask_account(account: &str) -> String {
    let chars: Vec<char> = account.trim().chars().collect();
    if chars.len() <= 4 {
        return chars.into_iter().collect();
    }
    let visible_from = chars.len() - 4;
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible_from { 'X' } else { *c })
        .collect()
}
