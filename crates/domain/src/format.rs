//! Display formatting that never turns an absent value into `0`.

use crate::value_objects::currency::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown in place of a value the provider did not deliver.
pub const PLACEHOLDER: &str = "–";

/// Formats an amount with thousands separators and `decimals` fraction digits.
#[must_use]
pub fn format_amount(value: Option<Decimal>, decimals: u32) -> String {
    match value {
        Some(v) => group_thousands(v, decimals),
        None => PLACEHOLDER.to_string(),
    }
}

/// Formats a monetary amount prefixed with its currency code.
#[must_use]
pub fn format_money(value: Option<Decimal>, currency: &CurrencyCode, decimals: u32) -> String {
    match value {
        Some(v) => format!("{} {}", currency, group_thousands(v, decimals)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Formats a percent change with two decimals, e.g. `-1.25%`.
#[must_use]
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!(
            "{:.2}%",
            v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => PLACEHOLDER.to_string(),
    }
}

fn group_thousands(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
