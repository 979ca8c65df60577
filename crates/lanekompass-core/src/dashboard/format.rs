use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::*;

/// Swedish krona amount rounded to whole kronor: `2 150 000 kr`.
pub fn format_sek(value: Money) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped} kr")
}

/// Percentage with two decimals and a decimal comma: `3,79%`.
pub fn format_percent(value: Percent) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded).replace('.', ",")
}

/// A plain ratio shown as a percentage: 0.3726 => `37,26%`.
pub fn format_ratio(value: Rate) -> String {
    format_percent(value * Decimal::ONE_HUNDRED)
}
