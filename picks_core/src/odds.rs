//! American-odds parsing and price math.
//!
//! Quotes arrive pre-formatted from the odds board (`"+140"`, `"-115"`,
//! sometimes embedded in longer text), so parsing works over free text and
//! never fails hard: anything without a signed-integer run is simply not a
//! price.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::Leg;

static SIGNED_INT_RE: OnceLock<Regex> = OnceLock::new();

fn signed_int_re() -> &'static Regex {
    SIGNED_INT_RE.get_or_init(|| Regex::new(r"[-+]?\d+").expect("static pattern is valid"))
}

/// Extract the first signed-integer run from free text as American odds.
///
/// Returns `None` for non-numeric input or runs that overflow `i32`.
pub fn parse_american_odds(text: &str) -> Option<i32> {
    signed_int_re()
        .find(text)
        .and_then(|m| m.as_str().parse::<i32>().ok())
}

/// Convert American odds to decimal odds (total return per unit staked).
pub fn american_to_decimal(odds: i32) -> f64 {
    if odds >= 0 {
        1.0 + odds as f64 / 100.0
    } else {
        1.0 + 100.0 / (-odds) as f64
    }
}

/// Convert decimal odds back to the nearest American price.
///
/// Decimal 2.0 encodes as `+100` (the even-money price has two American
/// spellings; the positive form wins). Returns `None` for decimal odds at or
/// below 1.0 (no payout).
pub fn decimal_to_american(decimal: f64) -> Option<i32> {
    if !(decimal > 1.0) || !decimal.is_finite() {
        return None;
    }
    let american = if decimal >= 2.0 {
        (decimal - 1.0) * 100.0
    } else {
        -100.0 / (decimal - 1.0)
    };
    Some(american.round() as i32)
}

/// Implied win probability of an American price, vig included.
pub fn implied_probability(odds: i32) -> f64 {
    if odds >= 0 {
        100.0 / (odds as f64 + 100.0)
    } else {
        let risk = (-odds) as f64;
        risk / (risk + 100.0)
    }
}

/// Combined American price of a multi-leg pick (product of the legs' decimal
/// odds). `None` when the combo is empty or any leg is missing a price.
pub fn combined_american_odds(legs: &[Leg]) -> Option<i32> {
    if legs.is_empty() {
        return None;
    }
    let mut decimal = 1.0;
    for leg in legs {
        decimal *= american_to_decimal(leg.price?);
    }
    decimal_to_american(decimal)
}
