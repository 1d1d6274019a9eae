//! Discount policies and price derivation.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// A validated, strictly positive discount.
///
/// Values below one are a proportion taken off the price; values of one or
/// more are a currency amount subtracted from it. Exactly `1.0` is a fixed
/// amount of one, not a 100% discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Discount {
    Fractional(f64),
    Fixed(f64),
}

impl ValueObject for Discount {}

impl Discount {
    pub fn new(value: f64) -> DomainResult<Self> {
        // NaN fails this comparison too.
        if !(value > 0.0) {
            return Err(DomainError::validation("Discount must be positive"));
        }
        if value < 1.0 {
            Ok(Discount::Fractional(value))
        } else {
            Ok(Discount::Fixed(value))
        }
    }

    /// The raw value the discount was built from.
    pub fn value(&self) -> f64 {
        match *self {
            Discount::Fractional(v) | Discount::Fixed(v) => v,
        }
    }

    /// Price after the discount. Fixed amounts floor at zero.
    pub fn apply(&self, price: f64) -> f64 {
        match *self {
            Discount::Fractional(d) => price * (1.0 - d),
            Discount::Fixed(d) => (price - d).max(0.0),
        }
    }

    /// Human-readable amount: `"15.00"` for fixed, `"10%"` for fractional.
    pub fn label(&self) -> String {
        match *self {
            Discount::Fixed(d) => format!("{d:.2}"),
            Discount::Fractional(d) => format!("{}%", percent(d)),
        }
    }
}

/// Apply an optional raw discount to `price`.
pub fn apply_discount(price: f64, discount: Option<f64>) -> DomainResult<f64> {
    match discount {
        None => Ok(price),
        Some(raw) => Ok(Discount::new(raw)?.apply(price)),
    }
}

/// Proportion as a percentage, rounded to two places without trailing zeros.
fn percent(fraction: f64) -> f64 {
    (fraction * 100.0 * 100.0).round() / 100.0
}
