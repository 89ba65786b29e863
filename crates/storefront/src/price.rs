//! Price parsing and price-range labels
//!
//! Amounts are kept in minor units (cents) to avoid float rounding.
//! Currency presentation goes through [`PriceFormatter`] so a locale-aware
//! formatter can replace [`PlainFormatter`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative price with two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(u64);

impl Price {
    pub fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub fn minor(&self) -> u64 {
        self.0
    }

    /// Parse user input such as `"1500"`, `"1500.5"` or `" 12.75 "`
    ///
    /// Returns `None` for empty, negative, over-precise or non-numeric input.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));

        if whole.is_empty()
            || frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let whole: u64 = whole.parse().ok()?;
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };

        whole.checked_mul(100)?.checked_add(cents).map(Self)
    }
}

impl fmt::Display for Price {
    /// Grouped amount without currency: `1,500` or `1,500.50`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = group_thousands(self.0 / 100);
        match self.0 % 100 {
            0 => write!(f, "{}", whole),
            cents => write!(f, "{}.{:02}", whole, cents),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Renders a price for display
pub trait PriceFormatter {
    fn format(&self, price: Price) -> String;
}

/// `<CURRENCY> <grouped amount>`, e.g. `RWF 12,000`
#[derive(Debug, Clone)]
pub struct PlainFormatter {
    currency: String,
}

impl PlainFormatter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }
}

impl PriceFormatter for PlainFormatter {
    fn format(&self, price: Price) -> String {
        format!("{} {}", self.currency, price)
    }
}

/// Optional lower and upper price filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: Option<Price>,
    max: Option<Price>,
}

impl PriceRange {
    /// Build a range, swapping inverted bounds
    pub fn new(min: Option<Price>, max: Option<Price>) -> Self {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Self {
                min: Some(hi),
                max: Some(lo),
            },
            _ => Self { min, max },
        }
    }

    /// Build a range from raw inputs; malformed or empty sides are unbounded
    pub fn from_inputs(min: Option<&str>, max: Option<&str>) -> Self {
        Self::new(min.and_then(Price::parse), max.and_then(Price::parse))
    }

    pub fn min(&self) -> Option<Price> {
        self.min
    }

    pub fn max(&self) -> Option<Price> {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Inclusive on both ends
    pub fn contains(&self, price: Price) -> bool {
        self.min.map_or(true, |lo| price >= lo) && self.max.map_or(true, |hi| price <= hi)
    }

    /// Human-readable label for the range
    pub fn label(&self, formatter: &dyn PriceFormatter) -> String {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => format!("{} - {}", formatter.format(lo), formatter.format(hi)),
            (Some(lo), None) => format!("From {}", formatter.format(lo)),
            (None, Some(hi)) => format!("Up to {}", formatter.format(hi)),
            (None, None) => "Any price".to_string(),
        }
    }
}
