//! Quantity input clamping

use crate::{Result, StorefrontError};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Inclusive range of orderable units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityBounds {
    min: u32,
    max: u32,
}

impl QuantityBounds {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(StorefrontError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds for a product with `stock` units left: at least one, at most all
    pub fn for_stock(stock: u32) -> Result<Self> {
        if stock == 0 {
            return Err(StorefrontError::OutOfStock);
        }
        Self::new(1, stock)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn clamp(&self, value: i64) -> u32 {
        if value < i64::from(self.min) {
            self.min
        } else if value > i64::from(self.max) {
            self.max
        } else {
            value as u32
        }
    }

    /// Clamp raw input text
    ///
    /// Returns `None` for anything that is not an integer, meaning the field
    /// should be left as typed.
    pub fn clamp_input(&self, raw: &str) -> Option<u32> {
        parse_saturating(raw).map(|value| self.clamp(value))
    }

    /// Corrected value, only when it differs from what was typed
    pub fn correction(&self, raw: &str) -> Option<u32> {
        let typed = parse_saturating(raw)?;
        let clamped = self.clamp(typed);
        (i64::from(clamped) != typed).then_some(clamped)
    }
}

/// Parse an integer, saturating on overflow so huge inputs still clamp
fn parse_saturating(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_stock() {
        let bounds = QuantityBounds::for_stock(12).unwrap();
        assert_eq!((bounds.min(), bounds.max()), (1, 12));
        assert!(matches!(
            QuantityBounds::for_stock(0),
            Err(StorefrontError::OutOfStock)
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert!(matches!(
            QuantityBounds::new(5, 2),
            Err(StorefrontError::InvalidBounds { min: 5, max: 2 })
        ));
        assert!(QuantityBounds::new(3, 3).is_ok());
    }

    #[test]
    fn test_clamp_input() {
        let bounds = QuantityBounds::for_stock(10).unwrap();

        assert_eq!(bounds.clamp_input("4"), Some(4));
        assert_eq!(bounds.clamp_input(" 10 "), Some(10));
        assert_eq!(bounds.clamp_input("0"), Some(1));
        assert_eq!(bounds.clamp_input("-3"), Some(1));
        assert_eq!(bounds.clamp_input("11"), Some(10));
        assert_eq!(bounds.clamp_input("99999999999999999999999"), Some(10));
        assert_eq!(bounds.clamp_input("-99999999999999999999999"), Some(1));
    }

    #[test]
    fn test_malformed_input_ignored() {
        let bounds = QuantityBounds::for_stock(10).unwrap();

        assert_eq!(bounds.clamp_input(""), None);
        assert_eq!(bounds.clamp_input("two"), None);
        assert_eq!(bounds.clamp_input("2.5"), None);
        assert_eq!(bounds.correction("abc"), None);
    }

    #[test]
    fn test_correction_only_when_changed() {
        let bounds = QuantityBounds::for_stock(10).unwrap();

        assert_eq!(bounds.correction("5"), None);
        assert_eq!(bounds.correction("0"), Some(1));
        assert_eq!(bounds.correction("25"), Some(10));
    }
}
