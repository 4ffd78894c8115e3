//! Length units accepted in prompts
//!
//! Every conversion to millimeters goes through [`to_millimeters`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DIMENSION_MM, MIN_DIMENSION_MM};
use crate::grammar::PromptError;

/// A length unit recognized by the prompt grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Millimeters,
    Centimeters,
    Inches,
}

impl Unit {
    /// Millimeters per one of this unit
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Millimeters => 1.0,
            Unit::Centimeters => 10.0,
            Unit::Inches => 25.4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Millimeters => "Millimeters",
            Unit::Centimeters => "Centimeters",
            Unit::Inches => "Inches",
        }
    }

    /// Shortest token that spells this unit
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
            Unit::Inches => "in",
        }
    }

    /// Convert a value in this unit to millimeters.
    ///
    /// The result must lie in `MIN_DIMENSION_MM..=MAX_DIMENSION_MM`.
    pub fn to_millimeters(&self, value: f64) -> Result<f64, PromptError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(PromptError::InvalidDimension(value));
        }
        let mm = value * self.factor();
        if !(MIN_DIMENSION_MM..=MAX_DIMENSION_MM).contains(&mm) {
            return Err(PromptError::InvalidDimension(value));
        }
        Ok(mm)
    }

    pub const ALL: &'static [Unit] = &[Unit::Millimeters, Unit::Centimeters, Unit::Inches];
}

impl FromStr for Unit {
    type Err = PromptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "mm" => Ok(Unit::Millimeters),
            "cm" => Ok(Unit::Centimeters),
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            _ => Err(PromptError::UnknownUnit(token.trim().to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Convert `value` expressed in `unit` to millimeters.
///
/// The unit token is checked first, then the value: it must be finite and
/// strictly positive, and so must the converted result.
pub fn to_millimeters(value: f64, unit: &str) -> Result<f64, PromptError> {
    let unit: Unit = unit.parse()?;
    unit.to_millimeters(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_factors() {
        assert_eq!(to_millimeters(3.0, "mm").unwrap(), 3.0);
        assert_eq!(to_millimeters(3.0, "cm").unwrap(), 30.0);
        assert_relative_eq!(to_millimeters(2.0, "in").unwrap(), 50.8);
        assert_relative_eq!(to_millimeters(2.0, "inch").unwrap(), 50.8);
        assert_relative_eq!(to_millimeters(2.0, "inches").unwrap(), 50.8);
    }

    #[test]
    fn test_unit_tokens_are_case_insensitive() {
        assert_eq!("MM".parse::<Unit>().unwrap(), Unit::Millimeters);
        assert_eq!("Inches".parse::<Unit>().unwrap(), Unit::Inches);
        assert_eq!(to_millimeters(1.0, "CM").unwrap(), 10.0);
    }

    #[test]
    fn test_unknown_unit() {
        let err = to_millimeters(1.0, "ft").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownUnit);
        assert!(err.to_string().contains("ft"));
    }

    #[test]
    fn test_invalid_dimension() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = to_millimeters(value, "mm").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDimension);
        }
    }

    #[test]
    fn test_overflowing_conversion_is_rejected() {
        let err = to_millimeters(f64::MAX, "in").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimension);
    }

    #[test]
    fn test_dimension_range() {
        assert_eq!(to_millimeters(0.001, "mm").unwrap(), MIN_DIMENSION_MM);
        assert_eq!(to_millimeters(100.0, "mm").unwrap(), 100.0);
        assert_eq!(to_millimeters(1e5, "cm").unwrap(), MAX_DIMENSION_MM);
        for (value, unit) in [(0.0009, "mm"), (1e-5, "cm"), (1e6 + 1.0, "mm"), (40_000.0, "in"), (1e160, "mm")] {
            let err = to_millimeters(value, unit).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDimension, "{value} {unit}");
        }
    }

    #[test]
    fn test_symbols_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(unit.symbol().parse::<Unit>().unwrap(), *unit);
        }
    }
}
