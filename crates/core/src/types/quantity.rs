//! Cart line quantity.
//!
//! The server is the only authority on which quantities are acceptable.
//! [`Quantity`] only guarantees "is an integer"; [`QuantityInput`] carries
//! whatever the user typed so the server can reject it with a message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a quantity from an input value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid quantity: {0:?}")]
pub struct QuantityError(pub String);

/// An integer cart quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Quantity used when an add-to-cart trigger carries none.
    pub const ONE: Self = Self(1);

    /// Create a quantity from a raw integer.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the underlying integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| QuantityError(s.to_owned()))
    }
}

/// Quantity as sent in an update body.
///
/// Input values that parse as integers go out as JSON numbers; anything
/// else is forwarded as the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(Quantity),
    Raw(String),
}

impl QuantityInput {
    /// Interpret the value of a quantity input.
    #[must_use]
    pub fn from_input(value: &str) -> Self {
        value
            .parse::<Quantity>()
            .map_or_else(|_| Self::Raw(value.to_owned()), Self::Number)
    }

    /// The integer quantity, if the input was one.
    #[must_use]
    pub const fn quantity(&self) -> Option<Quantity> {
        match self {
            Self::Number(quantity) => Some(*quantity),
            Self::Raw(_) => None,
        }
    }
}

impl From<Quantity> for QuantityInput {
    fn from(quantity: Quantity) -> Self {
        Self::Number(quantity)
    }
}

impl std::fmt::Display for QuantityInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(quantity) => quantity.fmt(f),
            Self::Raw(raw) => write!(f, "{raw:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one() {
        assert_eq!(Quantity::default(), Quantity::ONE);
        assert_eq!(Quantity::default().get(), 1);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 3 ".parse::<Quantity>(), Ok(Quantity::new(3)));
    }

    #[test]
    fn test_parse_keeps_server_side_range_checks() {
        // Zero and negatives are the server's call, not ours
        assert_eq!("0".parse::<Quantity>(), Ok(Quantity::new(0)));
        assert_eq!("-2".parse::<Quantity>(), Ok(Quantity::new(-2)));
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        assert_eq!(
            "".parse::<Quantity>(),
            Err(QuantityError(String::new()))
        );
        assert!("1.5".parse::<Quantity>().is_err());
        assert!("two".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_value(Quantity::new(4)).ok();
        assert_eq!(json, Some(serde_json::json!(4)));
    }

    #[test]
    fn test_input_keeps_unparseable_values() {
        assert_eq!(
            QuantityInput::from_input("4"),
            QuantityInput::Number(Quantity::new(4))
        );
        for raw in ["", "2.5", "1e2"] {
            assert_eq!(
                QuantityInput::from_input(raw),
                QuantityInput::Raw(raw.to_string())
            );
        }
        assert_eq!(QuantityInput::from_input("2.5").quantity(), None);
    }

    #[test]
    fn test_input_serializes_number_or_string() {
        let number = serde_json::to_value(QuantityInput::from_input(" 3 ")).ok();
        assert_eq!(number, Some(serde_json::json!(3)));

        let raw = serde_json::to_value(QuantityInput::from_input("2.5")).ok();
        assert_eq!(raw, Some(serde_json::json!("2.5")));
    }
}
