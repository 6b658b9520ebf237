use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A backend field that arrives either as a JSON number or as a string.
///
/// Proof values such as `potProof.lPrime` exceed what JavaScript numbers hold
/// and are sent as strings by some backend versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    /// Interprets the value as a decimal, if it is numeric.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            NumberOrString::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Some(Decimal::from(v))
                } else if let Some(v) = n.as_u64() {
                    Some(Decimal::from(v))
                } else {
                    n.as_f64().and_then(|v| Decimal::try_from(v).ok())
                }
            }
            NumberOrString::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }
}

impl Default for NumberOrString {
    fn default() -> Self {
        NumberOrString::Text(String::new())
    }
}

impl From<u64> for NumberOrString {
    fn from(v: u64) -> Self {
        NumberOrString::Number(v.into())
    }
}

impl From<&str> for NumberOrString {
    fn from(v: &str) -> Self {
        NumberOrString::Text(v.to_string())
    }
}

impl fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberOrString::Number(n) => write!(f, "{n}"),
            NumberOrString::Text(s) => f.write_str(s),
        }
    }
}
