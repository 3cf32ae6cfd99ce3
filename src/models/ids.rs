//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are plain integers assigned by the store. The newtypes keep budget,
//! category and transaction ids from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> i64 {
                self.0
            }

            /// The id following this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts "12" as well as the prefixed form "cat-12"
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(BudgetId, "bud-");
define_id!(CategoryId, "cat-");
define_id!(TransactionId, "txn-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryId::new(7).to_string(), "7");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("12".parse::<BudgetId>().unwrap(), BudgetId::new(12));
        assert_eq!("cat-3".parse::<CategoryId>().unwrap(), CategoryId::new(3));
        assert!("txn-abc".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_next() {
        assert_eq!(BudgetId::new(41).next(), BudgetId::new(42));
    }

    #[test]
    fn test_id_serialization() {
        let json = serde_json::to_string(&CategoryId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CategoryId::new(5));
    }
}
