//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are a fixed letter prefix followed by a zero-padded sequence
//! number (`P001`, `M0001`). The numeric part is the ordering key, so a map
//! keyed by these ids iterates in allocation order.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An identifier backed by a monotonically allocated sequence number.
pub trait SequenceId: Copy + Ord + core::fmt::Debug + core::fmt::Display {
    /// Build the identifier for sequence number `seq` (starting at 1).
    fn from_seq(seq: u64) -> Self;

    /// The sequence number this identifier was allocated from.
    fn seq(&self) -> u64;
}

/// Identifier of a product record (`P` + 3-digit zero-padded sequence).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(u64);

/// Identifier of a movement record (`M` + 4-digit zero-padded sequence).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MovementId(u64);

macro_rules! impl_sequence_id {
    ($t:ty, $prefix:literal, $width:literal, $name:literal) => {
        impl SequenceId for $t {
            fn from_seq(seq: u64) -> Self {
                Self(seq)
            }

            fn seq(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!($prefix, "{:0", $width, "}"), self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase();
                let digits = normalized.strip_prefix($prefix).ok_or_else(|| {
                    DomainError::validation(format!(
                        "{} must start with '{}': {:?}",
                        $name, $prefix, s
                    ))
                })?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(DomainError::validation(format!(
                        "{} must be '{}' followed by digits: {:?}",
                        $name, $prefix, s
                    )));
                }
                let seq: u64 = digits
                    .parse()
                    .map_err(|e| DomainError::validation(format!("{}: {}", $name, e)))?;
                if seq == 0 {
                    return Err(DomainError::validation(format!(
                        "{} sequence starts at 1: {:?}",
                        $name, s
                    )));
                }
                Ok(Self(seq))
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.to_string()
            }
        }
    };
}

impl_sequence_id!(ProductId, "P", 3, "ProductId");
impl_sequence_id!(MovementId, "M", 4, "MovementId");
