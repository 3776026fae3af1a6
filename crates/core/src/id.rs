//! Identifiers for jobs and decks.
//!
//! Both are caller-supplied strings on the wire. Generated ids are UUIDv7 so
//! they sort by creation time.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

/// Identifier of a materialized deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(String);

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Generate a fresh, time-ordered identifier.
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Parse a caller-supplied identifier.
            ///
            /// Rejects empty and whitespace-only values.
            pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, " must not be empty")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the id would be rejected by [`Self::parse`].
            ///
            /// Records decoded from JSON bypass `parse`, so stores re-check on
            /// load and on insert.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_id!(JobId, "JobId");
impl_string_id!(DeckId, "DeckId");
