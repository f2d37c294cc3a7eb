//! Implementation of [`RecordId`].

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

use ::uuid::Uuid;

/// A server-assigned record identifier.
///
/// Once constructed the inner value is a valid UUID; [`Display`](fmt::Display) always renders
/// the canonical hyphenated lowercase form, which is also the form written to the database.
///
/// # Construction
/// - [`RecordId::new`] allocates a fresh identifier for a record being created.
/// - [`RecordId::parse`] validates an externally supplied identifier (URL path, CLI argument,
///   database column).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordId {
    /// Generates a new random (version 4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier supplied from outside the core.
    ///
    /// Surrounding whitespace is ignored. The nil UUID is rejected because the server never
    /// allocates it.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not a UUID or is the nil UUID.
    pub fn parse(input: &str) -> UuidResult<Self> {
        let trimmed = input.trim();
        let uuid = Uuid::parse_str(trimmed)
            .map_err(|e| UuidError::InvalidInput(format!("'{}': {}", trimmed, e)))?;
        if uuid.is_nil() {
            return Err(UuidError::InvalidInput(format!(
                "'{}': nil id is never assigned",
                trimmed
            )));
        }
        Ok(Self(uuid))
    }

    /// Returns true if `input` is already in canonical hyphenated lowercase form.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 36
            && input.bytes().enumerate().all(|(i, b)| match i {
                8 | 13 | 18 | 23 => b == b'-',
                _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
            })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecordId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}
