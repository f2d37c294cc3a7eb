//! Validated text primitives shared across the neurocase crates.
//!
//! Clinical free text and required identity fields (patient name, sex) arrive from HTTP bodies
//! and CLI arguments. Wrapping them once at the boundary means the access layer never has to
//! re-check for blank strings.

/// Upper bound on any single text field, in bytes.
pub const MAX_TEXT_LEN: usize = 10_000;

/// Errors that can occur when creating validated text types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
    /// The trimmed input exceeded [`MAX_TEXT_LEN`]
    #[error("text exceeds maximum length of {max} bytes")]
    TooLong { max: usize },
}

/// A string that is guaranteed to hold at least one non-whitespace character.
///
/// Leading and trailing whitespace is trimmed during construction, so `"  Jane "` and
/// `"Jane"` produce equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if the trimmed input is empty and
    /// [`TextError::TooLong`] if it is longer than [`MAX_TEXT_LEN`].
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.len() > MAX_TEXT_LEN {
            return Err(TextError::TooLong { max: MAX_TEXT_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for NonEmptyText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NonEmptyText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  Jane Doe \n").unwrap();
        assert_eq!(text.as_str(), "Jane Doe");
    }

    #[test]
    fn rejects_whitespace_only() {
        assert_eq!(NonEmptyText::new(" \t ").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn rejects_oversized_input() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(
            NonEmptyText::new(long).unwrap_err(),
            TextError::TooLong { max: MAX_TEXT_LEN }
        );
    }

    #[test]
    fn deserialize_rejects_blank_string() {
        let err = serde_json::from_str::<NonEmptyText>("\"   \"").unwrap_err();
        assert!(err.to_string().contains("text cannot be empty"));
    }

    #[test]
    fn deserialize_rejects_non_string() {
        assert!(serde_json::from_str::<NonEmptyText>("42").is_err());
        assert!(serde_json::from_str::<NonEmptyText>("true").is_err());
    }
}
