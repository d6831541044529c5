//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Lemma`] - Validated surface/citation form
//! - [`RootNorm`] - Normalized Arabic root (2-5 radicals)
//! - [`BinaryRoot`] - Two-letter root nucleus
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use lexroot::core::types::{BinaryRoot, Lemma, RootNorm};
//!
//! // Valid constructions
//! let lemma = Lemma::new("كتاب").unwrap();
//! let root = RootNorm::new("كتب").unwrap();
//! let nucleus = BinaryRoot::of(&root);
//! assert_eq!(nucleus.as_str(), "كت");
//!
//! // Invalid constructions fail at creation time
//! assert!(Lemma::new("").is_err());
//! assert!(RootNorm::new("k-t-b").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexicon::normalize::{is_arabic_letter, normalize_text, strip_diacritics};

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid lemma: {0}")]
    InvalidLemma(String),

    #[error("invalid root: {0}")]
    InvalidRoot(String),

    #[error("invalid binary root: {0}")]
    InvalidBinaryRoot(String),
}

/// A validated lemma (citation form).
///
/// Lemmas are stored whitespace-normalized and must:
/// - Be non-empty after trimming
/// - Contain no control characters
///
/// The script is not constrained; transliterated lemmas are legal during
/// ingest and only converted to Arabic script by the enrichment step.
///
/// # Example
///
/// ```
/// use lexroot::core::types::Lemma;
///
/// let lemma = Lemma::new("  كِتَاب ").unwrap();
/// assert_eq!(lemma.as_str(), "كِتَاب");
///
/// assert!(Lemma::new("").is_err());
/// assert!(Lemma::new("bad\u{0007}bell").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lemma(String);

impl Lemma {
    /// Create a new validated lemma.
    ///
    /// The input is whitespace-normalized (trimmed, internal runs collapsed).
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLemma` if the normalized text is empty or
    /// contains control characters.
    pub fn new(text: impl Into<String>) -> Result<Self, TypeError> {
        let text = normalize_text(&text.into());
        if text.is_empty() {
            return Err(TypeError::InvalidLemma("lemma cannot be empty".into()));
        }
        if text.chars().any(char::is_control) {
            return Err(TypeError::InvalidLemma(
                "lemma cannot contain control characters".into(),
            ));
        }
        Ok(Self(text))
    }

    /// Get the lemma as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A normalized Arabic root.
///
/// Roots must consist of 2 to 5 Arabic letters after stripping diacritics
/// and tatweel. Most Arabic roots are triliteral; biliteral entries occur
/// in some source maps and quadriliteral/quinqueliteral loans exist, so the
/// range is kept permissive.
///
/// # Example
///
/// ```
/// use lexroot::core::types::RootNorm;
///
/// let root = RootNorm::new("كَتَبَ").unwrap();
/// assert_eq!(root.as_str(), "كتب");
/// assert_eq!(root.radical_count(), 3);
///
/// assert!(RootNorm::new("ك").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootNorm(String);

impl RootNorm {
    /// Create a new normalized root.
    ///
    /// Diacritics and tatweel are stripped before validation, so vocalized
    /// roots are accepted and stored bare.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRoot` if the stripped text is not 2-5
    /// Arabic letters.
    pub fn new(text: impl Into<String>) -> Result<Self, TypeError> {
        let stripped = strip_diacritics(&normalize_text(&text.into()));
        let count = stripped.chars().count();
        if !(2..=5).contains(&count) {
            return Err(TypeError::InvalidRoot(format!(
                "root must have 2-5 radicals, got {}",
                count
            )));
        }
        if !stripped.chars().all(is_arabic_letter) {
            return Err(TypeError::InvalidRoot(
                "root must contain only Arabic letters".into(),
            ));
        }
        Ok(Self(stripped))
    }

    /// Get the root as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of radicals in the root.
    pub fn radical_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// A two-letter root nucleus.
///
/// The binary root is the hypothesized two-letter core underlying a family
/// of (mostly triliteral) Arabic roots. It is derived from the first two
/// radicals of a normalized root.
///
/// # Example
///
/// ```
/// use lexroot::core::types::{BinaryRoot, RootNorm};
///
/// let nucleus = BinaryRoot::new("كت").unwrap();
/// assert_eq!(nucleus.as_str(), "كت");
///
/// let root = RootNorm::new("كتب").unwrap();
/// assert_eq!(BinaryRoot::of(&root), nucleus);
///
/// assert!(BinaryRoot::new("كتب").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BinaryRoot(String);

impl BinaryRoot {
    /// Create a new validated binary root.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBinaryRoot` if the stripped text is not
    /// exactly 2 Arabic letters.
    pub fn new(text: impl Into<String>) -> Result<Self, TypeError> {
        let stripped = strip_diacritics(&normalize_text(&text.into()));
        if stripped.chars().count() != 2 {
            return Err(TypeError::InvalidBinaryRoot(
                "binary root must be exactly 2 letters".into(),
            ));
        }
        if !stripped.chars().all(is_arabic_letter) {
            return Err(TypeError::InvalidBinaryRoot(
                "binary root must contain only Arabic letters".into(),
            ));
        }
        Ok(Self(stripped))
    }

    /// Derive the nucleus from a normalized root: its first two radicals.
    pub fn of(root: &RootNorm) -> Self {
        Self(root.as_str().chars().take(2).collect())
    }

    /// Get the binary root as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_string_conversions {
    ($ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = TypeError;
            fn try_from(value: String) -> Result<Self, Self::Error> {
                $ty::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_conversions!(Lemma);
impl_string_conversions!(RootNorm);
impl_string_conversions!(BinaryRoot);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lemma_normalizes_whitespace() {
        let lemma = Lemma::new("  kitab   al  ").unwrap();
        assert_eq!(lemma.as_str(), "kitab al");
    }

    #[test]
    fn lemma_rejects_empty_and_control() {
        assert!(Lemma::new("").is_err());
        assert!(Lemma::new("   ").is_err());
        assert!(Lemma::new("a\u{0007}b").is_err());
    }

    #[test]
    fn root_strips_diacritics() {
        let root = RootNorm::new("كَتَبَ").unwrap();
        assert_eq!(root.as_str(), "كتب");
        assert_eq!(root.radical_count(), 3);
    }

    #[test]
    fn root_rejects_bad_lengths() {
        assert!(RootNorm::new("ك").is_err());
        assert!(RootNorm::new("كتبكتب").is_err());
    }

    #[test]
    fn root_rejects_non_arabic() {
        assert!(RootNorm::new("ktb").is_err());
        assert!(RootNorm::new("كت ب").is_err());
    }

    #[test]
    fn binary_root_of_takes_first_two_radicals() {
        let root = RootNorm::new("درس").unwrap();
        assert_eq!(BinaryRoot::of(&root).as_str(), "در");
    }

    #[test]
    fn binary_root_requires_two_letters() {
        assert!(BinaryRoot::new("د").is_err());
        assert!(BinaryRoot::new("درس").is_err());
        assert!(BinaryRoot::new("در").is_ok());
    }

    #[test]
    fn serde_round_trip() {
        let root = RootNorm::new("قرأ").unwrap();
        let json = serde_json::to_string(&root).unwrap();
        let parsed: RootNorm = serde_json::from_str(&json).unwrap();
        assert_eq!(root, parsed);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<BinaryRoot, _> = serde_json::from_str("\"xyz\"");
        assert!(result.is_err());
    }
}
