//! lexicon::record
//!
//! The JSONL lexicon record schema.
//!
//! # Schema
//!
//! Every processed lexicon file is a JSONL stream of [`LexiconRecord`]
//! objects. Only `lemma` is required; sources differ widely in what else
//! they carry, so all other fields are optional and several have legacy
//! aliases that older files still use:
//!
//! - normalized root: `root_norm`, falling back to `root`
//! - pronunciation: `ipa`, falling back to `ipa_raw`
//! - meaning: `gloss_plain`, falling back to `gloss`, then `definition`
//!
//! The accessor methods apply those fallback chains and trim whitespace,
//! so downstream code never touches raw fields.

use serde::{Deserialize, Serialize};

use crate::core::types::{BinaryRoot, RootNorm, TypeError};

/// One lexicon entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconRecord {
    /// Surface/citation form.
    pub lemma: String,

    /// Language tag (e.g., "arabic").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Script tag (e.g., "arab", "latn").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    /// Pipeline stage that produced the record (e.g., "quran", "lexicon").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    /// Source dataset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Raw root as found in the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Normalized root (bare radicals).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_norm: Option<String>,

    /// Two-letter root nucleus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_root: Option<String>,

    /// Romanized transliteration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translit: Option<String>,

    /// IPA pronunciation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,

    /// Unnormalized IPA (legacy alias).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipa_raw: Option<String>,

    /// Plain-text gloss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gloss_plain: Option<String>,

    /// Gloss (legacy alias).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,

    /// Dictionary definition (legacy alias).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

fn first_nonempty<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
}

impl LexiconRecord {
    /// Create a minimal record with just a lemma.
    pub fn new(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            ..Default::default()
        }
    }

    /// Trimmed lemma.
    pub fn lemma(&self) -> &str {
        self.lemma.trim()
    }

    /// Normalized root text: `root_norm`, falling back to `root`.
    pub fn root_norm(&self) -> Option<&str> {
        first_nonempty(&[&self.root_norm, &self.root])
    }

    /// Trimmed binary root text, if present.
    pub fn binary_root(&self) -> Option<&str> {
        first_nonempty(&[&self.binary_root])
    }

    /// Pronunciation: `ipa`, falling back to `ipa_raw`.
    pub fn ipa(&self) -> Option<&str> {
        first_nonempty(&[&self.ipa, &self.ipa_raw])
    }

    /// Meaning text: `gloss_plain`, then `gloss`, then `definition`.
    pub fn gloss(&self) -> Option<&str> {
        first_nonempty(&[&self.gloss_plain, &self.gloss, &self.definition])
    }

    /// Parse the normalized root into a validated [`RootNorm`].
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRoot` when the record has no root text or
    /// the text fails validation.
    pub fn parsed_root(&self) -> Result<RootNorm, TypeError> {
        match self.root_norm() {
            Some(text) => RootNorm::new(text),
            None => Err(TypeError::InvalidRoot("record has no root".into())),
        }
    }

    /// Parse the binary root into a validated [`BinaryRoot`].
    pub fn parsed_binary_root(&self) -> Result<BinaryRoot, TypeError> {
        match self.binary_root() {
            Some(text) => BinaryRoot::new(text),
            None => Err(TypeError::InvalidBinaryRoot(
                "record has no binary_root".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_chains() {
        let record = LexiconRecord {
            lemma: " كتاب ".into(),
            root: Some("كتب".into()),
            ipa_raw: Some("kitaːb".into()),
            definition: Some("book".into()),
            ..Default::default()
        };
        assert_eq!(record.lemma(), "كتاب");
        assert_eq!(record.root_norm(), Some("كتب"));
        assert_eq!(record.ipa(), Some("kitaːb"));
        assert_eq!(record.gloss(), Some("book"));
    }

    #[test]
    fn preferred_fields_win() {
        let record = LexiconRecord {
            lemma: "كتاب".into(),
            root: Some("ktb-raw".into()),
            root_norm: Some("كتب".into()),
            gloss: Some("writing".into()),
            gloss_plain: Some("book".into()),
            ..Default::default()
        };
        assert_eq!(record.root_norm(), Some("كتب"));
        assert_eq!(record.gloss(), Some("book"));
    }

    #[test]
    fn blank_strings_fall_through() {
        let record = LexiconRecord {
            lemma: "كتاب".into(),
            root_norm: Some("   ".into()),
            root: Some("كتب".into()),
            gloss_plain: Some(String::new()),
            gloss: Some("book".into()),
            ..Default::default()
        };
        assert_eq!(record.root_norm(), Some("كتب"));
        assert_eq!(record.gloss(), Some("book"));
    }

    #[test]
    fn parses_validated_types() {
        let record = LexiconRecord {
            lemma: "كتاب".into(),
            root_norm: Some("كَتَب".into()),
            binary_root: Some("كت".into()),
            ..Default::default()
        };
        assert_eq!(record.parsed_root().unwrap().as_str(), "كتب");
        assert_eq!(record.parsed_binary_root().unwrap().as_str(), "كت");

        assert!(LexiconRecord::new("x").parsed_root().is_err());
    }

    #[test]
    fn optional_fields_are_omitted_in_json() {
        let json = serde_json::to_string(&LexiconRecord::new("كتاب")).unwrap();
        assert_eq!(json, "{\"lemma\":\"كتاب\"}");
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let record: LexiconRecord =
            serde_json::from_str("{\"lemma\":\"x\",\"surah\":2}").unwrap();
        assert_eq!(record.lemma, "x");
    }
}
