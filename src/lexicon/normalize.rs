//! lexicon::normalize
//!
//! Arabic text normalization and lightweight similarity features.
//!
//! # Overview
//!
//! All similarity measures in the cluster layer operate on features built
//! here:
//!
//! - [`strip_diacritics`] removes Arabic short vowels, tanween, shadda,
//!   sukun, the dagger alif, and tatweel
//! - [`normalize_text`] trims and collapses whitespace runs
//! - [`char_bigrams`] produces character bigrams of a lemma (form features)
//! - [`gloss_tokens`] produces lowercased word tokens of a gloss (meaning
//!   features)
//!
//! The character classes are two fixed codepoint ranges, so these are plain
//! char matches rather than a regex engine.

use std::collections::BTreeSet;

/// True if `c` is an Arabic combining mark or tatweel to strip before
/// comparing forms: U+064B..U+065F (tanween, harakat, shadda, sukun, and
/// related marks), U+0670 (dagger alif), U+0640 (tatweel).
pub fn is_arabic_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}')
}

/// True if `c` is a bare Arabic letter: inside the Arabic block
/// (U+0600..U+06FF) and neither a diacritic, tatweel, digit, nor
/// punctuation.
pub fn is_arabic_letter(c: char) -> bool {
    if !('\u{0600}'..='\u{06FF}').contains(&c) {
        return false;
    }
    if is_arabic_diacritic(c) {
        return false;
    }
    // Arabic-Indic and extended digits, plus block-local punctuation.
    !matches!(c, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}' | '\u{0600}'..='\u{061F}' | '\u{066A}'..='\u{066D}' | '\u{06D4}')
}

/// True if `c` belongs to the Arabic block at all (letters, digits, marks).
pub fn is_arabic_block(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Remove Arabic diacritics, the dagger alif, and tatweel.
pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|c| !is_arabic_diacritic(*c)).collect()
}

/// Trim and collapse internal whitespace runs to single spaces.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character bigrams of a lemma, computed on the diacritic-stripped,
/// space-removed text.
///
/// A single remaining character yields a singleton set; empty text yields
/// an empty set.
pub fn char_bigrams(text: &str) -> BTreeSet<String> {
    let stripped: String = strip_diacritics(&normalize_text(text))
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    let chars: Vec<char> = stripped.chars().collect();
    match chars.len() {
        0 => BTreeSet::new(),
        1 => {
            let mut set = BTreeSet::new();
            set.insert(stripped);
            set
        }
        n => (0..n - 1)
            .map(|i| chars[i..i + 2].iter().collect())
            .collect(),
    }
}

/// Word tokens of a gloss: lowercased, split on any character that is
/// neither ASCII alphanumeric nor inside the Arabic block.
pub fn gloss_tokens(text: &str) -> BTreeSet<String> {
    normalize_text(text)
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || is_arabic_block(c)))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
