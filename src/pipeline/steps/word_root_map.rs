//! pipeline::steps::word_root_map
//!
//! Ingest and clean the word-to-root CSV map.
//!
//! # Ingest
//!
//! The source CSV has `word` and `root` columns (extra columns are
//! ignored; header names are matched case-insensitively). Rows become raw
//! lexicon records in the intermediate `word_root_map.jsonl`.
//!
//! # Clean
//!
//! Filtering drops rows whose root fails validation (not 2-5 Arabic
//! letters after normalization) or whose lemma is empty, normalizes the
//! root into `root_norm`, and deduplicates on (lemma, root_norm).

use std::collections::BTreeSet;

use super::StepError;
use crate::core::config::Config;
use crate::core::paths::ProjectPaths;
use crate::lexicon::jsonl::{JsonlReader, JsonlWriter};
use crate::lexicon::record::LexiconRecord;

/// Ingest the CSV into raw JSONL records.
pub fn ingest(paths: &ProjectPaths, config: &Config) -> Result<usize, StepError> {
    let input = paths.word_root_map_csv();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&input)
        .map_err(|e| StepError::Csv {
            path: input.clone(),
            message: e.to_string(),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| StepError::Csv {
            path: input.clone(),
            message: e.to_string(),
        })?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| StepError::Csv {
                path: input.clone(),
                message: format!("missing '{}' column", name),
            })
    };
    let word_col = column("word")?;
    let root_col = column("root")?;

    let language = config.language();
    let mut writer = JsonlWriter::create(&paths.word_root_map())?;

    for row in reader.records() {
        let row = row.map_err(|e| StepError::Csv {
            path: input.clone(),
            message: e.to_string(),
        })?;
        let word = row.get(word_col).unwrap_or("").trim();
        let root = row.get(root_col).unwrap_or("").trim();
        if word.is_empty() {
            continue;
        }

        let record = LexiconRecord {
            lemma: word.to_string(),
            root: (!root.is_empty()).then(|| root.to_string()),
            language: Some(language.clone()),
            script: Some("arab".to_string()),
            stage: Some("lexicon".to_string()),
            source: Some("word_root_map".to_string()),
            ..Default::default()
        };
        writer.write(&record)?;
    }
    Ok(writer.finish()?)
}

/// Clean the ingested map into the filtered lexicon file.
pub fn clean(paths: &ProjectPaths) -> Result<usize, StepError> {
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
    let mut writer = JsonlWriter::create(&paths.word_root_map_filtered())?;

    for record in JsonlReader::<LexiconRecord>::open(&paths.word_root_map())? {
        let record = record?;
        if record.lemma().is_empty() {
            continue;
        }
        let root = match record.parsed_root() {
            Ok(root) => root,
            Err(_) => continue,
        };

        let key = (record.lemma().to_string(), root.as_str().to_string());
        if !seen.insert(key) {
            continue;
        }

        let mut cleaned = record.clone();
        cleaned.root_norm = Some(root.as_str().to_string());
        writer.write(&cleaned)?;
    }
    Ok(writer.finish()?)
}
