//! pipeline::steps::binary_root_lexicon
//!
//! Build the canonical binary-root lexicon.
//!
//! Joins the filtered word-root map with the enriched quran lemmas, keeps
//! records with a valid normalized root, derives each record's two-letter
//! nucleus, and deduplicates on (lemma, root_norm) with first-seen-wins
//! (the word-root map is read first, matching the join order of the
//! upstream data).

use std::collections::BTreeSet;

use super::StepError;
use crate::core::paths::ProjectPaths;
use crate::core::types::BinaryRoot;
use crate::lexicon::jsonl::{JsonlReader, JsonlWriter};
use crate::lexicon::record::LexiconRecord;

/// Run the step.
pub fn run(paths: &ProjectPaths) -> Result<usize, StepError> {
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
    let mut writer = JsonlWriter::create(&paths.binary_root_lexicon())?;

    let sources = [paths.word_root_map_filtered(), paths.quran_lemmas_enriched()];
    for source in &sources {
        for record in JsonlReader::<LexiconRecord>::open(source)? {
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

            let mut out = record.clone();
            out.root_norm = Some(root.as_str().to_string());
            out.binary_root = Some(BinaryRoot::of(&root).as_str().to_string());
            writer.write(&out)?;
        }
    }
    Ok(writer.finish()?)
}
