//! pipeline::steps::quran_morphology
//!
//! Parse the Quranic Arabic Corpus morphology file into lemma records.
//!
//! # Input Format
//!
//! Tab-separated, one morphological segment per line:
//!
//! ```text
//! LOCATION<TAB>FORM<TAB>TAG<TAB>FEATURES
//! (1:1:2:1)    Hamod    N    STEM|POS:N|LEM:Hamod|ROOT:Hmd|M|GEN
//! ```
//!
//! Lines starting with `#` are comments. FEATURES is pipe-separated;
//! `LEM:` and `ROOT:` values are Buckwalter transliteration. Lemma and
//! root text stay in Buckwalter here; the enrichment step converts to
//! Arabic script.
//!
//! # Output
//!
//! One record per distinct (lemma, root) pair, in first-seen order, to the
//! intermediate `quran_lemmas.jsonl`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

use super::StepError;
use crate::core::config::Config;
use crate::core::paths::ProjectPaths;
use crate::lexicon::jsonl::JsonlWriter;
use crate::lexicon::record::LexiconRecord;

/// Script tag for unenriched Buckwalter text.
pub const BUCKWALTER_SCRIPT: &str = "buckwalter";

/// Extract the value of a `KEY:` feature from a pipe-separated feature list.
fn feature_value<'a>(features: &'a str, key: &str) -> Option<&'a str> {
    features
        .split('|')
        .find_map(|seg| seg.strip_prefix(key))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse one morphology line into (lemma, optional root).
///
/// Returns None for comments, blanks, and segments without a `LEM:`
/// feature (prefixes, suffixes, particles).
fn parse_line(line: &str) -> Result<Option<(String, Option<String>)>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let mut cols = trimmed.split('\t');
    let _location = cols.next();
    let _form = cols.next();
    let _tag = cols.next();
    let features = match cols.next() {
        Some(f) => f,
        None => return Err("expected 4 tab-separated columns".to_string()),
    };

    let lemma = match feature_value(features, "LEM:") {
        Some(lem) => lem.to_string(),
        None => return Ok(None),
    };
    let root = feature_value(features, "ROOT:").map(str::to_string);
    Ok(Some((lemma, root)))
}

/// Run the step.
pub fn run(paths: &ProjectPaths, config: &Config) -> Result<usize, StepError> {
    let input = paths.quran_morphology();
    let file = File::open(&input)?;
    let language = config.language();

    let mut seen: BTreeSet<(String, Option<String>)> = BTreeSet::new();
    let mut writer = JsonlWriter::create(&paths.quran_lemmas())?;

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let parsed = parse_line(&line).map_err(|message| StepError::Format {
            path: input.clone(),
            line: idx + 1,
            message,
        })?;
        let (lemma, root) = match parsed {
            Some(pair) => pair,
            None => continue,
        };
        if !seen.insert((lemma.clone(), root.clone())) {
            continue;
        }

        let record = LexiconRecord {
            lemma,
            root,
            language: Some(language.clone()),
            script: Some(BUCKWALTER_SCRIPT.to_string()),
            stage: Some("quran".to_string()),
            source: Some("quran-morphology".to_string()),
            ..Default::default()
        };
        writer.write(&record)?;
    }
    Ok(writer.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::jsonl::read_all;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
# Quranic Arabic Corpus morphology (sample)
(1:1:1:1)\tbi\tP\tPREFIX|bi+
(1:1:1:2)\tsomi\tN\tSTEM|POS:N|LEM:{som|ROOT:smw|M|GEN
(1:1:2:1)\t{ll~ahi\tPN\tSTEM|POS:PN|LEM:{ll~ah|ROOT:Alh|GEN
(1:2:2:1)\tll~ahi\tPN\tSTEM|POS:PN|LEM:{ll~ah|ROOT:Alh|GEN

(1:3:1:1)\t{l\tDET\tPREFIX|Al+
";

    fn project_with_sample(sample: &str) -> (TempDir, ProjectPaths) {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());
        let input = paths.quran_morphology();
        std::fs::create_dir_all(input.parent().unwrap()).unwrap();
        std::fs::write(&input, sample).unwrap();
        (dir, paths)
    }

    #[test]
    fn feature_extraction() {
        let features = "STEM|POS:N|LEM:{som|ROOT:smw|M|GEN";
        assert_eq!(feature_value(features, "LEM:"), Some("{som"));
        assert_eq!(feature_value(features, "ROOT:"), Some("smw"));
        assert_eq!(feature_value(features, "SP:"), None);
    }

    #[test]
    fn parses_and_deduplicates_lemmas() {
        let (_dir, paths) = project_with_sample(SAMPLE);
        let written = run(&paths, &Config::default()).unwrap();
        assert_eq!(written, 2);

        let rows: Vec<LexiconRecord> = read_all(&paths.quran_lemmas()).unwrap();
        assert_eq!(rows[0].lemma, "{som");
        assert_eq!(rows[0].root.as_deref(), Some("smw"));
        assert_eq!(rows[0].script.as_deref(), Some(BUCKWALTER_SCRIPT));
        assert_eq!(rows[0].stage.as_deref(), Some("quran"));
        // The repeated {ll~ah segment collapses into one record.
        assert_eq!(rows[1].lemma, "{ll~ah");
    }

    #[test]
    fn malformed_line_reports_location() {
        let (_dir, paths) = project_with_sample("(1:1:1:1) no tabs here at all\n");
        let err = run(&paths, &Config::default()).unwrap_err();
        match err {
            StepError::Format { line, .. } => assert_eq!(line, 1),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn segments_without_lemma_are_skipped() {
        let (_dir, paths) =
            project_with_sample("(1:1:1:1)\tbi\tP\tPREFIX|bi+\n# comment\n\n");
        let written = run(&paths, &Config::default()).unwrap();
        assert_eq!(written, 0);
    }
}
