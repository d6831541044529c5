//! cli::commands::stats
//!
//! Handler for `lx stats`.
//!
//! Buckets a lexicon by binary root and prints the largest buckets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::cli::Context;
use crate::lexicon::jsonl::{JsonlError, JsonlReader};
use crate::lexicon::record::LexiconRecord;
use crate::ui::output;

/// Bucket counts for one lexicon file.
#[derive(Debug, Default)]
pub struct LexiconStats {
    pub rows: usize,
    pub rootless: usize,
    pub buckets: BTreeMap<String, usize>,
}

impl LexiconStats {
    /// Buckets sorted by descending count, ties by nucleus.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .buckets
            .iter()
            .map(|(nucleus, count)| (nucleus.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Count records per binary-root bucket.
pub fn collect_stats(path: &Path) -> Result<LexiconStats, JsonlError> {
    let mut stats = LexiconStats::default();
    for record in JsonlReader::<LexiconRecord>::open(path)? {
        let record = record?;
        stats.rows += 1;
        match record.binary_root() {
            Some(nucleus) => *stats.buckets.entry(nucleus.to_string()).or_insert(0) += 1,
            None => stats.rootless += 1,
        }
    }
    Ok(stats)
}

pub fn execute(ctx: Context, input: Option<PathBuf>, top: usize) -> anyhow::Result<ExitCode> {
    let input = input.unwrap_or_else(|| ctx.paths.binary_root_lexicon());
    let stats = collect_stats(&input)?;

    output::print(
        format!(
            "{} rows, {} binary-root buckets, {} rootless",
            stats.rows,
            stats.buckets.len(),
            stats.rootless,
        ),
        ctx.verbosity,
    );
    for (nucleus, count) in stats.top(top) {
        println!("{:>8}  {}", count, nucleus);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::jsonl::write_all;
    use tempfile::TempDir;

    fn record(lemma: &str, binary_root: Option<&str>) -> LexiconRecord {
        LexiconRecord {
            lemma: lemma.into(),
            binary_root: binary_root.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn buckets_and_ranks_by_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lexicon.jsonl");
        write_all(
            &path,
            &[
                record("كتاب", Some("كت")),
                record("كاتب", Some("كت")),
                record("قلم", Some("قل")),
                record("دخيل", None),
            ],
        )
        .unwrap();

        let stats = collect_stats(&path).unwrap();
        assert_eq!(stats.rows, 4);
        assert_eq!(stats.rootless, 1);
        assert_eq!(stats.top(10), vec![("كت", 2), ("قل", 1)]);
        assert_eq!(stats.top(1), vec![("كت", 2)]);
    }
}
