//! pipeline::steps::translit
//!
//! Enrich Buckwalter quran lemmas with Arabic script.
//!
//! The morphology ingest leaves lemma and root in Buckwalter
//! transliteration. This step converts both to Arabic script, keeps the
//! original Buckwalter text in `translit`, and retags the script.

use super::StepError;
use crate::core::paths::ProjectPaths;
use crate::core::types::RootNorm;
use crate::lexicon::jsonl::{JsonlReader, JsonlWriter};
use crate::lexicon::record::LexiconRecord;

/// Map one Buckwalter character to Arabic script.
///
/// Unknown characters pass through unchanged, which keeps mixed or
/// already-Arabic input harmless.
fn buckwalter_char(c: char) -> char {
    match c {
        '\'' => 'ء',
        '|' => 'آ',
        '>' => 'أ',
        '&' => 'ؤ',
        '<' => 'إ',
        '}' => 'ئ',
        'A' => 'ا',
        'b' => 'ب',
        'p' => 'ة',
        't' => 'ت',
        'v' => 'ث',
        'j' => 'ج',
        'H' => 'ح',
        'x' => 'خ',
        'd' => 'د',
        '*' => 'ذ',
        'r' => 'ر',
        'z' => 'ز',
        's' => 'س',
        '$' => 'ش',
        'S' => 'ص',
        'D' => 'ض',
        'T' => 'ط',
        'Z' => 'ظ',
        'E' => 'ع',
        'g' => 'غ',
        'f' => 'ف',
        'q' => 'ق',
        'k' => 'ك',
        'l' => 'ل',
        'm' => 'م',
        'n' => 'ن',
        'h' => 'ه',
        'w' => 'و',
        'Y' => 'ى',
        'y' => 'ي',
        'F' => 'ً',
        'N' => 'ٌ',
        'K' => 'ٍ',
        'a' => 'َ',
        'u' => 'ُ',
        'i' => 'ِ',
        '~' => 'ّ',
        'o' => 'ْ',
        '`' => 'ٰ',
        '{' => 'ٱ',
        '_' => 'ـ',
        other => other,
    }
}

/// Convert a Buckwalter string to Arabic script.
pub fn buckwalter_to_arabic(text: &str) -> String {
    text.chars().map(buckwalter_char).collect()
}

/// Run the step.
pub fn run(paths: &ProjectPaths) -> Result<usize, StepError> {
    let mut writer = JsonlWriter::create(&paths.quran_lemmas_enriched())?;

    for record in JsonlReader::<LexiconRecord>::open(&paths.quran_lemmas())? {
        let record = record?;
        let buckwalter = record.lemma().to_string();

        let mut enriched = record.clone();
        enriched.lemma = buckwalter_to_arabic(&buckwalter);
        enriched.translit = Some(buckwalter);
        enriched.script = Some("arab".to_string());

        if let Some(root_bw) = record.root.as_deref() {
            // Roots that survive validation move into root_norm; oddities
            // (hamza carriers, long-vowel radicals) stay in `root` raw.
            if let Ok(root) = RootNorm::new(buckwalter_to_arabic(root_bw)) {
                enriched.root_norm = Some(root.as_str().to_string());
            }
        }
        writer.write(&enriched)?;
    }
    Ok(writer.finish()?)
}
