//! lexicon
//!
//! JSONL record schema, line-oriented I/O, and Arabic text normalization.
//!
//! # Responsibilities
//!
//! - Define the lexicon record shape shared by every pipeline stage
//! - Read and write JSONL with precise, line-numbered errors
//! - Normalize Arabic text and build similarity features

pub mod jsonl;
pub mod normalize;
pub mod record;

pub use jsonl::{JsonlError, JsonlReader, JsonlWriter};
pub use record::LexiconRecord;
