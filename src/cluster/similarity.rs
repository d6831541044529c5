//! cluster::similarity
//!
//! Jaccard similarity and pairwise similarity matrices.
//!
//! Two lightweight signals per record pair:
//! - **form**: Jaccard over lemma character bigrams (Arabic script)
//! - **meaning**: Jaccard over gloss word tokens
//!
//! Both are intentionally model-free. Embedding-based similarities can be
//! swapped in later behind the same matrix contract.

use std::collections::BTreeSet;

use crate::lexicon::normalize::{char_bigrams, gloss_tokens};

/// Jaccard similarity of two sets. Empty-vs-anything is 0.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}

/// Symmetric similarity matrix with a unit diagonal.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    fn identity(n: usize) -> Self {
        let mut matrix = Self {
            n,
            data: vec![0.0; n * n],
        };
        for i in 0..n {
            matrix.set(i, i, 1.0);
        }
        matrix
    }

    /// Matrix dimension.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for the 0x0 matrix.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity of records `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
        self.data[j * self.n + i] = value;
    }
}

/// Build a similarity matrix from per-record feature sets.
pub fn matrix_from_features<T: Ord>(features: &[BTreeSet<T>]) -> SimilarityMatrix {
    let n = features.len();
    let mut matrix = SimilarityMatrix::identity(n);
    for i in 0..n {
        for j in (i + 1)..n {
            matrix.set(i, j, jaccard(&features[i], &features[j]));
        }
    }
    matrix
}

/// Build the form matrix (lemma character bigrams) for a group.
pub fn form_matrix(lemmas: &[&str]) -> SimilarityMatrix {
    let features: Vec<_> = lemmas.iter().map(|l| char_bigrams(l)).collect();
    matrix_from_features(&features)
}

/// Build the meaning matrix (gloss word tokens) for a group.
pub fn meaning_matrix(glosses: &[&str]) -> SimilarityMatrix {
    let features: Vec<_> = glosses.iter().map(|g| gloss_tokens(g)).collect();
    matrix_from_features(&features)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn jaccard_basics() {
        let a = set(&["ab", "bc"]);
        let b = set(&["bc", "cd"]);
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(jaccard(&a, &a), 1.0);
        assert_eq!(jaccard(&a, &BTreeSet::new()), 0.0);
        assert_eq!(jaccard::<String>(&BTreeSet::new(), &BTreeSet::new()), 0.0);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let matrix = form_matrix(&["كتاب", "كاتب", "قلم"]);
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn identical_lemmas_have_full_form_similarity() {
        let matrix = form_matrix(&["كِتَاب", "كتاب"]);
        assert_eq!(matrix.get(0, 1), 1.0);
    }

    #[test]
    fn empty_glosses_have_zero_meaning_similarity() {
        let matrix = meaning_matrix(&["", ""]);
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn shared_gloss_tokens_raise_meaning_similarity() {
        let matrix = meaning_matrix(&["to write", "to write down", "a reed pen"]);
        assert!(matrix.get(0, 1) > matrix.get(0, 2));
    }
}
