//! Global pairwise alignment (minimum-cost Needleman-Wunsch) with diacritic-aware weights.

use ndarray::Array2;
use tracing::debug;

use crate::diacritics::are_equivalent;
use crate::error::CognateResult;
use crate::support::validate_word;
use crate::types::{Alignment, GAP};

/// Cost of aligning two symbols; `None` stands for the gap.
pub trait SubstitutionWeight {
    fn weight(&self, a: Option<char>, b: Option<char>) -> u32;
}

/// Free substitution between diacritic-equivalent characters, unit cost otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct DiacriticWeight;

impl SubstitutionWeight for DiacriticWeight {
    fn weight(&self, a: Option<char>, b: Option<char>) -> u32 {
        match (a, b) {
            (Some(x), Some(y)) if are_equivalent(x, y) => 0,
            _ => 1,
        }
    }
}

/// Plain character identity
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactWeight;

impl SubstitutionWeight for ExactWeight {
    fn weight(&self, a: Option<char>, b: Option<char>) -> u32 {
        match (a, b) {
            (Some(x), Some(y)) if x == y => 0,
            _ => 1,
        }
    }
}

/// Aligns input strings.
pub trait Aligner {
    /// Optimal alignment of the two words.
    fn align(&self, a: &str, b: &str) -> CognateResult<Alignment>;

    /// Minimum alignment cost of the two words.
    fn score(&self, a: &str, b: &str) -> CognateResult<u32>;

    /// Alignment rendered as `aligned1<separator>aligned2`.
    /// Example: `exhaustiv`, `esaustivo` -> `exhaustiv-_es-austivo`
    fn align_line(&self, a: &str, b: &str, separator: &str) -> CognateResult<String> {
        Ok(self.align(a, b)?.to_line(separator))
    }
}

/// Needleman-Wunsch as a cost minimization: lower is better, identical words cost 0.
#[derive(Debug, Clone, Default)]
pub struct NeedlemanWunsch<W = DiacriticWeight> {
    weight: W,
}

impl NeedlemanWunsch<DiacriticWeight> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: SubstitutionWeight> NeedlemanWunsch<W> {
    pub fn with_weight(weight: W) -> Self {
        Self { weight }
    }

    /// Cost matrix of shape (len(a) + 1, len(b) + 1)
    pub fn compute_matrix(&self, a: &[char], b: &[char]) -> Array2<u32> {
        let len_a = a.len();
        let len_b = b.len();

        let mut matrix = Array2::<u32>::zeros((len_a + 1, len_b + 1));

        for i in 1..=len_a {
            matrix[[i, 0]] = matrix[[i - 1, 0]] + self.weight.weight(Some(a[i - 1]), None);
        }
        for j in 1..=len_b {
            matrix[[0, j]] = matrix[[0, j - 1]] + self.weight.weight(None, Some(b[j - 1]));
        }

        for i in 1..=len_a {
            for j in 1..=len_b {
                let substitution =
                    matrix[[i - 1, j - 1]] + self.weight.weight(Some(a[i - 1]), Some(b[j - 1]));
                let deletion = matrix[[i - 1, j]] + self.weight.weight(Some(a[i - 1]), None);
                let insertion = matrix[[i, j - 1]] + self.weight.weight(None, Some(b[j - 1]));

                matrix[[i, j]] = substitution.min(deletion.min(insertion));
            }
        }

        matrix
    }
}

impl<W: SubstitutionWeight> Aligner for NeedlemanWunsch<W> {
    fn align(&self, a: &str, b: &str) -> CognateResult<Alignment> {
        validate_word(a)?;
        validate_word(b)?;
        debug!("Computing the Needleman-Wunsch alignment for {} {}", a, b);

        let chars_a: Vec<char> = a.chars().collect();
        let chars_b: Vec<char> = b.chars().collect();
        let matrix = self.compute_matrix(&chars_a, &chars_b);

        let mut i = chars_a.len();
        let mut j = chars_b.len();
        let mut aligned_a = Vec::with_capacity(i + j);
        let mut aligned_b = Vec::with_capacity(i + j);

        // Tie-break order: deletion from a, insertion from b, diagonal.
        while i > 0 || j > 0 {
            let current = matrix[[i, j]];

            if i > 0 && current == matrix[[i - 1, j]] + self.weight.weight(Some(chars_a[i - 1]), None)
            {
                aligned_a.push(chars_a[i - 1]);
                aligned_b.push(GAP);
                i -= 1;
            } else if j > 0
                && current == matrix[[i, j - 1]] + self.weight.weight(None, Some(chars_b[j - 1]))
            {
                aligned_a.push(GAP);
                aligned_b.push(chars_b[j - 1]);
                j -= 1;
            } else {
                // Border cells always match one of the moves above.
                debug_assert!(i > 0 && j > 0);
                aligned_a.push(chars_a[i - 1]);
                aligned_b.push(chars_b[j - 1]);
                i -= 1;
                j -= 1;
            }
        }

        Ok(Alignment {
            left: aligned_a.into_iter().rev().collect(),
            right: aligned_b.into_iter().rev().collect(),
        })
    }

    fn score(&self, a: &str, b: &str) -> CognateResult<u32> {
        validate_word(a)?;
        validate_word(b)?;
        debug!("Computing the Needleman-Wunsch alignment score for {} {}", a, b);

        let chars_a: Vec<char> = a.chars().collect();
        let chars_b: Vec<char> = b.chars().collect();
        let matrix = self.compute_matrix(&chars_a, &chars_b);

        Ok(matrix[[chars_a.len(), chars_b.len()]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CognateError;

    #[test]
    fn test_reference_alignment() {
        let nw = NeedlemanWunsch::new();
        assert_eq!(
            nw.align_line("exhaustiv", "esaustivo", "_").unwrap(),
            "exhaustiv-_es-austivo"
        );
        assert_eq!(nw.score("exhaustiv", "esaustivo").unwrap(), 3);
    }

    #[test]
    fn test_tie_break_prefers_gaps_at_the_end() {
        let nw = NeedlemanWunsch::new();
        let alignment = nw.align("an", "anno").unwrap();
        assert_eq!(alignment.left, "an--");
        assert_eq!(alignment.right, "anno");
    }

    #[test]
    fn test_identical_words() {
        let nw = NeedlemanWunsch::new();
        let alignment = nw.align("langue", "langue").unwrap();
        assert!(!alignment.has_gaps());
        assert_eq!(nw.score("langue", "langue").unwrap(), 0);
    }

    #[test]
    fn test_diacritics_are_free() {
        let nw = NeedlemanWunsch::new();
        assert_eq!(nw.score("espérer", "esperer").unwrap(), 0);

        let strict = NeedlemanWunsch::with_weight(ExactWeight);
        assert_eq!(strict.score("espérer", "esperer").unwrap(), 1);
    }

    #[test]
    fn test_empty_words() {
        let nw = NeedlemanWunsch::new();
        assert_eq!(nw.align_line("", "", "_").unwrap(), "_");
        assert_eq!(nw.align_line("abc", "", "_").unwrap(), "abc_---");
        assert_eq!(nw.align_line("", "ab", "_").unwrap(), "--_ab");
        assert_eq!(nw.score("", "ab").unwrap(), 2);
    }

    #[test]
    fn test_matrix_borders() {
        let nw = NeedlemanWunsch::new();
        let a: Vec<char> = "ab".chars().collect();
        let b: Vec<char> = "abc".chars().collect();
        let matrix = nw.compute_matrix(&a, &b);
        assert_eq!(matrix.shape(), &[3, 4]);
        assert_eq!(matrix[[2, 0]], 2);
        assert_eq!(matrix[[0, 3]], 3);
        assert_eq!(matrix[[2, 3]], 1);
    }

    #[test]
    fn test_gap_in_input_is_rejected() {
        let nw = NeedlemanWunsch::new();
        assert!(matches!(
            nw.align("a-b", "ab"),
            Err(CognateError::InvalidInput(_))
        ));
        assert!(nw.score("ab", "a\0").is_err());
    }
}
