//! Shared data structures for the cognate detection kernel.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{CognateError, CognateResult};

/// Gap marker in aligned strings
pub const GAP: char = '-';

/// Default separator between the two halves of an alignment line
pub const DEFAULT_SEPARATOR: &str = "_";

/// Bag of contrastive features (`source_target` keys)
pub type FeatureSet = AHashSet<String>;

/// Pair of equal-length aligned strings over characters and the gap marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub left: String,
    pub right: String,
}

impl Alignment {
    /// Build an alignment, checking column count and that no column is a double gap.
    pub fn new(left: String, right: String) -> CognateResult<Self> {
        let left_len = left.chars().count();
        let right_len = right.chars().count();
        if left_len != right_len {
            return Err(CognateError::MalformedAlignment(format!(
                "aligned strings differ in length: {} vs {}",
                left_len, right_len
            )));
        }

        if left
            .chars()
            .zip(right.chars())
            .any(|(l, r)| l == GAP && r == GAP)
        {
            return Err(CognateError::MalformedAlignment(format!(
                "both sides are gaps in the same column: {} / {}",
                left, right
            )));
        }

        Ok(Self { left, right })
    }

    /// Parse an `aligned1<separator>aligned2` line.
    pub fn parse(line: &str, separator: &str) -> CognateResult<Self> {
        let mut parts = line.trim_end_matches(['\r', '\n']).split(separator);
        match (parts.next(), parts.next()) {
            (Some(left), Some(right)) => Self::new(left.to_string(), right.to_string()),
            _ => Err(CognateError::MalformedAlignment(format!(
                "missing separator {:?} in line {:?}",
                separator, line
            ))),
        }
    }

    pub fn to_line(&self, separator: &str) -> String {
        format!("{}{}{}", self.left, separator, self.right)
    }

    /// Number of aligned columns
    pub fn len(&self) -> usize {
        self.left.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// First word, gaps removed
    pub fn source(&self) -> String {
        self.left.chars().filter(|&c| c != GAP).collect()
    }

    /// Second word, gaps removed
    pub fn target(&self) -> String {
        self.right.chars().filter(|&c| c != GAP).collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.left.chars().zip(self.right.chars())
    }

    pub fn has_gaps(&self) -> bool {
        self.left.contains(GAP) || self.right.contains(GAP)
    }

    /// Substitution pairs (columns where both sides are characters and differ)
    pub fn correspondences(&self) -> Vec<(char, char)> {
        self.columns()
            .filter(|&(l, r)| l != r && l != GAP && r != GAP)
            .collect()
    }
}

/// Feature set of one word pair together with its class label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledInstance {
    pub features: Vec<String>,
    pub label: String,
}

impl LabeledInstance {
    /// Features are stored sorted so that serialized output is reproducible.
    pub fn new(features: FeatureSet, label: String) -> Self {
        let mut features: Vec<String> = features.into_iter().collect();
        features.sort();
        Self { features, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alignment() {
        let alignment = Alignment::parse("exhaustiv-_es-austivo", "_").unwrap();
        assert_eq!(alignment.left, "exhaustiv-");
        assert_eq!(alignment.right, "es-austivo");
        assert_eq!(alignment.source(), "exhaustiv");
        assert_eq!(alignment.target(), "esaustivo");
        assert_eq!(alignment.len(), 10);
        assert_eq!(alignment.to_line("_"), "exhaustiv-_es-austivo");
    }

    #[test]
    fn test_malformed_alignments() {
        assert!(Alignment::parse("abc_ab", "_").is_err());
        assert!(Alignment::parse("a-_b-", "_").is_err());
        assert!(Alignment::parse("abc", "_").is_err());
    }

    #[test]
    fn test_correspondences() {
        let alignment = Alignment::parse("exhaustiv-_es-austivo", "_").unwrap();
        assert_eq!(alignment.correspondences(), vec![('x', 's')]);
    }
}
