//! Contrastive n-gram features over an alignment, for binary cognate classifiers.

use tracing::debug;

use crate::align::{Aligner, NeedlemanWunsch};
use crate::error::{CognateError, CognateResult};
use crate::types::{Alignment, FeatureSet, LabeledInstance, GAP};

/// Sentinel padding both aligned strings
pub const BOUNDARY: char = '$';

/// Aligned fragment pairs that differ, for every window size in `[1 or n, n]`.
///
/// Both sides are padded with `$` so that word boundaries show up in the features.
/// Features are keyed `source_target`.
pub fn contrastive_features(alignment: &Alignment, n: usize, use_range: bool) -> FeatureSet {
    let padded = |s: &str| -> Vec<char> {
        std::iter::once(BOUNDARY)
            .chain(s.chars())
            .chain(std::iter::once(BOUNDARY))
            .collect()
    };
    let left = padded(&alignment.left);
    let right = padded(&alignment.right);

    let smallest = if use_range { 1 } else { n };
    let mut features = FeatureSet::new();

    for k in smallest.max(1)..=n {
        for (source, target) in left.windows(k).zip(right.windows(k)) {
            if source != target || source.contains(&GAP) || target.contains(&GAP) {
                let source: String = source.iter().collect();
                let target: String = target.iter().collect();
                features.insert(format!("{}_{}", source, target));
            }
        }
    }

    features
}

/// Aligns word pairs and turns them into contrastive feature sets.
#[derive(Debug, Clone)]
pub struct ContrastiveExtractor<A = NeedlemanWunsch> {
    aligner: A,
    ngram_size: usize,
    use_range: bool,
}

impl ContrastiveExtractor<NeedlemanWunsch> {
    pub fn new(ngram_size: usize, use_range: bool) -> CognateResult<Self> {
        Self::with_aligner(NeedlemanWunsch::new(), ngram_size, use_range)
    }
}

impl<A: Aligner> ContrastiveExtractor<A> {
    pub fn with_aligner(aligner: A, ngram_size: usize, use_range: bool) -> CognateResult<Self> {
        if ngram_size == 0 {
            return Err(CognateError::invalid_parameter(
                "ngram_size",
                "n-gram size must be at least 1",
            ));
        }
        Ok(Self {
            aligner,
            ngram_size,
            use_range,
        })
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Features of a pair that is already aligned.
    pub fn alignment_features(&self, alignment: &Alignment) -> FeatureSet {
        contrastive_features(alignment, self.ngram_size, self.use_range)
    }

    pub fn features(&self, a: &str, b: &str) -> CognateResult<FeatureSet> {
        let alignment = self.aligner.align(a, b)?;
        Ok(self.alignment_features(&alignment))
    }

    /// Labeled instance for one pair, or `None` when the alignment yields no feature.
    pub fn instance(&self, a: &str, b: &str, label: &str) -> CognateResult<Option<LabeledInstance>> {
        let features = self.features(a, b)?;
        if features.is_empty() {
            debug!("No features for pair {} {}", a, b);
            return Ok(None);
        }
        Ok(Some(LabeledInstance::new(features, label.to_string())))
    }
}
