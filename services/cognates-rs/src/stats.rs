//! Descriptive statistics over aligned corpora and reconstruction outputs.

use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CognateError, CognateResult};
use crate::metrics::{Edit, Metric};
use crate::types::Alignment;

/// Enough fractional digits to print any `f64` exactly (the smallest subnormal has 1074).
const EXACT_DIGITS: usize = 1100;

/// Round half up to `digits` decimals, applied to the exact binary value of `value`
/// (`0.15` is stored as `0.1499...` and rounds to `0.1`).
pub fn round_half_up(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(digits))
        .map(|b| b - b'0')
        .collect();

    if fraction.as_bytes().get(digits).is_some_and(|&b| b >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let split = kept.len() - digits;
    let render = |ds: &[u8]| -> String { ds.iter().map(|d| char::from(b'0' + d)).collect() };
    let text = if digits == 0 {
        render(&kept)
    } else {
        format!("{}.{}", render(&kept[..split]), render(&kept[split..]))
    };

    text.parse::<f64>()
        .map(|rounded| rounded.copysign(value))
        .unwrap_or(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorpusStatistics {
    pub pairs: usize,
    pub mean_source_length: f64,
    pub mean_target_length: f64,
    pub mean_edit_distance: f64,
}

impl CorpusStatistics {
    /// Means over the gap-free words, rounded to 2 decimals.
    pub fn from_alignments(alignments: &[Alignment]) -> CognateResult<Self> {
        if alignments.is_empty() {
            return Err(CognateError::InvalidInput(
                "cannot compute statistics of an empty corpus".to_string(),
            ));
        }

        let mut source_sum = 0usize;
        let mut target_sum = 0usize;
        let mut distance_sum = 0.0;

        for alignment in alignments {
            let source = alignment.source();
            let target = alignment.target();
            source_sum += source.chars().count();
            target_sum += target.chars().count();
            distance_sum += Edit.distance(&source, &target)?;
        }

        let count = alignments.len() as f64;
        Ok(Self {
            pairs: alignments.len(),
            mean_source_length: round_half_up(source_sum as f64 / count, 2),
            mean_target_length: round_half_up(target_sum as f64 / count, 2),
            mean_edit_distance: round_half_up(distance_sum / count, 2),
        })
    }
}

impl fmt::Display for CorpusStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "left avg word length: {}", self.mean_source_length)?;
        writeln!(f, "right avg word length: {}", self.mean_target_length)?;
        write!(f, "avg edit distance: {}", self.mean_edit_distance)
    }
}

/// Share of lines (percent, 1 decimal) per normalized edit distance (1 decimal)
/// between the gold form and the first produced form.
///
/// Lines look like `lang_gold_prod1 | prod2 | ...`.
pub fn edit_distance_histogram<S: AsRef<str>>(
    lines: &[S],
) -> CognateResult<BTreeMap<OrderedFloat<f64>, f64>> {
    let mut counts: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();

    for line in lines {
        let line = line.as_ref();
        let fields: Vec<&str> = line.split('_').collect();
        if fields.len() < 3 {
            return Err(CognateError::InvalidInput(format!(
                "expected lang_gold_produced, got {:?}",
                line
            )));
        }
        let gold = fields[1];
        let produced = fields[2].split(" | ").next().unwrap_or_default().trim();

        let distance = round_half_up(Edit.distance(gold, produced)?, 1);
        *counts.entry(OrderedFloat(distance)).or_insert(0) += 1;
    }

    let total = lines.len() as f64;
    Ok(counts
        .into_iter()
        .map(|(distance, count)| (distance, round_half_up(count as f64 * 100.0 / total, 1)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.25, 1), 0.3);
        // stored below the midpoint
        assert_eq!(round_half_up(0.15, 1), 0.1);
        assert_eq!(round_half_up(0.35, 1), 0.3);
        assert_eq!(round_half_up(9.96, 1), 10.0);
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_half_up(1.0, 2), 1.0);
    }

    #[test]
    fn test_corpus_statistics() {
        let alignments = vec![
            Alignment::parse("exhaustiv-_es-austivo", "_").unwrap(),
            Alignment::parse("an--_anno", "_").unwrap(),
        ];
        let stats = CorpusStatistics::from_alignments(&alignments).unwrap();

        assert_eq!(stats.pairs, 2);
        assert_eq!(stats.mean_source_length, 5.5);
        assert_eq!(stats.mean_target_length, 6.5);
        // (3/9 + 2/4) / 2
        assert_eq!(stats.mean_edit_distance, 0.42);
        assert!(stats.to_string().starts_with("left avg word length: 5.5\n"));
    }

    #[test]
    fn test_empty_corpus() {
        assert!(CorpusStatistics::from_alignments(&[]).is_err());
    }

    #[test]
    fn test_histogram() {
        let lines = [
            "it_lapte_lapte | late",
            "it_noapte_notte",
            "it_an_anno | an",
            "it_lingua_lingua",
        ];
        let histogram = edit_distance_histogram(&lines).unwrap();

        let entries: Vec<(f64, f64)> = histogram.into_iter().map(|(k, v)| (k.0, v)).collect();
        // noapte/notte = 2/6 -> 0.3
        assert_eq!(entries, vec![(0.0, 50.0), (0.3, 25.0), (0.5, 25.0)]);
    }

    #[test]
    fn test_histogram_rejects_short_lines() {
        assert!(edit_distance_histogram(&["lapte"]).is_err());
    }
}
