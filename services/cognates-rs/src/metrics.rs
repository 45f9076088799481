//! String and token-sequence distance metrics.
//!
//! Every metric returns values normalized to [0, 1]; similarity is `1 - distance`.
//! Character metrics work on Unicode scalar values, token metrics on `&str` tokens.

use ahash::{AHashMap, AHashSet};
use ndarray::Array2;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CognateError, CognateResult};
use crate::support::{unique_ngrams, unique_token_ngrams};

/// Default n-gram size for Dice and Jaccard
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Distance or similarity between two strings or two token sequences.
pub trait Metric: Send + Sync {
    fn name(&self) -> &'static str;

    /// Normalized distance between the input strings
    fn distance(&self, a: &str, b: &str) -> CognateResult<f64>;

    /// Similarity between the input strings (1 - normalized distance)
    fn similarity(&self, a: &str, b: &str) -> CognateResult<f64> {
        Ok(1.0 - self.distance(a, b)?)
    }

    fn distance_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64>;

    fn similarity_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        Ok(1.0 - self.distance_tokens(a, b)?)
    }
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// raw / max(len), with 0 for two empty inputs
fn normalize_by_max_len(raw: usize, len_a: usize, len_b: usize) -> f64 {
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        0.0
    } else {
        raw as f64 / max_len as f64
    }
}

// ============================================================================
// EDIT
// ============================================================================

/// Edit distance by memoized recursion over suffix pairs.
///
/// The memo lives for a single top-level call and is keyed by the offsets of the
/// remaining suffixes, so unrelated pairs never share entries.
struct SuffixEdit<'a, T> {
    a: &'a [T],
    b: &'a [T],
    memo: FxHashMap<(usize, usize), usize>,
}

impl<'a, T: PartialEq> SuffixEdit<'a, T> {
    fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self {
            a,
            b,
            memo: FxHashMap::default(),
        }
    }

    fn distance(&mut self, i: usize, j: usize) -> usize {
        if let Some(&known) = self.memo.get(&(i, j)) {
            return known;
        }

        let rest_a = self.a.len() - i;
        let rest_b = self.b.len() - j;
        if rest_a == 0 {
            return rest_b;
        }
        if rest_b == 0 {
            return rest_a;
        }

        let cost = if self.a[i] == self.b[j] { 0 } else { 1 };
        let distance = std::cmp::min(
            std::cmp::min(self.distance(i + 1, j) + 1, self.distance(i, j + 1) + 1),
            self.distance(i + 1, j + 1) + cost,
        );

        self.memo.insert((i, j), distance);
        distance
    }
}

fn edit_count<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    SuffixEdit::new(a, b).distance(0, 0)
}

/// Levenshtein distance with unit costs
#[derive(Debug, Clone, Copy, Default)]
pub struct Edit;

impl Edit {
    /// Number of insert/delete/substitute operations turning `a` into `b`
    pub fn unnormalized_distance(&self, a: &str, b: &str) -> usize {
        debug!("Computing the edit distance between strings {} {}", a, b);
        edit_count(&chars(a), &chars(b))
    }

    pub fn unnormalized_distance_tokens(&self, a: &[&str], b: &[&str]) -> usize {
        debug!("Computing the edit distance between sequences {:?} {:?}", a, b);
        edit_count(a, b)
    }
}

impl Metric for Edit {
    fn name(&self) -> &'static str {
        "Edit"
    }

    fn distance(&self, a: &str, b: &str) -> CognateResult<f64> {
        let raw = self.unnormalized_distance(a, b);
        Ok(normalize_by_max_len(raw, a.chars().count(), b.chars().count()))
    }

    fn distance_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        let raw = self.unnormalized_distance_tokens(a, b);
        Ok(normalize_by_max_len(raw, a.len(), b.len()))
    }
}

// ============================================================================
// HAMMING
// ============================================================================

fn hamming_count<T: PartialEq>(a: &[T], b: &[T]) -> CognateResult<usize> {
    if a.len() != b.len() {
        return Err(CognateError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Positional mismatches; only defined for inputs of equal length
#[derive(Debug, Clone, Copy, Default)]
pub struct Hamming;

impl Hamming {
    pub fn unnormalized_distance(&self, a: &str, b: &str) -> CognateResult<usize> {
        hamming_count(&chars(a), &chars(b))
    }
}

impl Metric for Hamming {
    fn name(&self) -> &'static str {
        "Hamming"
    }

    fn distance(&self, a: &str, b: &str) -> CognateResult<f64> {
        let a = chars(a);
        let b = chars(b);
        let raw = hamming_count(&a, &b)?;
        Ok(normalize_by_max_len(raw, a.len(), b.len()))
    }

    fn distance_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        let raw = hamming_count(a, b)?;
        Ok(normalize_by_max_len(raw, a.len(), b.len()))
    }
}

// ============================================================================
// DICE / JACCARD
// ============================================================================

struct Overlap {
    common: usize,
    left: usize,
    right: usize,
    union: usize,
}

fn overlap(a: &AHashSet<String>, b: &AHashSet<String>) -> Overlap {
    let common = a.intersection(b).count();
    Overlap {
        common,
        left: a.len(),
        right: b.len(),
        union: a.len() + b.len() - common,
    }
}

fn check_ngram_size(n: usize) -> CognateResult<()> {
    if n == 0 {
        return Err(CognateError::invalid_parameter(
            "ngram_size",
            "n-gram size must be at least 1",
        ));
    }
    Ok(())
}

/// Dice coefficient over distinct n-grams
#[derive(Debug, Clone, Copy)]
pub struct Dice {
    pub n: usize,
}

impl Default for Dice {
    fn default() -> Self {
        Self {
            n: DEFAULT_NGRAM_SIZE,
        }
    }
}

impl Dice {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    fn coefficient(overlap: Overlap) -> f64 {
        if overlap.union == 0 {
            return 1.0;
        }
        2.0 * overlap.common as f64 / (overlap.left + overlap.right) as f64
    }
}

impl Metric for Dice {
    fn name(&self) -> &'static str {
        "Dice"
    }

    fn distance(&self, a: &str, b: &str) -> CognateResult<f64> {
        Ok(1.0 - self.similarity(a, b)?)
    }

    fn similarity(&self, a: &str, b: &str) -> CognateResult<f64> {
        check_ngram_size(self.n)?;
        debug!(
            "Computing the Dice similarity between strings {} {} using {}-grams",
            a, b, self.n
        );
        let shared = overlap(&unique_ngrams(a, self.n), &unique_ngrams(b, self.n));
        Ok(Self::coefficient(shared))
    }

    fn distance_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        Ok(1.0 - self.similarity_tokens(a, b)?)
    }

    fn similarity_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        check_ngram_size(self.n)?;
        let shared = overlap(
            &unique_token_ngrams(a, self.n),
            &unique_token_ngrams(b, self.n),
        );
        Ok(Self::coefficient(shared))
    }
}

/// Jaccard index over distinct n-grams
#[derive(Debug, Clone, Copy)]
pub struct Jaccard {
    pub n: usize,
}

impl Default for Jaccard {
    fn default() -> Self {
        Self {
            n: DEFAULT_NGRAM_SIZE,
        }
    }
}

impl Jaccard {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    fn index(overlap: Overlap) -> f64 {
        if overlap.union == 0 {
            return 1.0;
        }
        overlap.common as f64 / overlap.union as f64
    }
}

impl Metric for Jaccard {
    fn name(&self) -> &'static str {
        "Jaccard"
    }

    fn distance(&self, a: &str, b: &str) -> CognateResult<f64> {
        Ok(1.0 - self.similarity(a, b)?)
    }

    fn similarity(&self, a: &str, b: &str) -> CognateResult<f64> {
        check_ngram_size(self.n)?;
        let shared = overlap(&unique_ngrams(a, self.n), &unique_ngrams(b, self.n));
        Ok(Self::index(shared))
    }

    fn distance_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        Ok(1.0 - self.similarity_tokens(a, b)?)
    }

    fn similarity_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        check_ngram_size(self.n)?;
        let shared = overlap(
            &unique_token_ngrams(a, self.n),
            &unique_token_ngrams(b, self.n),
        );
        Ok(Self::index(shared))
    }
}

// ============================================================================
// LCSR
// ============================================================================

/// Compute length of longest common subsequence
fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let len_a = a.len();
    let len_b = b.len();

    let mut dp = vec![vec![0; len_b + 1]; len_a + 1];

    for i in 1..=len_a {
        for j in 1..=len_b {
            if a[i - 1] == b[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    dp[len_a][len_b]
}

fn lcs_ratio<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        1.0
    } else {
        lcs_length(a, b) as f64 / max_len as f64
    }
}

/// Longest common subsequence ratio
#[derive(Debug, Clone, Copy, Default)]
pub struct Lcsr;

impl Metric for Lcsr {
    fn name(&self) -> &'static str {
        "Lcsr"
    }

    fn distance(&self, a: &str, b: &str) -> CognateResult<f64> {
        Ok(1.0 - self.similarity(a, b)?)
    }

    fn similarity(&self, a: &str, b: &str) -> CognateResult<f64> {
        Ok(lcs_ratio(&chars(a), &chars(b)))
    }

    fn distance_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        Ok(1.0 - self.similarity_tokens(a, b)?)
    }

    fn similarity_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        Ok(lcs_ratio(a, b))
    }
}

// ============================================================================
// RANK
// ============================================================================

/// Rank of every occurrence-indexed symbol: the k-th occurrence of `x` is keyed `(x, k)`
/// and ranked `len - position`.
fn ranking<T: Eq + Hash + Clone>(symbols: &[T]) -> AHashMap<(T, usize), usize> {
    let mut seen: AHashMap<T, usize> = AHashMap::new();
    let mut ranks = AHashMap::with_capacity(symbols.len());

    for (position, symbol) in symbols.iter().enumerate() {
        let occurrence = seen.entry(symbol.clone()).or_insert(0);
        ranks.insert((symbol.clone(), *occurrence), symbols.len() - position);
        *occurrence += 1;
    }

    ranks
}

fn rank_distance<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> usize {
    let ranked_a = ranking(a);
    let ranked_b = ranking(b);

    let mut distance = 0;
    for (key, &rank_a) in &ranked_a {
        distance += match ranked_b.get(key) {
            Some(&rank_b) => rank_a.abs_diff(rank_b),
            None => rank_a,
        };
    }
    for (key, &rank_b) in &ranked_b {
        if !ranked_a.contains_key(key) {
            distance += rank_b;
        }
    }

    distance
}

fn rank_normalized<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> f64 {
    let max_distance = a.len() * (a.len() + 1) / 2 + b.len() * (b.len() + 1) / 2;
    if max_distance == 0 {
        return 0.0;
    }
    rank_distance(a, b) as f64 / max_distance as f64
}

/// Positional ranking distance
#[derive(Debug, Clone, Copy, Default)]
pub struct Rank;

impl Rank {
    pub fn raw_distance(&self, a: &str, b: &str) -> usize {
        rank_distance(&chars(a), &chars(b))
    }
}

impl Metric for Rank {
    fn name(&self) -> &'static str {
        "Rank"
    }

    fn distance(&self, a: &str, b: &str) -> CognateResult<f64> {
        debug!("Computing the rank distance between strings {} {}", a, b);
        Ok(rank_normalized(&chars(a), &chars(b)))
    }

    fn distance_tokens(&self, a: &[&str], b: &[&str]) -> CognateResult<f64> {
        debug!("Computing the rank distance between sequences {:?} {:?}", a, b);
        Ok(rank_normalized(a, b))
    }
}

// ============================================================================
// SELECTION AND BATCHES
// ============================================================================

/// Metric selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Edit,
    Hamming,
    Dice,
    Jaccard,
    Lcsr,
    Rank,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Edit,
        MetricKind::Hamming,
        MetricKind::Dice,
        MetricKind::Jaccard,
        MetricKind::Lcsr,
        MetricKind::Rank,
    ];

    /// Instantiate the metric; `ngram_size` only matters for Dice and Jaccard.
    pub fn build(self, ngram_size: usize) -> Box<dyn Metric> {
        match self {
            MetricKind::Edit => Box::new(Edit),
            MetricKind::Hamming => Box::new(Hamming),
            MetricKind::Dice => Box::new(Dice::new(ngram_size)),
            MetricKind::Jaccard => Box::new(Jaccard::new(ngram_size)),
            MetricKind::Lcsr => Box::new(Lcsr),
            MetricKind::Rank => Box::new(Rank),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Edit => "edit",
            MetricKind::Hamming => "hamming",
            MetricKind::Dice => "dice",
            MetricKind::Jaccard => "jaccard",
            MetricKind::Lcsr => "lcsr",
            MetricKind::Rank => "rank",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = CognateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CognateError::invalid_parameter("metric", format!("unknown metric {:?}", s))
            })
    }
}

/// Batch compute distances for multiple pairs (parallelized, input order kept)
pub fn batch_distance(
    metric: &dyn Metric,
    pairs: &[(String, String)],
) -> CognateResult<Vec<f64>> {
    pairs
        .par_iter()
        .map(|(a, b)| metric.distance(a, b))
        .collect()
}

/// Symmetric similarity matrix over a word list (diagonal is self-similarity)
pub fn similarity_matrix(metric: &dyn Metric, words: &[String]) -> CognateResult<Array2<f64>> {
    let n = words.len();
    let mut matrix = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        matrix[[i, i]] = metric.similarity(&words[i], &words[i])?;
    }

    // Compute upper triangle (parallel)
    let pairs: Vec<_> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let similarities = pairs
        .par_iter()
        .map(|&(i, j)| metric.similarity(&words[i], &words[j]))
        .collect::<CognateResult<Vec<f64>>>()?;

    for (&(i, j), sim) in pairs.iter().zip(similarities) {
        matrix[[i, j]] = sim;
        matrix[[j, i]] = sim;
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELTA: f64 = 0.01;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= DELTA,
            "expected {} got {}",
            expected,
            actual
        );
    }

    fn corner_cases(metric: &dyn Metric) {
        assert_close(metric.distance("langue", "").unwrap(), 1.0);
        assert_close(metric.distance("", "espérer").unwrap(), 1.0);
        assert_close(metric.distance("", "").unwrap(), 0.0);

        assert_close(metric.similarity("langue", "").unwrap(), 0.0);
        assert_close(metric.similarity("", "espérer").unwrap(), 0.0);
        assert_close(metric.similarity("", "").unwrap(), 1.0);
    }

    fn equal_values(metric: &dyn Metric) {
        assert_close(metric.distance("langue", "langue").unwrap(), 0.0);
        assert_close(metric.similarity("langue", "langue").unwrap(), 1.0);

        let tokens = ["l", "a", "n", "g", "u", "e"];
        assert_close(metric.distance_tokens(&tokens, &tokens).unwrap(), 0.0);
    }

    #[test]
    fn test_edit() {
        let edit = Edit;
        assert_close(edit.distance("langue", "lingua").unwrap(), 0.33);
        assert_close(edit.distance("spera", "espérer").unwrap(), 0.57);
        assert_close(edit.distance("an", "anno").unwrap(), 0.50);

        assert_close(edit.similarity("langue", "lingua").unwrap(), 0.67);
        assert_close(edit.similarity("spera", "espérer").unwrap(), 0.43);
        assert_close(edit.similarity("an", "anno").unwrap(), 0.50);

        assert_eq!(edit.unnormalized_distance("langue", "lingua"), 2);

        equal_values(&edit);
        corner_cases(&edit);
    }

    #[test]
    fn test_edit_tokens() {
        let edit = Edit;
        let a = ["la", "belle", "langue"];
        let b = ["la", "lingua"];
        assert_eq!(edit.unnormalized_distance_tokens(&a, &b), 2);
        assert_close(edit.distance_tokens(&a, &b).unwrap(), 0.67);
    }

    #[test]
    fn test_edit_memo_is_per_call() {
        let edit = Edit;
        // Same suffix offsets, different strings: results must not leak between calls.
        assert_eq!(edit.unnormalized_distance("abc", "abc"), 0);
        assert_eq!(edit.unnormalized_distance("xyz", "abc"), 3);
        assert_eq!(edit.unnormalized_distance("abc", "abc"), 0);
    }

    #[test]
    fn test_hamming() {
        let hamming = Hamming;
        assert_close(hamming.distance("langue", "lingua").unwrap(), 0.33);
        assert_close(hamming.similarity("langue", "lingua").unwrap(), 0.67);

        assert!(matches!(
            hamming.distance("spera", "espérer"),
            Err(CognateError::LengthMismatch { left: 5, right: 7 })
        ));
        assert!(matches!(
            hamming.similarity("an", "anno"),
            Err(CognateError::LengthMismatch { .. })
        ));

        assert_close(hamming.distance("", "").unwrap(), 0.0);
        assert_close(hamming.similarity("", "").unwrap(), 1.0);
        equal_values(&hamming);
    }

    #[test]
    fn test_dice() {
        let dice = Dice::default();
        assert_close(dice.distance("langue", "lingua").unwrap(), 0.60);
        assert_close(dice.distance("spera", "espérer").unwrap(), 0.60);
        assert_close(dice.distance("an", "anno").unwrap(), 0.50);

        assert_close(dice.similarity("langue", "lingua").unwrap(), 0.40);
        assert_close(dice.similarity("an", "anno").unwrap(), 0.50);

        equal_values(&dice);
        corner_cases(&dice);
        assert!(Dice::new(0).distance("a", "b").is_err());
    }

    #[test]
    fn test_jaccard() {
        let jaccard = Jaccard::default();
        assert_close(jaccard.distance("langue", "lingua").unwrap(), 0.75);
        assert_close(jaccard.distance("spera", "espérer").unwrap(), 0.75);
        assert_close(jaccard.distance("an", "anno").unwrap(), 0.67);

        assert_close(jaccard.similarity("langue", "lingua").unwrap(), 0.25);
        assert_close(jaccard.similarity("an", "anno").unwrap(), 0.33);

        equal_values(&jaccard);
        corner_cases(&jaccard);
    }

    #[test]
    fn test_ngram_metrics_on_tokens() {
        let a = ["la", "belle", "langue"];
        let b = ["la", "belle", "lingua"];
        // bigrams: {la belle, belle langue} vs {la belle, belle lingua}
        assert_close(Dice::default().similarity_tokens(&a, &b).unwrap(), 0.5);
        assert_close(Jaccard::default().similarity_tokens(&a, &b).unwrap(), 0.33);
        assert_close(Dice::default().similarity_tokens(&[], &[]).unwrap(), 1.0);
    }

    #[test]
    fn test_lcsr() {
        let lcsr = Lcsr;
        assert_close(lcsr.distance("langue", "lingua").unwrap(), 0.33);
        assert_close(lcsr.distance("spera", "espérer").unwrap(), 0.42);
        assert_close(lcsr.distance("an", "anno").unwrap(), 0.50);

        assert_close(lcsr.similarity("langue", "lingua").unwrap(), 0.67);
        assert_close(lcsr.similarity("spera", "espérer").unwrap(), 0.58);
        assert_close(lcsr.similarity("an", "anno").unwrap(), 0.50);

        let distance = lcsr
            .distance_tokens(&["s", "p", "e", "r", "a"], &["e", "s", "p", "é", "r", "e", "r"])
            .unwrap();
        assert_close(distance, 0.42);

        equal_values(&lcsr);
        corner_cases(&lcsr);
    }

    #[test]
    fn test_lcsr_monotonic_in_common_subsequence() {
        let lcsr = Lcsr;
        let scores: Vec<f64> = ["xxxx", "axxx", "abxx", "abcx", "abcd"]
            .iter()
            .map(|other| lcsr.similarity("abcd", other).unwrap())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_rank() {
        let rank = Rank;
        assert_close(rank.distance("langue", "lingua").unwrap(), 0.24);
        assert_close(rank.distance("spera", "espérer").unwrap(), 0.35);
        assert_close(rank.distance("an", "anno").unwrap(), 0.54);

        assert_close(rank.similarity("langue", "lingua").unwrap(), 0.76);
        assert_close(rank.similarity("spera", "espérer").unwrap(), 0.65);
        assert_close(rank.similarity("an", "anno").unwrap(), 0.46);

        assert_eq!(rank.raw_distance("an", "anno"), 7);

        let tokens_a = ["l", "a", "n", "g", "u", "e"];
        let tokens_b = ["l", "i", "n", "g", "u", "a"];
        assert_close(rank.distance_tokens(&tokens_a, &tokens_b).unwrap(), 0.24);

        equal_values(&rank);
        corner_cases(&rank);
    }

    #[test]
    fn test_metric_kind() {
        assert_eq!("dice".parse::<MetricKind>().unwrap(), MetricKind::Dice);
        assert_eq!("LCSR".parse::<MetricKind>().unwrap(), MetricKind::Lcsr);
        assert!("cosine".parse::<MetricKind>().is_err());
        assert_eq!(MetricKind::Rank.build(2).name(), "Rank");
    }

    #[test]
    fn test_batch_and_matrix() {
        let pairs = vec![
            ("langue".to_string(), "lingua".to_string()),
            ("an".to_string(), "anno".to_string()),
        ];
        let distances = batch_distance(&Edit, &pairs).unwrap();
        assert_eq!(distances.len(), 2);
        assert_close(distances[1], 0.5);

        let words = vec!["langue".to_string(), "lingua".to_string(), "anno".to_string()];
        let matrix = similarity_matrix(&Lcsr, &words).unwrap();
        assert_eq!(matrix.shape(), &[3, 3]);
        assert_eq!(matrix[[0, 0]], 1.0);
        assert_eq!(matrix[[0, 1]], matrix[[1, 0]]);
    }
}
