//! Word-pair corpora and parallel batch processing over them.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::align::Aligner;
use crate::error::{CognateError, CognateResult};
use crate::features::ContrastiveExtractor;
use crate::reconstruction::{FeatureLine, WindowedExtractor};
use crate::types::{Alignment, LabeledInstance, DEFAULT_SEPARATOR};

/// Default field delimiter of labelled corpora
pub const DEFAULT_DELIMITER: &str = "____";

/// Field delimiter of a corpus line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delimiter {
    Literal(String),
    Whitespace,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Literal(DEFAULT_DELIMITER.to_string())
    }
}

impl From<&str> for Delimiter {
    /// `whitespace` selects whitespace splitting, anything else is a literal.
    fn from(value: &str) -> Self {
        if value == "whitespace" {
            Delimiter::Whitespace
        } else {
            Delimiter::Literal(value.to_string())
        }
    }
}

impl Delimiter {
    /// Split a line; trailing empty fields are dropped.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let mut fields: Vec<&str> = match self {
            Delimiter::Literal(delimiter) => line.split(delimiter.as_str()).collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        };
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        fields
    }
}

/// Two words and, for labelled corpora, their class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl fmt::Display for WordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.target)
    }
}

/// Parse one corpus line, or `None` (logged) when it has too few fields.
pub fn parse_line(line: &str, delimiter: &Delimiter, require_label: bool) -> Option<WordPair> {
    let fields = delimiter.split(line.trim_end_matches(['\r', '\n']));
    let needed = if require_label { 3 } else { 2 };

    if fields.len() < needed {
        warn!("Invalid input line: {}", line);
        return None;
    }

    Some(WordPair {
        source: fields[0].to_string(),
        target: fields[1].to_string(),
        label: fields.get(2).map(|label| label.to_string()),
    })
}

/// Pairs read from one input file
#[derive(Debug, Clone)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub pairs: Vec<WordPair>,
    /// Lines dropped for having too few fields
    pub skipped: usize,
}

pub fn read_corpus_file(
    path: &Path,
    delimiter: &Delimiter,
    require_label: bool,
) -> CognateResult<CorpusFile> {
    let content = fs::read_to_string(path)?;

    let mut pairs = Vec::new();
    let mut skipped = 0;
    for line in content.lines() {
        match parse_line(line, delimiter, require_label) {
            Some(pair) => pairs.push(pair),
            None => skipped += 1,
        }
    }

    info!(
        "Read {} pairs from {} ({} lines skipped)",
        pairs.len(),
        path.display(),
        skipped
    );

    Ok(CorpusFile {
        path: path.to_path_buf(),
        pairs,
        skipped,
    })
}

/// Read every file; unreadable files are logged and left out.
pub fn read_corpus<P: AsRef<Path>>(
    paths: &[P],
    delimiter: &Delimiter,
    require_label: bool,
) -> Vec<CorpusFile> {
    paths
        .iter()
        .filter_map(|path| {
            let path = path.as_ref();
            match read_corpus_file(path, delimiter, require_label) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Error while reading the content of file {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

/// Label vocabulary across all files
pub fn collect_labels(files: &[CorpusFile]) -> BTreeSet<String> {
    files
        .iter()
        .flat_map(|file| file.pairs.iter())
        .filter_map(|pair| pair.label.clone())
        .collect()
}

// ============================================================================
// BATCHES
// ============================================================================

/// Skip a pair whose input is invalid, keeping every other error fatal.
fn skip_invalid<T>(result: CognateResult<T>, pair: impl fmt::Display) -> CognateResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(CognateError::InvalidInput(reason)) => {
            warn!("Skipping {}: {}", pair, reason);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Align all pairs in parallel, keeping input order. Invalid pairs are logged and left out.
pub fn align_pairs<A>(aligner: &A, pairs: &[WordPair]) -> CognateResult<Vec<Alignment>>
where
    A: Aligner + Sync,
{
    let alignments = pairs
        .par_iter()
        .map(|pair| skip_invalid(aligner.align(&pair.source, &pair.target), pair))
        .collect::<CognateResult<Vec<Option<Alignment>>>>()?;

    Ok(alignments.into_iter().flatten().collect())
}

/// Classifier instances for labelled pairs. Pairs without any feature and pairs with
/// invalid input are dropped.
pub fn contrastive_instances<A>(
    extractor: &ContrastiveExtractor<A>,
    pairs: &[WordPair],
) -> CognateResult<Vec<LabeledInstance>>
where
    A: Aligner + Sync,
{
    let instances = pairs
        .par_iter()
        .map(|pair| {
            let instance = match pair.label.as_deref() {
                Some(label) => extractor.instance(&pair.source, &pair.target, label),
                None => Err(CognateError::InvalidInput("missing label".to_string())),
            };
            skip_invalid(instance, pair).map(Option::flatten)
        })
        .collect::<CognateResult<Vec<Option<LabeledInstance>>>>()?;

    let kept: Vec<LabeledInstance> = instances.into_iter().flatten().collect();
    info!("Kept {} instances out of {} pairs", kept.len(), pairs.len());
    Ok(kept)
}

/// Windowed feature blocks in input order. Alignments with invalid input are logged
/// and left out.
pub fn reconstruction_blocks(
    extractor: &WindowedExtractor,
    alignments: &[Alignment],
) -> CognateResult<Vec<Vec<FeatureLine>>> {
    let blocks = alignments
        .par_iter()
        .map(|alignment| {
            skip_invalid(
                extractor.feature_lines(alignment),
                alignment.to_line(DEFAULT_SEPARATOR),
            )
        })
        .collect::<CognateResult<Vec<Option<Vec<FeatureLine>>>>>()?;

    Ok(blocks.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::NeedlemanWunsch;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn pair(source: &str, target: &str, label: Option<&str>) -> WordPair {
        WordPair {
            source: source.to_string(),
            target: target.to_string(),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_line() {
        let delimiter = Delimiter::default();
        assert_eq!(
            parse_line("exhaustiv____esaustivo____1", &delimiter, true),
            Some(pair("exhaustiv", "esaustivo", Some("1")))
        );
        assert_eq!(parse_line("exhaustiv____esaustivo", &delimiter, true), None);
        assert_eq!(
            parse_line("exhaustiv____esaustivo", &delimiter, false),
            Some(pair("exhaustiv", "esaustivo", None))
        );
    }

    #[test]
    fn test_trailing_empty_fields_are_dropped() {
        let delimiter = Delimiter::default();
        assert_eq!(delimiter.split("a____b________"), vec!["a", "b"]);
        assert_eq!(parse_line("a____b____", &delimiter, true), None);
        assert_eq!(Delimiter::from("whitespace").split("  an\t anno "), vec!["an", "anno"]);
    }

    #[test]
    fn test_read_corpus_skips_unreadable_files() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "lapte____latte____1").unwrap();
        writeln!(file, "broken line").unwrap();
        writeln!(file, "noapte____notte____0").unwrap();

        let paths = vec![
            file.path().to_path_buf(),
            PathBuf::from("/nonexistent/corpus.txt"),
        ];
        let files = read_corpus(&paths, &Delimiter::default(), true);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].pairs.len(), 2);
        assert_eq!(files[0].skipped, 1);

        let labels: Vec<String> = collect_labels(&files).into_iter().collect();
        assert_eq!(labels, vec!["0", "1"]);
    }

    #[test]
    fn test_batches_keep_input_order() {
        let pairs: Vec<WordPair> = ["an", "exhaustiv", "lingua", "noapte"]
            .iter()
            .zip(["anno", "esaustivo", "lingua", "notte"])
            .map(|(a, b)| pair(a, b, Some("1")))
            .collect();

        let alignments = align_pairs(&NeedlemanWunsch::new(), &pairs).unwrap();
        assert_eq!(alignments.len(), 4);
        assert_eq!(alignments[1].to_line("_"), "exhaustiv-_es-austivo");

        let extractor = ContrastiveExtractor::new(2, true).unwrap();
        let instances = contrastive_instances(&extractor, &pairs).unwrap();
        // the identical pair has no features
        assert_eq!(instances.len(), 3);

        let windowed = WindowedExtractor::new(1, 1).unwrap();
        let blocks = reconstruction_blocks(&windowed, &alignments).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].last().unwrap().label, "no#");
    }

    #[test]
    fn test_invalid_pairs_are_skipped() {
        let pairs = vec![
            pair("exhaustiv", "esaustivo", Some("1")),
            pair("arc-en-ciel", "arcobaleno", Some("1")),
            pair("an", "anno", None),
            pair("noapte", "notte", Some("1")),
        ];

        let alignments = align_pairs(&NeedlemanWunsch::new(), &pairs).unwrap();
        assert_eq!(alignments.len(), 3);
        assert_eq!(alignments[1].to_line("_"), "an--_anno");

        let extractor = ContrastiveExtractor::new(1, false).unwrap();
        let instances = contrastive_instances(&extractor, &pairs).unwrap();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].features, vec!["-_o", "h_-", "x_s"]);

        let alignments = vec![
            Alignment::parse("an--_anno", "_").unwrap(),
            Alignment::parse("c#_c#", "_").unwrap(),
        ];
        let windowed = WindowedExtractor::new(1, 1).unwrap();
        let blocks = reconstruction_blocks(&windowed, &alignments).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].last().unwrap().label, "no#");
    }
}
