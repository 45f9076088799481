//! Windowed positional features for sequence labelers that reconstruct the target
//! word from the source word, one source fragment at a time.
//!
//! One instance per source position, plus a prefix instance (before the first
//! character, `c=$`) and a suffix instance (after the last one, `c=#`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::{CognateError, CognateResult};
use crate::types::{Alignment, GAP};

/// Word start sentinel
pub const BEGIN: char = '$';
/// Word end sentinel
pub const END: char = '#';
/// Label of a fragment that is copied unchanged
pub const NO_CHANGE: &str = "0";

/// Layout of a serialized feature line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineFormat {
    /// `label f1 f2 ...` (tagger training files)
    LabelFirst,
    /// `f1 f2 ... label`
    #[default]
    LabelLast,
    /// gold labels only
    LabelOnly,
    /// features only, for unlabelled test files
    FeaturesOnly,
}

impl LineFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LineFormat::LabelFirst => "label-first",
            LineFormat::LabelLast => "label-last",
            LineFormat::LabelOnly => "label-only",
            LineFormat::FeaturesOnly => "features-only",
        }
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineFormat {
    type Err = CognateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            LineFormat::LabelFirst,
            LineFormat::LabelLast,
            LineFormat::LabelOnly,
            LineFormat::FeaturesOnly,
        ]
        .into_iter()
        .find(|format| format.as_str() == s.trim())
        .ok_or_else(|| {
            CognateError::invalid_parameter("line_format", format!("unknown line format {:?}", s))
        })
    }
}

/// One labelled position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLine {
    pub label: String,
    pub features: Vec<String>,
}

impl FeatureLine {
    fn is_boundary(&self) -> bool {
        self.features
            .first()
            .is_some_and(|f| matches!(f.as_str(), "c=$" | "c=#"))
    }

    /// Tagger-training lines (`LabelFirst`) carry the `c=$` / `c=#` boundary feature last.
    pub fn render(&self, format: LineFormat) -> String {
        let features = self.features.join(" ");
        match format {
            LineFormat::LabelFirst if self.is_boundary() => {
                let mut ordered: Vec<&str> = self.features[1..].iter().map(String::as_str).collect();
                ordered.push(&self.features[0]);
                format!("{} {}", self.label, ordered.join(" "))
            }
            LineFormat::LabelFirst => format!("{} {}", self.label, features),
            LineFormat::LabelLast => format!("{} {}", features, self.label),
            LineFormat::LabelOnly => self.label.clone(),
            LineFormat::FeaturesOnly => features,
        }
    }
}

/// Write one block per word pair: a line per position, then a blank line.
pub fn write_blocks<W: Write>(
    out: &mut W,
    blocks: &[Vec<FeatureLine>],
    format: LineFormat,
) -> io::Result<()> {
    for block in blocks {
        for line in block {
            writeln!(out, "{}", line.render(format))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Context n-grams (sizes 1..=w) of `chars[start..stop]`, tagged with their offsets
/// counted from `first_offset`.
fn context_features(
    chars: &[char],
    start: usize,
    stop: usize,
    w: usize,
    first_offset: isize,
) -> Vec<String> {
    let mut features = Vec::new();

    for k in 1..=w {
        let end = (stop + 1).saturating_sub(k);
        for (shift, l) in (start..end).enumerate() {
            let begin = first_offset + shift as isize;
            let ngram: String = chars[l..l + k].iter().collect();
            if k == 1 {
                features.push(format!("f[{}]={}", begin, ngram));
            } else {
                features.push(format!("f[{}|{}]={}", begin, begin + k as isize - 1, ngram));
            }
        }
    }

    features
}

fn without_gaps(chars: &[char]) -> Vec<char> {
    chars.iter().copied().filter(|&c| c != GAP).collect()
}

/// True when the remainder is one or more gaps followed by the end sentinel.
fn only_gaps_then_end(rest: &[char]) -> bool {
    match rest.split_last() {
        Some((&END, gaps)) => !gaps.is_empty() && gaps.iter().all(|&c| c == GAP),
        _ => false,
    }
}

fn leading_gaps(s: &str) -> usize {
    s.chars().take_while(|&c| c == GAP).count()
}

fn trailing_gaps(s: &str) -> usize {
    s.chars().rev().take_while(|&c| c == GAP).count()
}

/// Extracts windowed features from alignments.
#[derive(Debug, Clone, Copy)]
pub struct WindowedExtractor {
    ngram_size: usize,
    window: usize,
}

impl WindowedExtractor {
    pub fn new(ngram_size: usize, window: usize) -> CognateResult<Self> {
        if ngram_size == 0 {
            return Err(CognateError::invalid_parameter(
                "ngram_size",
                "n-gram size must be at least 1",
            ));
        }
        if window == 0 {
            return Err(CognateError::invalid_parameter(
                "window",
                "window size must be at least 1",
            ));
        }
        Ok(Self { ngram_size, window })
    }

    /// Feature lines for one aligned pair, in source order.
    pub fn feature_lines(&self, alignment: &Alignment) -> CognateResult<Vec<FeatureLine>> {
        if alignment
            .columns()
            .any(|(l, r)| [l, r].iter().any(|&c| c == BEGIN || c == END))
        {
            return Err(CognateError::InvalidInput(format!(
                "alignment {} contains a word boundary sentinel",
                alignment.to_line("_")
            )));
        }

        let n = self.ngram_size;
        let w = self.window;

        let pad = |s: &str| -> Vec<char> {
            std::iter::once(BEGIN)
                .chain(s.chars())
                .chain(std::iter::once(END))
                .collect()
        };
        let source = pad(&alignment.left);
        let target = pad(&alignment.right);
        let compact = without_gaps(&source);

        let mut lines = Vec::new();

        // Prefix instance: target characters inserted before the first source character.
        let prefix_gaps = leading_gaps(&alignment.left);
        let label = if prefix_gaps == 0 {
            NO_CHANGE.to_string()
        } else {
            std::iter::once(BEGIN)
                .chain(alignment.right.chars().take(prefix_gaps))
                .collect()
        };
        let mut features = vec![format!("c={}", BEGIN)];
        features.extend(context_features(
            &compact,
            1,
            (1 + w).min(compact.len()),
            w,
            1,
        ));
        lines.push(FeatureLine { label, features });

        if source.len() >= n {
            for i in 0..=source.len() - n {
                if source[i] == GAP {
                    continue;
                }

                let mut j = i;
                let mut fragment = String::new();
                let mut fragment_len = 0;
                let mut aligned = String::new();

                while fragment_len < n && j < source.len() {
                    if source[j] != GAP {
                        fragment.push(source[j]);
                        fragment_len += 1;
                    }
                    aligned.push(target[j]);
                    j += 1;
                }

                if fragment_len < n || fragment.contains(BEGIN) || fragment.contains(END) {
                    continue;
                }

                // Absorb target characters facing source gaps, unless only the suffix run is left.
                if !only_gaps_then_end(&source[j..]) {
                    while j < source.len() && source[j] == GAP {
                        aligned.push(target[j]);
                        j += 1;
                    }
                }

                let label = if fragment == aligned {
                    NO_CHANGE.to_string()
                } else {
                    aligned
                };

                let left = without_gaps(&source[..i]);
                let right = without_gaps(&source[j..]);

                let mut features = vec![format!("c={}", fragment)];
                features.extend(context_features(
                    &left,
                    left.len().saturating_sub(w),
                    left.len(),
                    w,
                    -(w.min(left.len()) as isize),
                ));
                features.extend(context_features(&right, 0, w.min(right.len()), w, 1));

                lines.push(FeatureLine { label, features });
            }
        }

        // Suffix instance: target characters appended after the last source character.
        let suffix_gaps = trailing_gaps(&alignment.left);
        let label = if suffix_gaps == 0 {
            NO_CHANGE.to_string()
        } else {
            let tail: Vec<char> = alignment.right.chars().rev().take(suffix_gaps).collect();
            tail.into_iter().rev().chain(std::iter::once(END)).collect()
        };
        let stop = compact.len() - 1;
        let start = stop.saturating_sub(w);
        let mut features = vec![format!("c={}", END)];
        features.extend(context_features(
            &compact,
            start,
            stop,
            w,
            -((stop - start) as isize),
        ));
        lines.push(FeatureLine { label, features });

        Ok(lines)
    }
}
