//! Run configuration, loaded from a TOML file.
//!
//! ```toml
//! [alignment]
//! separator = "_"
//!
//! [corpus]
//! delimiter = "____"   # or "whitespace"
//!
//! [contrastive]
//! ngram_size = 2
//! use_range = true
//!
//! [reconstruction]
//! ngram_size = 1
//! window = 3
//! line_format = "label-last"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::corpus::{Delimiter, DEFAULT_DELIMITER};
use crate::error::{CognateError, CognateResult};
use crate::reconstruction::LineFormat;
use crate::types::DEFAULT_SEPARATOR;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CognatesConfig {
    pub alignment: AlignmentConfig,
    pub corpus: CorpusConfig,
    pub contrastive: ContrastiveConfig,
    pub reconstruction: ReconstructionConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Between the two halves of an alignment line
    pub separator: String,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Field delimiter; `whitespace` splits on runs of whitespace
    pub delimiter: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl CorpusConfig {
    pub fn delimiter(&self) -> Delimiter {
        Delimiter::from(self.delimiter.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContrastiveConfig {
    pub ngram_size: usize,
    /// Emit every size from 1 up to `ngram_size`
    pub use_range: bool,
}

impl Default for ContrastiveConfig {
    fn default() -> Self {
        Self {
            ngram_size: 2,
            use_range: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    pub ngram_size: usize,
    pub window: usize,
    pub line_format: LineFormat,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            ngram_size: 1,
            window: 3,
            line_format: LineFormat::default(),
        }
    }
}

impl CognatesConfig {
    pub fn from_toml(content: &str) -> CognateResult<Self> {
        let config: CognatesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> CognateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> CognateResult<()> {
        if self.alignment.separator.is_empty() {
            return Err(CognateError::invalid_parameter(
                "alignment.separator",
                "separator cannot be empty",
            ));
        }
        if self.corpus.delimiter.is_empty() {
            return Err(CognateError::invalid_parameter(
                "corpus.delimiter",
                "delimiter cannot be empty",
            ));
        }
        if self.contrastive.ngram_size == 0 {
            return Err(CognateError::invalid_parameter(
                "contrastive.ngram_size",
                "n-gram size must be at least 1",
            ));
        }
        if self.reconstruction.ngram_size == 0 {
            return Err(CognateError::invalid_parameter(
                "reconstruction.ngram_size",
                "n-gram size must be at least 1",
            ));
        }
        if self.reconstruction.window == 0 {
            return Err(CognateError::invalid_parameter(
                "reconstruction.window",
                "window size must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CognatesConfig::from_toml("").unwrap();
        assert_eq!(config, CognatesConfig::default());
        assert_eq!(config.alignment.separator, "_");
        assert_eq!(config.corpus.delimiter(), Delimiter::Literal("____".to_string()));
        assert_eq!(config.contrastive.ngram_size, 2);
        assert!(config.contrastive.use_range);
        assert_eq!(config.reconstruction.window, 3);
        assert_eq!(config.reconstruction.line_format, LineFormat::LabelLast);
    }

    #[test]
    fn test_partial_file() {
        let config = CognatesConfig::from_toml(
            r#"
            [corpus]
            delimiter = "whitespace"

            [reconstruction]
            window = 2
            line_format = "label-first"
            "#,
        )
        .unwrap();
        assert_eq!(config.corpus.delimiter(), Delimiter::Whitespace);
        assert_eq!(config.reconstruction.ngram_size, 1);
        assert_eq!(config.reconstruction.window, 2);
        assert_eq!(config.reconstruction.line_format, LineFormat::LabelFirst);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            CognatesConfig::from_toml("[reconstruction]\nwindow = 0"),
            Err(CognateError::InvalidParameter { name: "reconstruction.window", .. })
        ));
        assert!(CognatesConfig::from_toml("[alignment]\nseparator = \"\"").is_err());
        assert!(matches!(
            CognatesConfig::from_toml("[contrastive]\nngram_size = \"two\""),
            Err(CognateError::Config(_))
        ));
    }
}
