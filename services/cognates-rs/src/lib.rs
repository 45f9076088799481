//! Cognates Core: computational kernel for cognate detection and word-form reconstruction.
//!
//! Provides:
//! - String and token-sequence metrics (edit, Hamming, Dice, Jaccard, LCSR, rank)
//! - Diacritic-aware Needleman-Wunsch alignment
//! - Contrastive alignment features for cognate classifiers
//! - Windowed positional features for reconstruction taggers
//! - Sparse datasets (ARFF, CSR) and corpus statistics

pub mod align;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod diacritics;
pub mod error;
pub mod features;
pub mod metrics;
pub mod reconstruction;
pub mod stats;
pub mod support;
pub mod types;

pub use align::{Aligner, DiacriticWeight, ExactWeight, NeedlemanWunsch, SubstitutionWeight};
pub use config::CognatesConfig;
pub use corpus::{read_corpus, CorpusFile, Delimiter, WordPair};
pub use dataset::{DatasetSchema, MetricDataset};
pub use error::{CognateError, CognateResult};
pub use features::{contrastive_features, ContrastiveExtractor};
pub use metrics::{Dice, Edit, Hamming, Jaccard, Lcsr, Metric, MetricKind, Rank};
pub use reconstruction::{FeatureLine, LineFormat, WindowedExtractor};
pub use stats::{edit_distance_histogram, CorpusStatistics};
pub use types::{Alignment, FeatureSet, LabeledInstance, GAP};
