//! Sparse datasets for external classifiers (Weka ARFF, CSR matrices, JSON lines).

use ahash::AHashMap;
use rayon::prelude::*;
use sprs::{CsMat, TriMat};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::corpus::WordPair;
use crate::error::{CognateError, CognateResult};
use crate::metrics::Metric;
use crate::types::LabeledInstance;

/// Name of the constant first attribute and of the first class value
pub const DUMMY: &str = "dummy";

/// Attribute layout shared by every file of a run.
///
/// Column 0 is the dummy attribute, columns `1..=F` the sorted feature vocabulary,
/// column `F + 1` the class. Class index 0 is the dummy class.
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    features: Vec<String>,
    feature_index: AHashMap<String, usize>,
    classes: Vec<String>,
}

impl DatasetSchema {
    pub fn new<F, L>(features: F, labels: L) -> Self
    where
        F: IntoIterator<Item = String>,
        L: IntoIterator<Item = String>,
    {
        let features: Vec<String> = features
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let feature_index = features
            .iter()
            .enumerate()
            .map(|(idx, feature)| (feature.clone(), idx + 1))
            .collect();

        let mut classes = vec![DUMMY.to_string()];
        classes.extend(labels.into_iter().collect::<BTreeSet<_>>());

        Self {
            features,
            feature_index,
            classes,
        }
    }

    /// Vocabulary and labels observed in the instances
    pub fn from_instances<'a, I>(instances: I) -> Self
    where
        I: IntoIterator<Item = &'a LabeledInstance>,
    {
        let mut features = BTreeSet::new();
        let mut labels = BTreeSet::new();
        for instance in instances {
            features.extend(instance.features.iter().cloned());
            labels.insert(instance.label.clone());
        }
        Self::new(features, labels)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Column of a feature (1-based)
    pub fn feature_index(&self, feature: &str) -> Option<usize> {
        self.feature_index.get(feature).copied()
    }

    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|class| class == label)
    }

    /// Dummy + features + class
    pub fn num_columns(&self) -> usize {
        self.features.len() + 2
    }

    pub fn class_column(&self) -> usize {
        self.features.len() + 1
    }

    /// Relation name: the observed labels, e.g. `[0,1]`
    pub fn relation(&self) -> String {
        format!("[{}]", self.classes[1..].join(","))
    }

    fn class_of(&self, label: &str) -> CognateResult<usize> {
        self.class_index(label)
            .ok_or_else(|| CognateError::InvalidInput(format!("label {:?} is not in the schema", label)))
    }

    fn row_columns(&self, instance: &LabeledInstance) -> CognateResult<Vec<usize>> {
        let mut columns = instance
            .features
            .iter()
            .map(|feature| {
                self.feature_index(feature).ok_or_else(|| {
                    CognateError::InvalidInput(format!("feature {:?} is not in the schema", feature))
                })
            })
            .collect::<CognateResult<Vec<usize>>>()?;
        columns.sort_unstable();
        columns.dedup();
        Ok(columns)
    }

    /// Instance matrix in CSR format: 1.0 for present features, the class index in the
    /// last column.
    pub fn to_sparse(&self, instances: &[LabeledInstance]) -> CognateResult<CsMat<f64>> {
        let mut triplets = TriMat::new((instances.len(), self.num_columns()));

        for (row, instance) in instances.iter().enumerate() {
            for column in self.row_columns(instance)? {
                triplets.add_triplet(row, column, 1.0);
            }
            let class = self.class_of(&instance.label)?;
            if class != 0 {
                triplets.add_triplet(row, self.class_column(), class as f64);
            }
        }

        Ok(triplets.to_csr())
    }

    /// Sparse ARFF with one numeric attribute per feature and a nominal class.
    pub fn write_arff<W: Write>(&self, out: &mut W, instances: &[LabeledInstance]) -> CognateResult<()> {
        writeln!(out, "@relation {}", quote(&self.relation()))?;
        writeln!(out)?;
        writeln!(out, "@attribute {} numeric", DUMMY)?;
        for feature in &self.features {
            writeln!(out, "@attribute {} numeric", force_quote(feature))?;
        }
        writeln!(out, "@attribute class {}", nominal(&self.classes))?;
        writeln!(out)?;
        writeln!(out, "@data")?;

        for instance in instances {
            // validate the label before writing the row
            self.class_of(&instance.label)?;
            let mut entries: Vec<String> = self
                .row_columns(instance)?
                .into_iter()
                .map(|column| format!("{} 1", column))
                .collect();
            entries.push(format!("{} {}", self.class_column(), quote(&instance.label)));
            writeln!(out, "{{{}}}", entries.join(","))?;
        }

        Ok(())
    }
}

/// One metric distance per pair, with its class
#[derive(Debug, Clone)]
pub struct MetricDataset {
    attribute: String,
    classes: Vec<String>,
    rows: Vec<(f64, String)>,
}

impl MetricDataset {
    /// Distances are computed in parallel; every pair must carry a label.
    pub fn build(
        metric: &dyn Metric,
        pairs: &[WordPair],
        labels: &BTreeSet<String>,
    ) -> CognateResult<Self> {
        let rows = pairs
            .par_iter()
            .map(|pair| {
                let label = pair.label.clone().ok_or_else(|| {
                    CognateError::InvalidInput(format!(
                        "missing label for pair {} {}",
                        pair.source, pair.target
                    ))
                })?;
                Ok((metric.distance(&pair.source, &pair.target)?, label))
            })
            .collect::<CognateResult<Vec<_>>>()?;

        let mut classes = vec![DUMMY.to_string()];
        classes.extend(labels.iter().cloned());

        Ok(Self {
            attribute: metric.name().to_string(),
            classes,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|(distance, _)| *distance)
    }

    pub fn write_arff<W: Write>(&self, out: &mut W) -> CognateResult<()> {
        writeln!(out, "@relation {}", quote(&format!("[{}]", self.classes[1..].join(","))))?;
        writeln!(out)?;
        writeln!(out, "@attribute {} numeric", DUMMY)?;
        writeln!(out, "@attribute {} numeric", quote(&self.attribute))?;
        writeln!(out, "@attribute class {}", nominal(&self.classes))?;
        writeln!(out)?;
        writeln!(out, "@data")?;

        for (distance, label) in &self.rows {
            if !self.classes[1..].contains(label) {
                return Err(CognateError::InvalidInput(format!(
                    "label {:?} is not in the dataset classes",
                    label
                )));
            }
            let mut entries = Vec::with_capacity(2);
            if *distance != 0.0 {
                entries.push(format!("1 {}", format_number(*distance)));
            }
            entries.push(format!("2 {}", quote(label)));
            writeln!(out, "{{{}}}", entries.join(","))?;
        }

        Ok(())
    }
}

/// One JSON object per line
pub fn write_jsonl<W: Write>(out: &mut W, instances: &[LabeledInstance]) -> CognateResult<()> {
    for instance in instances {
        serde_json::to_writer(&mut *out, instance)?;
        writeln!(out)?;
    }
    Ok(())
}

fn without_txt(input: &Path) -> String {
    let path = input.to_string_lossy();
    path.strip_suffix(".txt").unwrap_or(&*path).to_string()
}

/// `<input without .txt>.n=<n>.arff`
pub fn alignment_arff_path(input: &Path, n: usize) -> PathBuf {
    PathBuf::from(format!("{}.n={}.arff", without_txt(input), n))
}

/// `<input without .txt>.metric=<name>.arff`
pub fn metric_arff_path(input: &Path, metric: &str) -> PathBuf {
    PathBuf::from(format!("{}.metric={}.arff", without_txt(input), metric))
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s == "?"
        || s.chars()
            .any(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | ',' | '{' | '}' | '%' | '\'' | '"' | '\\'))
}

fn force_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

fn quote(s: &str) -> String {
    if needs_quotes(s) {
        force_quote(s)
    } else {
        s.to_string()
    }
}

fn nominal(values: &[String]) -> String {
    let values: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("{{{}}}", values.join(","))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Edit;

    fn instance(features: &[&str], label: &str) -> LabeledInstance {
        LabeledInstance::new(
            features.iter().map(|f| f.to_string()).collect(),
            label.to_string(),
        )
    }

    #[test]
    fn test_schema_layout() {
        let instances = vec![
            instance(&["x_s", "h_-"], "1"),
            instance(&["-_o", "x_s"], "0"),
        ];
        let schema = DatasetSchema::from_instances(&instances);

        assert_eq!(schema.features(), &["-_o", "h_-", "x_s"]);
        assert_eq!(schema.classes(), &["dummy", "0", "1"]);
        assert_eq!(schema.feature_index("-_o"), Some(1));
        assert_eq!(schema.feature_index("x_s"), Some(3));
        assert_eq!(schema.class_column(), 4);
        assert_eq!(schema.relation(), "[0,1]");
    }

    #[test]
    fn test_sparse_matrix() {
        let instances = vec![
            instance(&["x_s", "h_-"], "1"),
            instance(&["-_o"], "0"),
        ];
        let schema = DatasetSchema::from_instances(&instances);
        let matrix = schema.to_sparse(&instances).unwrap();

        assert_eq!(matrix.shape(), (2, 5));
        // 2 features + class, 1 feature + class
        assert_eq!(matrix.nnz(), 5);
        assert_eq!(matrix.get(0, 2), Some(&1.0));
        assert_eq!(matrix.get(0, 4), Some(&2.0));
        assert_eq!(matrix.get(1, 4), Some(&1.0));
        assert_eq!(matrix.get(1, 0), None);
    }

    #[test]
    fn test_unknown_feature_is_rejected() {
        let schema = DatasetSchema::new(vec!["a_b".to_string()], vec!["1".to_string()]);
        let instances = vec![instance(&["c_d"], "1")];
        assert!(schema.to_sparse(&instances).is_err());
    }

    #[test]
    fn test_write_arff() {
        let instances = vec![instance(&["x_s", "h_-"], "1"), instance(&["it's"], "0")];
        let schema = DatasetSchema::from_instances(&instances);

        let mut out = Vec::new();
        schema.write_arff(&mut out, &instances).unwrap();
        let arff = String::from_utf8(out).unwrap();

        let expected = "@relation '[0,1]'\n\n\
                        @attribute dummy numeric\n\
                        @attribute 'h_-' numeric\n\
                        @attribute 'it\\'s' numeric\n\
                        @attribute 'x_s' numeric\n\
                        @attribute class {dummy,0,1}\n\n\
                        @data\n\
                        {1 1,3 1,4 1}\n\
                        {2 1,4 0}\n";
        assert_eq!(arff, expected);
    }

    #[test]
    fn test_metric_dataset() {
        let pairs = vec![
            WordPair {
                source: "an".to_string(),
                target: "anno".to_string(),
                label: Some("1".to_string()),
            },
            WordPair {
                source: "lapte".to_string(),
                target: "lapte".to_string(),
                label: Some("0".to_string()),
            },
        ];
        let labels: BTreeSet<String> = ["0", "1"].iter().map(|l| l.to_string()).collect();
        let dataset = MetricDataset::build(&Edit, &pairs, &labels).unwrap();
        assert_eq!(dataset.len(), 2);

        let mut out = Vec::new();
        dataset.write_arff(&mut out).unwrap();
        let arff = String::from_utf8(out).unwrap();
        assert!(arff.contains("@attribute Edit numeric\n"));
        assert!(arff.ends_with("@data\n{1 0.5,2 1}\n{2 0}\n"));
    }

    #[test]
    fn test_write_jsonl() {
        let instances = vec![instance(&["x_s"], "1")];
        let mut out = Vec::new();
        write_jsonl(&mut out, &instances).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"features\":[\"x_s\"],\"label\":\"1\"}\n"
        );
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("data/ro-it.txt");
        assert_eq!(alignment_arff_path(input, 2), PathBuf::from("data/ro-it.n=2.arff"));
        assert_eq!(
            metric_arff_path(input, "edit"),
            PathBuf::from("data/ro-it.metric=edit.arff")
        );
    }
}
