use cognates_core::support::validate;
use cognates_core::{
    Aligner, Alignment, CognateError, ContrastiveExtractor, DatasetSchema, LineFormat, MetricKind,
    NeedlemanWunsch, WindowedExtractor,
};
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn value_error(err: CognateError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn metric(name: &str) -> PyResult<MetricKind> {
    name.parse::<MetricKind>().map_err(value_error)
}

/// Align two words; returns `aligned1<separator>aligned2`.
#[pyfunction]
#[pyo3(signature = (a, b, separator = "_"))]
fn align(a: Option<&str>, b: Option<&str>, separator: &str) -> PyResult<String> {
    let (a, b) = validate(a, b).map_err(value_error)?;
    NeedlemanWunsch::new()
        .align_line(a, b, separator)
        .map_err(value_error)
}

/// Minimum alignment cost (0 for identical words).
#[pyfunction]
#[pyo3(signature = (a, b))]
fn alignment_score(a: Option<&str>, b: Option<&str>) -> PyResult<u32> {
    let (a, b) = validate(a, b).map_err(value_error)?;
    NeedlemanWunsch::new().score(a, b).map_err(value_error)
}

#[pyfunction]
#[pyo3(signature = (metric_name, a, b, n = 2))]
fn distance(metric_name: &str, a: Option<&str>, b: Option<&str>, n: usize) -> PyResult<f64> {
    let (a, b) = validate(a, b).map_err(value_error)?;
    metric(metric_name)?
        .build(n)
        .distance(a, b)
        .map_err(value_error)
}

#[pyfunction]
#[pyo3(signature = (metric_name, a, b, n = 2))]
fn similarity(metric_name: &str, a: Option<&str>, b: Option<&str>, n: usize) -> PyResult<f64> {
    let (a, b) = validate(a, b).map_err(value_error)?;
    metric(metric_name)?
        .build(n)
        .similarity(a, b)
        .map_err(value_error)
}

/// Contrastive features of the aligned pair, sorted.
#[pyfunction]
#[pyo3(signature = (a, b, n = 2, use_range = true))]
fn contrastive_features(
    a: Option<&str>,
    b: Option<&str>,
    n: usize,
    use_range: bool,
) -> PyResult<Vec<String>> {
    let (a, b) = validate(a, b).map_err(value_error)?;
    let extractor = ContrastiveExtractor::new(n, use_range).map_err(value_error)?;
    let mut features: Vec<String> = extractor
        .features(a, b)
        .map_err(value_error)?
        .into_iter()
        .collect();
    features.sort();
    Ok(features)
}

/// Contrastive features of an already aligned pair.
#[pyfunction]
#[pyo3(signature = (aligned_a, aligned_b, n = 2, use_range = true))]
fn aligned_features(
    aligned_a: Option<&str>,
    aligned_b: Option<&str>,
    n: usize,
    use_range: bool,
) -> PyResult<Vec<String>> {
    let (aligned_a, aligned_b) = validate(aligned_a, aligned_b).map_err(value_error)?;
    let alignment =
        Alignment::new(aligned_a.to_string(), aligned_b.to_string()).map_err(value_error)?;
    let extractor = ContrastiveExtractor::new(n, use_range).map_err(value_error)?;
    let mut features: Vec<String> = extractor
        .alignment_features(&alignment)
        .into_iter()
        .collect();
    features.sort();
    Ok(features)
}

/// Windowed feature lines for an aligned pair, rendered with `fmt`.
#[pyfunction]
#[pyo3(signature = (aligned_a, aligned_b, n = 1, w = 3, fmt = "label-last"))]
fn reconstruction_lines(
    aligned_a: Option<&str>,
    aligned_b: Option<&str>,
    n: usize,
    w: usize,
    fmt: &str,
) -> PyResult<Vec<String>> {
    let (aligned_a, aligned_b) = validate(aligned_a, aligned_b).map_err(value_error)?;
    let format: LineFormat = fmt.parse().map_err(value_error)?;
    let alignment =
        Alignment::new(aligned_a.to_string(), aligned_b.to_string()).map_err(value_error)?;

    let lines = WindowedExtractor::new(n, w)
        .and_then(|extractor| extractor.feature_lines(&alignment))
        .map_err(value_error)?;

    Ok(lines.iter().map(|line| line.render(format)).collect())
}

/// Dense instance matrix for labelled pairs `(a, b, label)`.
///
/// Returns the matrix (dummy column, one column per feature, class index column),
/// the feature names and the class names.
#[pyfunction]
#[pyo3(signature = (pairs, n = 2))]
fn feature_matrix<'py>(
    py: Python<'py>,
    pairs: Vec<(String, String, String)>,
    n: usize,
) -> PyResult<(&'py PyArray2<f64>, Vec<String>, Vec<String>)> {
    let extractor = ContrastiveExtractor::new(n, true).map_err(value_error)?;

    let mut instances = Vec::with_capacity(pairs.len());
    for (a, b, label) in &pairs {
        if let Some(instance) = extractor.instance(a, b, label).map_err(value_error)? {
            instances.push(instance);
        }
    }

    let schema = DatasetSchema::from_instances(&instances);
    let matrix = schema.to_sparse(&instances).map_err(value_error)?.to_dense();

    Ok((
        matrix.into_pyarray(py),
        schema.features().to_vec(),
        schema.classes().to_vec(),
    ))
}

/// Python module definition.
#[pymodule]
fn cognates_py(_py: Python, m: &PyModule) -> PyResult<()> {
    // Alignment
    m.add_function(wrap_pyfunction!(align, m)?)?;
    m.add_function(wrap_pyfunction!(alignment_score, m)?)?;

    // Metrics
    m.add_function(wrap_pyfunction!(distance, m)?)?;
    m.add_function(wrap_pyfunction!(similarity, m)?)?;

    // Features
    m.add_function(wrap_pyfunction!(contrastive_features, m)?)?;
    m.add_function(wrap_pyfunction!(aligned_features, m)?)?;
    m.add_function(wrap_pyfunction!(reconstruction_lines, m)?)?;
    m.add_function(wrap_pyfunction!(feature_matrix, m)?)?;

    Ok(())
}
