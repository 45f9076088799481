//! Cognates - batch feature extraction for cognate detection and reconstruction

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cognates_core::corpus::{
    align_pairs, collect_labels, contrastive_instances, read_corpus, read_corpus_file,
    reconstruction_blocks,
};
use cognates_core::dataset::{alignment_arff_path, metric_arff_path, write_jsonl};
use cognates_core::reconstruction::write_blocks;
use cognates_core::{
    edit_distance_histogram, Alignment, CognatesConfig, ContrastiveExtractor, CorpusStatistics,
    DatasetSchema, Delimiter, LineFormat, MetricDataset, MetricKind, NeedlemanWunsch,
    WindowedExtractor,
};

#[derive(Parser, Debug)]
#[command(name = "cognates", version, about = "Alignment features and datasets for cognate detection")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); defaults to RUST_LOG, then info
    #[arg(long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: Option<String>,

    /// Also write feature instances as JSON lines
    #[arg(long, global = true)]
    jsonl: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align whitespace-separated word pairs, one alignment per line
    Align { input: PathBuf, output: PathBuf },

    /// Write a contrastive-feature ARFF file next to each labelled corpus
    Features {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Largest n-gram size
        #[arg(short, long)]
        n: Option<usize>,
    },

    /// Write a single-metric ARFF file next to each labelled corpus
    Metric {
        /// edit, hamming, dice, jaccard, lcsr or rank
        metric: MetricKind,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// n-gram size for dice and jaccard
        #[arg(short, long, default_value = "2")]
        n: usize,
    },

    /// Turn alignment lines into windowed feature lines
    Reconstruct {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long)]
        n: Option<usize>,
        #[arg(short, long)]
        window: Option<usize>,
        /// label-first, label-last, label-only or features-only
        #[arg(short, long)]
        format: Option<LineFormat>,
    },

    /// Print length and edit distance statistics of aligned corpora
    Stats {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Treat lines as `lang_gold_produced | ...` and print the edit distance histogram
        #[arg(long)]
        histogram: bool,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = match &cli.config {
        Some(path) => CognatesConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CognatesConfig::default(),
    };

    match cli.command {
        Commands::Align { input, output } => run_align(&config, &input, &output),
        Commands::Features { files, n } => run_features(&config, &files, n, cli.jsonl),
        Commands::Metric { metric, files, n } => run_metric(&config, metric, &files, n),
        Commands::Reconstruct {
            input,
            output,
            n,
            window,
            format,
        } => run_reconstruct(&config, &input, &output, n, window, format),
        Commands::Stats { files, histogram } => run_stats(&config, &files, histogram),
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn run_align(config: &CognatesConfig, input: &Path, output: &Path) -> Result<()> {
    let corpus = read_corpus_file(input, &Delimiter::Whitespace, false)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let alignments = align_pairs(&NeedlemanWunsch::new(), &corpus.pairs)?;

    let mut out = create(output)?;
    for alignment in &alignments {
        writeln!(out, "{}", alignment.to_line(&config.alignment.separator))?;
    }
    out.flush()?;

    info!("Wrote {} alignments to {}", alignments.len(), output.display());
    Ok(())
}

fn run_features(
    config: &CognatesConfig,
    files: &[PathBuf],
    n: Option<usize>,
    jsonl: bool,
) -> Result<()> {
    let n = n.unwrap_or(config.contrastive.ngram_size);
    let extractor = ContrastiveExtractor::new(n, config.contrastive.use_range)?;
    let corpora = read_corpus(files, &config.corpus.delimiter(), true);

    let mut per_file = Vec::with_capacity(corpora.len());
    for corpus in &corpora {
        let instances = contrastive_instances(&extractor, &corpus.pairs)
            .with_context(|| format!("Failed to extract features from {}", corpus.path.display()))?;
        per_file.push(instances);
    }

    // One schema for all files so that train and test sets share attributes.
    let schema = DatasetSchema::new(
        per_file
            .iter()
            .flatten()
            .flat_map(|instance| instance.features.iter().cloned()),
        collect_labels(&corpora),
    );
    info!(
        "{} features and {} classes over {} files",
        schema.features().len(),
        schema.classes().len() - 1,
        corpora.len()
    );

    for (corpus, instances) in corpora.iter().zip(&per_file) {
        let path = alignment_arff_path(&corpus.path, n);
        let mut out = create(&path)?;
        schema.write_arff(&mut out, instances)?;
        out.flush()?;
        info!("Wrote {} instances to {}", instances.len(), path.display());

        if jsonl {
            let path = path.with_extension("jsonl");
            let mut out = create(&path)?;
            write_jsonl(&mut out, instances)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn run_metric(config: &CognatesConfig, kind: MetricKind, files: &[PathBuf], n: usize) -> Result<()> {
    let metric = kind.build(n);
    let corpora = read_corpus(files, &config.corpus.delimiter(), true);
    let labels = collect_labels(&corpora);

    for corpus in &corpora {
        let dataset = MetricDataset::build(metric.as_ref(), &corpus.pairs, &labels)
            .with_context(|| format!("Failed to compute {} on {}", kind, corpus.path.display()))?;

        let path = metric_arff_path(&corpus.path, kind.as_str());
        let mut out = create(&path)?;
        dataset.write_arff(&mut out)?;
        out.flush()?;
        info!("Wrote {} instances to {}", dataset.len(), path.display());
    }

    Ok(())
}

fn read_alignments(path: &Path, separator: &str) -> Result<Vec<Alignment>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let mut alignments = Vec::new();
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        match Alignment::parse(line, separator) {
            Ok(alignment) => alignments.push(alignment),
            Err(e) => warn!("Skipping line {:?} in {}: {}", line, path.display(), e),
        }
    }
    Ok(alignments)
}

fn run_reconstruct(
    config: &CognatesConfig,
    input: &Path,
    output: &Path,
    n: Option<usize>,
    window: Option<usize>,
    format: Option<LineFormat>,
) -> Result<()> {
    let extractor = WindowedExtractor::new(
        n.unwrap_or(config.reconstruction.ngram_size),
        window.unwrap_or(config.reconstruction.window),
    )?;
    let format = format.unwrap_or(config.reconstruction.line_format);

    let alignments = read_alignments(input, &config.alignment.separator)?;
    let blocks = reconstruction_blocks(&extractor, &alignments)?;

    let mut out = create(output)?;
    write_blocks(&mut out, &blocks, format)?;
    out.flush()?;

    info!("Wrote {} blocks to {}", blocks.len(), output.display());
    Ok(())
}

fn run_stats(config: &CognatesConfig, files: &[PathBuf], histogram: bool) -> Result<()> {
    for path in files {
        println!("{}", path.display());

        if histogram {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
            for (distance, share) in edit_distance_histogram(&lines)? {
                println!("{}: {}", distance, share);
            }
        } else {
            let alignments = read_alignments(path, &config.alignment.separator)?;
            let stats = CorpusStatistics::from_alignments(&alignments)
                .with_context(|| format!("No alignments in {}", path.display()))?;
            println!("{}", stats);
        }

        println!();
    }

    Ok(())
}
