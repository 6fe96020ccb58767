//! Score command implementation

use crate::config::{CliConfig, MentionMode};
use crate::error::CliError;
use crate::input::{load_annotations, resolve_patterns};
use crate::output::{create_formatter, FormatOptions, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use ccp_nlp_core::{
    class_breakdown, AnnotationComparator, CorpusEvaluator, DocumentKey, DocumentScorer,
    EntityPartsAnnotationComparator, EvaluationConfig, IgnoreMentions, MentionComparator,
    MentionNameComparator, MonoidReduce, PrfResult, SoftMatcher, SpanComparator, TextAnnotation,
};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the score command
#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Gold (reference) annotation files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub gold: Vec<String>,

    /// Test (system) annotation files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub test: Vec<String>,

    /// Span comparator (see `list comparators`)
    #[arg(short = 's', long, value_name = "NAME", env = "CCP_EVAL_COMPARATOR")]
    pub comparator: Option<String>,

    /// How annotation classes are compared
    #[arg(short, long, value_enum)]
    pub mentions: Option<MentionMode>,

    /// Score word by word instead of whole annotations
    #[arg(long)]
    pub entity_parts: bool,

    /// Graded matching with the given Dice threshold in (0, 1]
    #[arg(long, value_name = "THRESHOLD", conflicts_with = "entity_parts")]
    pub soft: Option<f64>,

    /// Nesting depth for mention comparison
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Number of worker threads (default: all cores)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// List matched and unmatched annotations
    #[arg(short, long)]
    pub evidence: bool,

    /// Report scores for every document
    #[arg(long)]
    pub by_document: bool,

    /// Report scores for every annotation class
    #[arg(long)]
    pub by_class: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Scoring mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringMode {
    Exact,
    EntityParts,
    Soft(f64),
}

/// Command-line flags merged over the configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSettings {
    pub evaluation: EvaluationConfig,
    pub mentions: MentionMode,
    pub mode: ScoringMode,
    pub format: OutputFormat,
    pub format_options: FormatOptions,
    pub by_document: bool,
    pub by_class: bool,
}

impl ScoreArgs {
    /// Execute the score command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting evaluation");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let settings = self.resolve(&config)?;
        log::info!(
            "Comparator: {}, mentions: {:?}, mode: {:?}, threads: {}",
            settings.evaluation.span_comparator(),
            settings.mentions,
            settings.mode,
            settings.evaluation.threads().unwrap_or_else(num_cpus::get)
        );

        let gold_files = resolve_patterns(&self.gold).context("Resolving gold files")?;
        let test_files = resolve_patterns(&self.test).context("Resolving test files")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files((gold_files.len() + test_files.len()) as u64);
        let gold = load_annotations(gold_files.iter().map(PathBuf::as_path), |path| {
            progress.file_completed(path)
        })?;
        let test = load_annotations(test_files.iter().map(PathBuf::as_path), |path| {
            progress.file_completed(path)
        })?;
        log::info!(
            "Loaded {} gold and {} test annotations",
            gold.len(),
            test.len()
        );

        progress.scoring();
        let documents = score_documents(&settings, &gold, &test)?;
        progress.finish();

        self.write_report(&settings, documents)
    }

    /// Merge flags over `config`; flags win
    pub fn resolve(&self, config: &CliConfig) -> Result<ScoreSettings> {
        let evaluation = &config.evaluation;
        let comparator_name = self.comparator.as_deref().unwrap_or(&evaluation.comparator);
        let span_comparator: SpanComparator = comparator_name
            .parse()
            .map_err(|e: ccp_nlp_core::ConfigError| CliError::ConfigError(e.to_string()))?;

        let soft_threshold = self.soft.or(evaluation.soft_threshold);
        let entity_parts = self.entity_parts || evaluation.entity_parts;
        let mode = match (soft_threshold, entity_parts) {
            (Some(_), true) => {
                return Err(CliError::ConfigError(
                    "soft matching and entity-parts scoring cannot be combined".to_string(),
                )
                .into())
            }
            (Some(threshold), false) => ScoringMode::Soft(threshold),
            (None, true) => ScoringMode::EntityParts,
            (None, false) => ScoringMode::Exact,
        };

        let include_evidence = self.evidence || config.output.include_evidence;
        let evaluation_config = EvaluationConfig::builder()
            .span_comparator(span_comparator)
            .max_depth(self.max_depth.unwrap_or(evaluation.max_depth))
            .threads(self.threads.or(config.performance.thread_count()))
            .keep_evidence(include_evidence || self.by_class)
            .soft_threshold(soft_threshold)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        Ok(ScoreSettings {
            evaluation: evaluation_config,
            mentions: self.mentions.unwrap_or(evaluation.mentions),
            mode,
            format: self.format.unwrap_or(config.output.format),
            format_options: FormatOptions {
                include_evidence,
                pretty_json: config.output.pretty_json,
            },
            by_document: self.by_document,
            by_class: self.by_class,
        })
    }

    fn write_report(
        &self,
        settings: &ScoreSettings,
        documents: Vec<(DocumentKey, PrfResult)>,
    ) -> Result<()> {
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(create_output(path)?)),
            None => Box::new(io::stdout().lock()),
        };
        write_report(settings, documents, writer)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running inside tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create output file: {}", path.display()))
}

/// Score every document with the scorer selected by `settings`
pub fn score_documents(
    settings: &ScoreSettings,
    gold: &[TextAnnotation],
    test: &[TextAnnotation],
) -> Result<Vec<(DocumentKey, PrfResult)>> {
    match settings.mentions {
        MentionMode::Name => score_with_mentions(settings, MentionNameComparator, gold, test),
        MentionMode::Ignore => score_with_mentions(settings, IgnoreMentions, gold, test),
    }
}

fn score_with_mentions<C>(
    settings: &ScoreSettings,
    mentions: C,
    gold: &[TextAnnotation],
    test: &[TextAnnotation],
) -> Result<Vec<(DocumentKey, PrfResult)>>
where
    C: MentionComparator<String>,
{
    let config = &settings.evaluation;
    match settings.mode {
        ScoringMode::Exact => {
            run(AnnotationComparator::from_config(config, mentions), config, gold, test)
        }
        ScoringMode::EntityParts => run(
            EntityPartsAnnotationComparator::new(AnnotationComparator::from_config(
                config, mentions,
            )),
            config,
            gold,
            test,
        ),
        ScoringMode::Soft(threshold) => run(
            SoftMatcher::new(threshold, mentions).with_max_depth(config.max_depth()),
            config,
            gold,
            test,
        ),
    }
}

fn run<S: DocumentScorer<String>>(
    scorer: S,
    config: &EvaluationConfig,
    gold: &[TextAnnotation],
    test: &[TextAnnotation],
) -> Result<Vec<(DocumentKey, PrfResult)>> {
    CorpusEvaluator::new(scorer, config.clone())
        .evaluate_documents(gold, test)
        .context("Evaluation failed")
}

/// Render per-document, per-class and total scores
pub fn write_report<'a>(
    settings: &ScoreSettings,
    documents: Vec<(DocumentKey, PrfResult)>,
    writer: Box<dyn Write + 'a>,
) -> Result<()> {
    let mut formatter = create_formatter(settings.format, writer, settings.format_options);

    if settings.by_document {
        for (key, result) in &documents {
            formatter.format_document(key, result)?;
        }
    }

    let mut total = PrfResult::reduce(documents.into_iter().map(|(_, result)| result));
    total.set_title("Overall");

    if settings.by_class {
        let classes = class_breakdown(&total, |annotation| {
            annotation.mention().cloned().unwrap_or_else(|| "-".to_string())
        });
        for (class, result) in &classes {
            formatter.format_class(class, result)?;
        }
    }

    if !settings.format_options.include_evidence {
        total.trim();
    }
    formatter.finish(&total)
}
