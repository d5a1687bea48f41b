use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::segmenter::{self, preview, SegmentStats};
use crate::text_source::{SourceKind, TextSource};
use crate::translation::{
    DispatchReport, OutputAssembler, SentenceDispatcher, TranslatedSentence, TranslationOutcome,
    TranslationService,
};

// @module: Application controller for document translation

/// Characters of each sentence shown in progress logs
const PREVIEW_CHARS: usize = 70;

/// Outcome of one translation run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// File the text came from
    pub input: PathBuf,
    /// File the translation was written to
    pub output: PathBuf,
    /// Characters in the source document
    pub characters: usize,
    /// Segmentation counts
    pub segments: SegmentStats,
    /// Translation counts
    pub report: DispatchReport,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a controller with the default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output file used when the CLI names none: beside the input, named
    /// after the input kind
    pub fn default_output_path(&self, source: &TextSource) -> PathBuf {
        let file_name = if source.is_pdf() {
            &self.config.files.pdf_output
        } else {
            &self.config.files.text_output
        };
        FileManager::sibling_path(source.path(), file_name)
    }

    /// Output file for raw extraction when the CLI names none
    pub fn default_extract_path(&self, source: &TextSource) -> PathBuf {
        FileManager::sibling_path(source.path(), &self.config.files.raw_output)
    }

    /// Translate `source` into `output` with the configured backends.
    /// Returns `None` when the output exists and overwriting was not forced.
    pub async fn run(&self, source: &TextSource, output: &Path, force_overwrite: bool) -> Result<Option<RunSummary>> {
        let service = TranslationService::new(&self.config)?;
        self.run_with_service(service, source, output, force_overwrite).await
    }

    /// Translate `source` into `output` through an explicit service
    pub async fn run_with_service(
        &self,
        service: TranslationService,
        source: &TextSource,
        output: &Path,
        force_overwrite: bool,
    ) -> Result<Option<RunSummary>> {
        if output.exists() && !force_overwrite {
            warn!("Skipping, output already exists: {:?} (use -f to force overwrite)", output);
            return Ok(None);
        }

        info!("Extracting text from: {:?}", source.path());
        let document = source.load()?;
        let characters = document.char_count();
        match document.kind() {
            SourceKind::Pdf { pages } => info!("Extracted {} characters from {} PDF page(s)", characters, pages),
            SourceKind::PlainText => info!("File loaded. Total content length: {} characters", characters),
        }

        let sentences = segmenter::segment(document.text());
        let segments = SegmentStats::from_sentences(&sentences);
        drop(document);
        info!("Found {} complete sentences", segments.sentences);
        if segments.trailing_fragment {
            debug!("Document ends with an unterminated fragment");
        }

        info!("Translating with {}...", service.primary_name());
        let file = FileManager::create_file(output)?;
        let mut assembler = OutputAssembler::new(BufWriter::new(file));

        let progress_bar = Self::progress_bar(segments.sentences as u64);
        let dispatcher = SentenceDispatcher::new(service, self.config.translation.common.concurrent_requests);
        let report = dispatcher
            .dispatch(sentences, &mut assembler, |translated, finished, total| {
                progress_bar.set_position(finished as u64);
                progress_bar.suspend(|| {
                    let (hindi, english) = Self::sentence_previews(translated);
                    info!("Sentence {}/{}: {}", translated.index() + 1, total, Self::outcome_label(translated.outcome));
                    info!("  Hindi: {}", hindi);
                    info!("  English: {}", english);
                });
            })
            .await?;
        progress_bar.finish_and_clear();

        assembler
            .finish()?
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush output {:?}: {}", output, e.error()))?;

        if report.fallbacks > 0 {
            warn!("{} sentence(s) kept untranslated after backend failures", report.fallbacks);
        }
        let cache = dispatcher.service().cache();
        let cache_note = if cache.is_enabled() {
            format!(", {} cache hits", cache.stats().0)
        } else {
            String::new()
        };
        info!(
            "Translation complete in {} ({} sentences{}). Output saved to {:?}",
            Self::format_duration(report.elapsed),
            report.sentences,
            cache_note,
            output
        );

        Ok(Some(RunSummary {
            input: source.path().to_path_buf(),
            output: output.to_path_buf(),
            characters,
            segments,
            report,
        }))
    }

    /// Extract the source text to `output` without translating.
    /// Returns the number of characters written, or `None` when skipped.
    pub fn extract(&self, source: &TextSource, output: &Path, force_overwrite: bool) -> Result<Option<usize>> {
        if output.exists() && !force_overwrite {
            warn!("Skipping, output already exists: {:?} (use -f to force overwrite)", output);
            return Ok(None);
        }

        let document = source.load()?;
        FileManager::write_to_file(output, document.text())?;
        info!("Raw text extracted to {:?}", output);

        Ok(Some(document.char_count()))
    }

    /// Probe the configured primary backend
    pub async fn check(&self) -> Result<()> {
        let service = TranslationService::new(&self.config)?;
        service
            .test_connection()
            .await
            .with_context(|| format!("{} is not reachable", service.primary_name()))?;
        info!("{} is reachable", service.primary_name());
        Ok(())
    }

    /// Hindi and English previews shown for each finished sentence
    fn sentence_previews(translated: &TranslatedSentence) -> (String, String) {
        (
            preview(translated.sentence.text(), PREVIEW_CHARS),
            preview(&translated.translation, PREVIEW_CHARS),
        )
    }

    fn outcome_label(outcome: TranslationOutcome) -> &'static str {
        match outcome {
            TranslationOutcome::Translated => "Translated",
            TranslationOutcome::Cached => "Translated (cached)",
            TranslationOutcome::Secondary => "Translated by fallback provider",
            TranslationOutcome::Fallback => "Kept untranslated",
        }
    }

    fn progress_bar(total: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sentences ({percent}%) {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=>-"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
