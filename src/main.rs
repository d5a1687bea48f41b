// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use hindi_translate::app_config::{self, Config, TranslationProvider};
use hindi_translate::app_controller::Controller;
use hindi_translate::text_source::TextSource;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every command that reads the configuration
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Hindi PDF or text file (default: first PDF in the current directory)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (default: English.txt for PDFs, english.txt for text)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Provider tried when the primary fails
    #[arg(long, value_enum)]
    fallback_provider: Option<CliTranslationProvider>,

    /// Model name for the local provider (primary or fallback)
    #[arg(short, long)]
    model: Option<String>,

    /// Sentences translated at once (1 = sequential)
    #[arg(long)]
    concurrent_requests: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Hindi PDF (default: first PDF in the current directory)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (default: raw.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a Hindi document to English (default command)
    Translate(TranslateArgs),

    /// Extract the raw text of a PDF without translating it
    Extract(ExtractArgs),

    /// Check that the configured translation provider answers
    Check(CommonArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// hindi-translate - Hindi to English document translator
#[derive(Parser, Debug)]
#[command(name = "hindi-translate")]
#[command(version)]
#[command(about = "Translate Hindi PDFs and text files to English, sentence by sentence")]
#[command(long_about = "hindi-translate splits Hindi text into sentences on the danda (।), double danda (॥), ! and ?, translates each sentence and writes the English text in the original order.

EXAMPLES:
    hindi-translate                           # Translate the first PDF in the current directory
    hindi-translate book.pdf                  # Translate a PDF into English.txt
    hindi-translate Hindi.txt -o english.txt  # Translate a text file
    hindi-translate -p ollama -m llama3.2:3b book.pdf   # Use a local model
    hindi-translate extract book.pdf          # Dump the PDF text to raw.txt
    hindi-translate check                     # Probe the configured provider
    hindi-translate completions bash > hindi-translate.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created automatically.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "✗"),
            Level::Warn => ("\x1B[1;33m", "⚠"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "·"),
            Level::Trace => ("\x1B[1;35m", "…"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, marker) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                colour, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "hindi-translate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        Some(Commands::Extract(args)) => run_extract(args),
        Some(Commands::Check(args)) => run_check(args).await,
        None => run_translate(cli.translate).await,
    }
}

/// Load configuration, apply the log level, and validate
fn load_config(common: &CommonArgs, overrides: impl FnOnce(&mut Config) -> Result<()>) -> Result<Config> {
    if let Some(level) = &common.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&common.config_path)?;
    if let Some(level) = &common.log_level {
        config.log_level = level.clone().into();
    }
    overrides(&mut config)?;

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

/// Resolve the input named on the command line, or discover one
fn resolve_source(input_path: Option<&Path>, config: &Config) -> Result<TextSource> {
    let source = match input_path {
        Some(path) => TextSource::from_path(path)?,
        None => TextSource::discover(".", &config.files.text_input)?,
    };
    Ok(source)
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let config = load_config(&args.common, |config| {
        if let Some(provider) = &args.provider {
            config.translation.provider = provider.clone().into();
        }
        if let Some(fallback) = &args.fallback_provider {
            config.translation.fallback_provider = Some(fallback.clone().into());
        }
        if let Some(model) = &args.model {
            config.translation.set_local_model(model)?;
        }
        if let Some(concurrent) = args.concurrent_requests {
            config.translation.common.concurrent_requests = concurrent;
        }
        Ok(())
    })?;

    let source = resolve_source(args.input_path.as_deref(), &config)?;
    let controller = Controller::with_config(config)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| controller.default_output_path(&source));

    if let Some(summary) = controller.run(&source, &output, args.force_overwrite).await? {
        info!(
            "{} of {} sentence(s) translated, output: {:?}",
            summary.report.sentences - summary.report.fallbacks,
            summary.report.sentences,
            summary.output
        );
    }

    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let config = load_config(&args.common, |_| Ok(()))?;
    let source = resolve_source(args.input_path.as_deref(), &config)?;
    let controller = Controller::with_config(config)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| controller.default_extract_path(&source));

    if let Some(characters) = controller.extract(&source, &output, args.force_overwrite)? {
        info!("Extracted {} characters", characters);
    }

    Ok(())
}

async fn run_check(args: CommonArgs) -> Result<()> {
    let config = load_config(&args, |_| Ok(()))?;
    Controller::with_config(config)?.check().await
}
