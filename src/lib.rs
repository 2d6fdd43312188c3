//! yoloremap: remap YOLO annotation class indices between class lists.
//!
//! When a detection model's class list is reordered, renamed, or cut down,
//! existing YOLO label files still carry indices into the old list. yoloremap
//! reads the original and target class lists, matches classes by name, and
//! rewrites the leading class index of every label line accordingly.
//!
//! # Modules
//!
//! - [`classes`]: Class list parsing and the index↔name lookup tables
//! - [`remap`]: Index translation and label line rewriting
//! - [`batch`]: Multi-file driver with preview and confirmation
//! - [`error`]: Error types for yoloremap operations

pub mod batch;
pub mod classes;
pub mod error;
pub mod remap;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::debug;

pub use error::RemapError;

use batch::{collect_annotation_files, BatchDriver, BatchOptions, BatchReport, LinePrompt};
use classes::ClassTable;
use remap::ClassRemap;

/// The yoloremap CLI application.
#[derive(Parser)]
#[command(name = "yoloremap")]
#[command(version, about)]
struct Cli {
    /// Class file the annotations currently use (one name per line, or data.yaml).
    original_classes: PathBuf,

    /// Class file to remap the annotations to.
    target_classes: PathBuf,

    /// YOLO annotation files, or directories searched for *.txt files.
    #[arg(required = true)]
    annotations: Vec<PathBuf>,

    /// Print updated annotation files to stdout instead of writing them.
    #[arg(short = 'n', long = "print")]
    print: bool,

    /// Request confirmation before updating each file.
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Stop at the first file that cannot be remapped.
    #[arg(long, env = "YOLOREMAP_STRICT")]
    strict: bool,

    /// Format of the end-of-run summary. With `json`, previews, warnings and
    /// prompts go to stderr so stdout holds only the summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Show debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors and suppress the text summary.
    #[arg(short, long)]
    quiet: bool,
}

/// Summary output formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            preview: self.print,
            confirm: self.interactive,
            strict: self.strict,
        }
    }
}

/// Run the yoloremap CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RemapError> {
    let cli = Cli::parse();
    init_logging(&cli);

    let original = ClassTable::read(&cli.original_classes)?;
    let target = ClassTable::read(&cli.target_classes)?;
    debug!(
        "{} original class(es), {} target class(es)",
        original.len(),
        target.len()
    );

    let options = cli.batch_options();
    let mut driver = BatchDriver::new(
        ClassRemap::new(&original, &target),
        &options,
        LinePrompt::stdin(conversation_writer(cli.output)),
        conversation_writer(cli.output),
    );

    if !driver.preflight(&cli.original_classes, &cli.target_classes)? {
        writeln!(conversation_writer(cli.output), "Exit").map_err(RemapError::Output)?;
        return Ok(());
    }

    let class_files: [&Path; 2] = [&cli.original_classes, &cli.target_classes];
    let files = collect_annotation_files(&cli.annotations, &class_files)?;
    let report = driver.run(&files)?;

    print_report(&report, cli.output, cli.quiet)?;

    if report.is_ok() {
        Ok(())
    } else {
        Err(RemapError::BatchFailed {
            failed: report.aborted_count(),
            total: report.files.len(),
        })
    }
}

/// Where previews, warnings and prompts are written.
fn conversation_writer(format: OutputFormat) -> Box<dyn Write> {
    match format {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn print_report(
    report: &BatchReport,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), RemapError> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|source| RemapError::Output(io::Error::other(source)))?;
            println!("{json}");
        }
        OutputFormat::Text if !quiet => print!("{report}"),
        OutputFormat::Text => {}
    }
    Ok(())
}
