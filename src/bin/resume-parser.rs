//! CLI binary for resume-parser.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ParserConfig`, runs the batch driver and writes the table.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume_parser::pipeline::engine;
use resume_parser::{
    process_directory, save_records, BatchSummary, Field, KeywordTable, OutputFormat,
    ParseObserver, ParserConfig, RecoverableError, ResumeParserError, ResumePipeline,
    ResumeRecord, SharedObserver, TracingObserver,
};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress observer using indicatif ────────────────────────────────────

/// Terminal observer: renders a live progress bar with one line per file.
///
/// Every event is also forwarded to [`TracingObserver`] so `--log-file`
/// keeps the full record while the bar is on screen.
struct CliProgressObserver {
    bar: ProgressBar,
    started: Instant,
    log: TracingObserver,
}

impl CliProgressObserver {
    /// The bar length is set by `on_batch_start`, once the directory is listed.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Scanning input directory…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            started: Instant::now(),
            log: TracingObserver,
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Parsing");
        self.bar.reset_eta();
    }

    /// Remove the bar when the batch ends without `on_batch_complete`.
    fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    fn fail_line(&self, path: &Path, reason: &str) {
        // Keep long pdfium messages to one terminal line.
        let msg: String = if reason.chars().count() > 80 {
            let head: String = reason.chars().take(79).collect();
            format!("{head}\u{2026}")
        } else {
            reason.to_string()
        };

        self.bar.println(format!(
            "  {} {:<32}  {}",
            red("✗"),
            file_label(path),
            red(&msg),
        ));
        self.bar.inc(1);
    }
}

impl ParseObserver for CliProgressObserver {
    fn on_batch_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Parsing {total_files} resume(s)…"))
        ));
        self.log.on_batch_start(total_files);
    }

    fn on_document_start(&self, index: usize, total_files: usize, path: &Path) {
        self.bar.set_message(file_label(path));
        self.log.on_document_start(index, total_files, path);
    }

    fn on_page_error(&self, path: &Path, error: &RecoverableError) {
        self.log.on_page_error(path, error);
    }

    fn on_field_match(&self, field: Field, value: &str) {
        self.log.on_field_match(field, value);
    }

    fn on_field_error(&self, error: &RecoverableError) {
        self.log.on_field_error(error);
    }

    fn on_document_empty(&self, path: &Path) {
        self.fail_line(path, "no text extracted");
        self.log.on_document_empty(path);
    }

    fn on_document_complete(&self, path: &Path, record: &ResumeRecord) {
        self.bar.println(format!(
            "  {} {:<32}  {}",
            green("✓"),
            file_label(path),
            dim(&format!("{}/5 fields", record.fields.populated_count())),
        ));
        self.bar.inc(1);
        self.log.on_document_complete(path, record);
    }

    fn on_document_error(&self, path: &Path, error: &ResumeParserError) {
        self.fail_line(path, &error.to_string());
        self.log.on_document_error(path, error);
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        self.bar.finish_and_clear();
        self.log.on_batch_complete(summary);

        let elapsed = dim(&format!("{:.1}s", self.started.elapsed().as_secs_f64()));
        if summary.failed == 0 {
            eprintln!(
                "{} {} resume(s) parsed successfully  {}",
                green("✔"),
                bold(&summary.succeeded.to_string()),
                elapsed,
            );
        } else {
            eprintln!(
                "{} {}/{} resume(s) parsed  ({} failed)  {}",
                if summary.succeeded == 0 {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&summary.succeeded.to_string()),
                summary.total,
                red(&summary.failed.to_string()),
                elapsed,
            );
            for failed in &summary.failed_files {
                eprintln!("   {} {}", red("·"), dim(&failed.file));
            }
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse data/raw_resumes into data/processed_output/parsed_resumes.csv
  resume-parser

  # Custom input directory and output file (directory part wins over --output-dir)
  resume-parser --input ~/Downloads/cvs --output reports/candidates.csv

  # JSON output, four documents at a time
  resume-parser --format json --output parsed.json --concurrency 4

  # Custom keyword table and punctuation stripping
  resume-parser --keywords keywords.json --strip-special

  # Debug logs, also written to a file
  resume-parser --verbose --log-file logs/resume_parser.log

KEYWORD FILE FORMAT:
  {
    "skills":    ["Python", "SQL", "Docker"],
    "education": ["Bachelor", "Master", "Ph.D"]
  }
  Order matters: education returns the first listed degree found, skills are
  reported in list order.

OUTPUT COLUMNS:
  Name, Email, Phone, Education, Skills, File, FilePath
  Skills are joined with ", " in CSV and kept as an array in JSON.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium (file or containing directory)
  RUST_LOG                Override the log filter (e.g. resume_parser=debug)

SETUP:
  pdfium is loaded at runtime. Install it on the system library path or
  point PDFIUM_LIB_PATH at a copy from github.com/bblanchon/pdfium-binaries.
"#;

/// Extract name, email, phone, education and skills from PDF resumes.
#[derive(Parser, Debug)]
#[command(
    name = "resume-parser",
    version,
    about = "Extract candidate fields from PDF resumes into CSV or JSON",
    long_about = "Extract name, email, phone, education and skills from every PDF resume in a \
directory using text extraction and keyword matching, and write one row per resume to a \
CSV or JSON file.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the PDF resumes.
    #[arg(short, long, env = "RESUME_PARSER_INPUT", default_value = "data/raw_resumes")]
    input: PathBuf,

    /// Output file name. A directory component overrides --output-dir.
    #[arg(short, long, env = "RESUME_PARSER_OUTPUT", default_value = "parsed_resumes.csv")]
    output: PathBuf,

    /// Directory for the output file when --output is a bare name.
    #[arg(long, env = "RESUME_PARSER_OUTPUT_DIR", default_value = "data/processed_output")]
    output_dir: PathBuf,

    /// Output format. Default: json for a .json output name, else csv.
    #[arg(long, env = "RESUME_PARSER_FORMAT", value_enum)]
    format: Option<FormatArg>,

    /// JSON keyword table replacing the built-in skills and degrees.
    #[arg(long, env = "RESUME_PARSER_KEYWORDS")]
    keywords: Option<PathBuf>,

    /// Strip decorative punctuation before matching.
    #[arg(long, env = "RESUME_PARSER_STRIP_SPECIAL")]
    strip_special: bool,

    /// Number of resumes processed at once.
    #[arg(short, long, env = "RESUME_PARSER_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,

    /// Disable progress bar.
    #[arg(long, env = "RESUME_PARSER_NO_PROGRESS")]
    no_progress: bool,

    /// Also write logs to this file (appended).
    #[arg(long, env = "RESUME_PARSER_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME_PARSER_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUME_PARSER_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level output on the terminal; the log
    // file, when requested, always gets the full INFO (or DEBUG) stream.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    let stderr_layer = fmt::layer().with_writer(io::stderr).with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
    );

    let file_layer = match cli.log_file {
        Some(ref path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(EnvFilter::new(if cli.verbose { "debug" } else { "info" })),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // ── Ensure PDFium engine is available ────────────────────────────────
    tokio::task::block_in_place(engine::ensure_pdfium_available)
        .context("PDFium engine is not available (set PDFIUM_LIB_PATH)")?;

    // ── Build config ─────────────────────────────────────────────────────
    let progress = show_progress.then(CliProgressObserver::new_dynamic);
    let observer = progress.clone().map(|p| p as SharedObserver);
    let config = build_config(&cli, observer);
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            clear_progress(&progress);
            return Err(e);
        }
    };
    let pipeline = Arc::new(ResumePipeline::new(config));

    // ── Run batch ────────────────────────────────────────────────────────
    let result = process_directory(&cli.input, pipeline).await;
    clear_progress(&progress);
    let output =
        result.with_context(|| format!("Failed to process {}", cli.input.display()))?;

    if output.records.is_empty() {
        warn!("No resumes were successfully processed; nothing written");
        if !cli.quiet {
            eprintln!("{} no resumes parsed, nothing written", cyan("⚠"));
        }
        return Ok(());
    }

    // ── Write table ──────────────────────────────────────────────────────
    let output_path = resolve_output_path(&cli.output, &cli.output_dir);
    let format = cli
        .format
        .map(OutputFormat::from)
        .unwrap_or_else(|| infer_format(&output_path));

    tokio::task::block_in_place(|| save_records(&output.records, &output_path, format))
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if !cli.quiet {
        eprintln!(
            "{}  {}/{} resumes  →  {}",
            if output.summary.failed == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            output.summary.succeeded,
            output.summary.total,
            bold(&output_path.display().to_string()),
        );
    }

    Ok(())
}

fn clear_progress(progress: &Option<Arc<CliProgressObserver>>) {
    if let Some(p) = progress {
        p.clear();
    }
}

/// Map CLI args to `ParserConfig`.
fn build_config(cli: &Cli, observer: Option<SharedObserver>) -> Result<ParserConfig> {
    let mut builder = ParserConfig::builder()
        .strip_special_chars(cli.strip_special)
        .concurrency(cli.concurrency);

    if let Some(ref path) = cli.keywords {
        let table = KeywordTable::from_json_file(path)
            .with_context(|| format!("Failed to load keywords from {:?}", path))?;
        builder = builder.keywords(table);
    }

    if let Some(obs) = observer {
        builder = builder.observer(obs);
    }

    builder.build().context("Invalid configuration")
}

/// `--output` with a directory part is used as-is; a bare name lands in `output_dir`.
fn resolve_output_path(output: &Path, output_dir: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => output.to_path_buf(),
        _ => output_dir.join(output),
    }
}

fn infer_format(path: &Path) -> OutputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Csv,
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
