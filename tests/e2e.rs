//! End-to-end integration tests for resume-parser.
//!
//! Most tests drive the public API with stub text extractors and temporary
//! directories, so they need neither pdfium nor sample documents.
//!
//! Tests that parse real PDFs from `./test_cases/` need the pdfium library
//! and are gated behind the `E2E_ENABLED` environment variable.
//!
//! Run with:
//!   E2E_ENABLED=1 PDFIUM_LIB_PATH=. cargo test --test e2e -- --nocapture

use resume_parser::{
    discover_pdfs, process_directory, process_directory_sync, save_records, write_csv,
    BatchSummary, FieldSet, KeywordTable, NoopObserver, OutputFormat, ParseObserver,
    ParserConfig, ResumeParserError, ResumePipeline, ResumeRecord, SharedObserver, TextExtractor,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test if E2E_ENABLED is not set *or* nothing exists at `path`.
macro_rules! e2e_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let p: PathBuf = $path;
        if !p.exists() {
            println!("SKIP — test input not found: {}", p.display());
            return;
        }
        p
    }};
}

/// Serves canned text per file name; unknown names behave like missing files.
struct CannedText {
    texts: HashMap<String, String>,
    delay: Option<Duration>,
}

impl CannedText {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            texts: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            delay: None,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl TextExtractor for CannedText {
    fn extract(
        &self,
        path: &Path,
        _observer: &dyn ParseObserver,
    ) -> Result<String, ResumeParserError> {
        if let Some(d) = self.delay {
            std::thread::sleep(d);
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.texts.get(&name) {
            Some(text) if text == "<panic>" => panic!("extractor blew up on {name}"),
            Some(text) => Ok(text.clone()),
            None => Err(ResumeParserError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Records batch-level events.
#[derive(Default)]
struct BatchRecorder {
    started: AtomicUsize,
    documents_started: Mutex<Vec<usize>>,
    completed: AtomicUsize,
    empty: AtomicUsize,
    errors: AtomicUsize,
    summary: Mutex<Option<BatchSummary>>,
}

impl ParseObserver for BatchRecorder {
    fn on_batch_start(&self, total_files: usize) {
        self.started.store(total_files, Ordering::SeqCst);
    }

    fn on_document_start(&self, index: usize, _total_files: usize, _path: &Path) {
        self.documents_started.lock().unwrap().push(index);
    }

    fn on_document_empty(&self, _path: &Path) {
        self.empty.fetch_add(1, Ordering::SeqCst);
    }

    fn on_document_complete(&self, _path: &Path, _record: &ResumeRecord) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_document_error(&self, _path: &Path, _error: &ResumeParserError) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        *self.summary.lock().unwrap() = Some(summary.clone());
    }
}

fn quiet_config() -> ParserConfig {
    ParserConfig::builder()
        .observer(Arc::new(NoopObserver))
        .build()
        .unwrap()
}

/// Create empty placeholder files; the stub extractor supplies their text.
fn populate(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"%PDF-1.4\n").unwrap();
    }
}

fn file_names(records: &[ResumeRecord]) -> Vec<&str> {
    records.iter().map(|r| r.file.as_str()).collect()
}

const JOHN: &str =
    "John Smith\njohn.smith@example.com\n1234567890\nBachelor of Science\nPython, SQL, Pandas";

// ── Single document ──────────────────────────────────────────────────────────

#[test]
fn test_complete_resume_text() {
    let pipeline = ResumePipeline::with_extractor(quiet_config(), CannedText::new(&[]));
    let fields = pipeline.parse_text(JOHN);
    assert_eq!(
        fields,
        FieldSet {
            name: Some("John Smith".into()),
            email: Some("john.smith@example.com".into()),
            phone: Some("1234567890".into()),
            education: Some("Bachelor".into()),
            skills: vec!["Python".into(), "SQL".into(), "Pandas".into()],
        }
    );
}

#[test]
fn test_empty_text_yields_all_absent() {
    let pipeline = ResumePipeline::with_extractor(quiet_config(), CannedText::new(&[]));
    assert_eq!(pipeline.parse_text(""), FieldSet::empty());
}

#[test]
fn test_whitespace_only_document_yields_no_record() {
    let pipeline = ResumePipeline::with_extractor(
        quiet_config(),
        CannedText::new(&[("blank.pdf", " \n\n\t ")]),
    );
    assert_eq!(pipeline.process_resume("blank.pdf").unwrap(), None);
}

#[test]
fn test_missing_file_yields_no_record_with_pdfium_extractor() {
    // Missing files are rejected before pdfium is bound.
    let pipeline = ResumePipeline::new(quiet_config());
    assert_eq!(
        pipeline.process_resume("/nonexistent/resume.pdf").unwrap(),
        None
    );
    let err = pipeline
        .try_process_resume("/nonexistent/resume.pdf")
        .unwrap_err();
    assert!(matches!(err, ResumeParserError::NotFound { .. }), "got: {err}");
}

#[test]
fn test_record_metadata() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &["john.pdf"]);
    let pipeline =
        ResumePipeline::with_extractor(quiet_config(), CannedText::new(&[("john.pdf", JOHN)]));

    let record = pipeline
        .process_resume(dir.path().join("john.pdf"))
        .unwrap()
        .expect("record");
    assert_eq!(record.file, "john.pdf");
    assert!(Path::new(&record.file_path).is_absolute());
    assert!(record.file_path.ends_with("john.pdf"));
}

#[test]
fn test_custom_keyword_table() {
    let config = ParserConfig::builder()
        .observer(Arc::new(NoopObserver))
        .keywords(KeywordTable::new(
            vec!["Haskell".into(), "Elm".into()],
            vec!["Apprenticeship".into()],
        ))
        .build()
        .unwrap();
    let pipeline = ResumePipeline::with_extractor(config, CannedText::new(&[]));
    let fields = pipeline.parse_text("Ada Lovelace\nElm and Haskell\nApprenticeship, Bachelor");
    assert_eq!(fields.skills, vec!["Haskell", "Elm"]);
    assert_eq!(fields.education.as_deref(), Some("Apprenticeship"));
}

#[test]
fn test_pipeline_usable_from_many_threads() {
    let pipeline = Arc::new(ResumePipeline::with_extractor(
        quiet_config(),
        CannedText::new(&[("john.pdf", JOHN)]),
    ));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = Arc::clone(&pipeline);
            std::thread::spawn(move || p.process_resume("john.pdf").unwrap())
        })
        .collect();
    for h in handles {
        let record = h.join().unwrap().expect("record");
        assert_eq!(record.fields.name.as_deref(), Some("John Smith"));
    }
}

#[test]
fn test_observer_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NoopObserver>();
    assert_send_sync::<SharedObserver>();
    assert_send_sync::<ResumePipeline>();
}

// ── Batch driver ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_mixed_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &["a.pdf", "b.pdf", "c.pdf", "d.pdf", "notes.txt"]);

    let recorder = Arc::new(BatchRecorder::default());
    let config = ParserConfig::builder()
        .observer(recorder.clone())
        .build()
        .unwrap();
    // c.pdf has no canned text, so it fails like a missing file.
    let extractor = CannedText::new(&[
        ("a.pdf", JOHN),
        ("b.pdf", "   "),
        ("d.pdf", "Jane Doe jane@doe.io Rust"),
    ]);
    let pipeline = Arc::new(ResumePipeline::with_extractor(config, extractor));

    let output = process_directory(dir.path(), pipeline).await.unwrap();

    assert_eq!(file_names(&output.records), vec!["a.pdf", "d.pdf"]);
    assert_eq!(output.summary.total, 4);
    assert_eq!(output.summary.succeeded, 2);
    assert_eq!(output.summary.failed, 2);
    let failed: Vec<&str> = output
        .summary
        .failed_files
        .iter()
        .map(|f| f.file.as_str())
        .collect();
    assert_eq!(failed, vec!["b.pdf", "c.pdf"]);
    assert_eq!(output.summary.failed_files[0].reason, "no text extracted");

    assert_eq!(recorder.started.load(Ordering::SeqCst), 4);
    assert_eq!(*recorder.documents_started.lock().unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(recorder.completed.load(Ordering::SeqCst), 2);
    assert_eq!(recorder.empty.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.errors.load(Ordering::SeqCst), 1);
    assert_eq!(
        recorder.summary.lock().unwrap().as_ref(),
        Some(&output.summary)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_concurrency_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let names = ["r1.pdf", "r2.pdf", "r3.pdf", "r4.pdf", "r5.pdf", "r6.pdf"];
    populate(dir.path(), &names);

    let entries: Vec<(&str, &str)> = names.iter().map(|n| (*n, JOHN)).collect();
    let config = ParserConfig::builder()
        .observer(Arc::new(NoopObserver))
        .concurrency(3)
        .build()
        .unwrap();
    let extractor = CannedText::new(&entries).with_delay(Duration::from_millis(20));
    let pipeline = Arc::new(ResumePipeline::with_extractor(config, extractor));

    let output = process_directory(dir.path(), pipeline).await.unwrap();
    assert_eq!(file_names(&output.records), names.to_vec());
    assert_eq!(output.summary.failed, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_worker_panic_is_counted() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &["boom.pdf", "ok.pdf"]);

    let extractor = CannedText::new(&[("boom.pdf", "<panic>"), ("ok.pdf", JOHN)]);
    let pipeline = Arc::new(ResumePipeline::with_extractor(quiet_config(), extractor));

    let output = process_directory(dir.path(), pipeline).await.unwrap();
    assert_eq!(file_names(&output.records), vec!["ok.pdf"]);
    assert_eq!(output.summary.failed, 1);
    assert!(output.summary.failed_files[0].reason.contains("panicked"));
}

#[tokio::test]
async fn test_batch_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Arc::new(BatchRecorder::default());
    let config = ParserConfig::builder()
        .observer(recorder.clone())
        .build()
        .unwrap();
    let pipeline = Arc::new(ResumePipeline::with_extractor(config, CannedText::new(&[])));

    let output = process_directory(dir.path(), pipeline).await.unwrap();
    assert!(output.records.is_empty());
    assert_eq!(output.summary, BatchSummary::default());
    assert!(recorder.summary.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_batch_missing_directory_is_an_error() {
    let pipeline = Arc::new(ResumePipeline::with_extractor(
        quiet_config(),
        CannedText::new(&[]),
    ));
    let err = process_directory("/definitely/not/here", pipeline)
        .await
        .unwrap_err();
    assert!(matches!(err, ResumeParserError::InputDirectory { .. }));
}

#[test]
fn test_batch_sync_wrapper() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &["john.pdf"]);
    let pipeline = Arc::new(ResumePipeline::with_extractor(
        quiet_config(),
        CannedText::new(&[("john.pdf", JOHN)]),
    ));
    let output = process_directory_sync(dir.path(), pipeline).unwrap();
    assert_eq!(output.summary.succeeded, 1);
}

#[test]
fn test_batch_non_pdf_contents_fail_without_pdfium() {
    // The magic-byte check rejects these before pdfium is bound.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fake.pdf"), b"plain text, not a pdf").unwrap();
    let pipeline = Arc::new(ResumePipeline::new(quiet_config()));

    let output = process_directory_sync(dir.path(), pipeline).unwrap();
    assert!(output.records.is_empty());
    assert_eq!(output.summary.failed, 1);
    assert_eq!(output.summary.failed_files[0].file, "fake.pdf");
}

// ── Output ───────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_to_csv_file() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    populate(input.path(), &["john.pdf", "jane.pdf"]);

    let extractor = CannedText::new(&[
        ("john.pdf", JOHN),
        ("jane.pdf", "Jane Doe\nJANE@DOE.IO\n(555) 123-4567\nMaster\nRust, Docker"),
    ]);
    let pipeline = Arc::new(ResumePipeline::with_extractor(quiet_config(), extractor));
    let output = process_directory(input.path(), pipeline).await.unwrap();

    let path = out.path().join("processed/parsed_resumes.csv");
    save_records(&output.records, &path, OutputFormat::Csv).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["Name", "Email", "Phone", "Education", "Skills", "File", "FilePath"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    // Sorted discovery: jane.pdf before john.pdf.
    assert_eq!(&rows[0][0], "Jane Doe");
    assert_eq!(&rows[0][1], "jane@doe.io");
    assert_eq!(&rows[0][2], "(555) 123-4567");
    assert_eq!(&rows[0][4], "Rust, Docker");
    assert_eq!(&rows[1][4], "Python, SQL, Pandas");
    assert_eq!(&rows[1][5], "john.pdf");
}

#[test]
fn test_csv_to_memory_has_header_only_for_no_records() {
    let mut buf = Vec::new();
    write_csv(&[], &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "Name,Email,Phone,Education,Skills,File,FilePath\n"
    );
}

#[test]
fn test_discover_pdfs_is_sorted() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &["zed.pdf", "alpha.pdf", "mid.pdf"]);
    let found: Vec<String> = discover_pdfs(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(found, vec!["alpha.pdf", "mid.pdf", "zed.pdf"]);
}

// ── Real PDFs (gated) ────────────────────────────────────────────────────────

#[test]
fn test_real_pdf_directory() {
    let dir = e2e_skip_unless_ready!(test_cases_dir());
    let pipeline = Arc::new(ResumePipeline::new(quiet_config()));
    let output = process_directory_sync(&dir, pipeline).unwrap();

    println!(
        "parsed {}/{} resumes from {}",
        output.summary.succeeded,
        output.summary.total,
        dir.display()
    );
    assert_eq!(
        output.summary.succeeded + output.summary.failed,
        output.summary.total
    );
    for record in &output.records {
        assert!(Path::new(&record.file_path).is_absolute());
        assert!(record.file.ends_with(".pdf"));
    }
}

#[test]
fn test_real_pdf_single_resume() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("sample_resume.pdf"));
    let pipeline = ResumePipeline::new(quiet_config());
    let record = pipeline
        .process_resume(&path)
        .unwrap()
        .expect("sample resume should contain text");
    println!("{}", serde_json::to_string_pretty(&record).unwrap());
    assert!(record.fields.populated_count() > 0);
}
