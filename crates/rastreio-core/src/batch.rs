use crate::config::BatchConfig;
use crate::error::RastreioError;
use crate::extraction::PdfExtractor;
use crate::metrics::BatchTotals;
use crate::report::markdown::render_report;
use crate::report::tabular::write_extract;
use crate::report::SourceReport;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Kind of input file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    /// Text already extracted from a PDF, pages separated by form feeds.
    Text,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(SourceKind::Pdf)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(SourceKind::Text)
        } else {
            None
        }
    }
}

/// Extraction backends used for each kind of source.
#[derive(Clone, Copy)]
pub struct Backends<'a> {
    pub pdf: &'a dyn PdfExtractor,
    pub text: &'a dyn PdfExtractor,
}

impl<'a> Backends<'a> {
    pub fn for_kind(&self, kind: SourceKind) -> &'a dyn PdfExtractor {
        match kind {
            SourceKind::Pdf => self.pdf,
            SourceKind::Text => self.text,
        }
    }
}

/// Result of a batch run.
#[derive(Debug)]
pub struct BatchSummary {
    pub sources: Vec<SourceReport>,
    pub totals: BatchTotals,
    pub extract_paths: Vec<PathBuf>,
    pub report_path: PathBuf,
}

/// List the reports in `dir`, sorted by file name.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>, RastreioError> {
    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && SourceKind::from_path(&path).is_some() {
            sources.push(path);
        }
    }
    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(sources)
}

/// Process one report end to end.
///
/// Reading or decoding failures are logged and the source is reported with
/// no records, so one bad file never stops the batch.
pub fn process_source(path: &Path, extractor: &dyn PdfExtractor) -> SourceReport {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let pages = std::fs::read(path)
        .map_err(RastreioError::from)
        .and_then(|bytes| extractor.extract_pages(&bytes))
        .unwrap_or_else(|e| {
            tracing::warn!(
                source = %name,
                backend = extractor.backend_name(),
                error = %e,
                "could not extract text, treating source as empty"
            );
            Vec::new()
        });

    let report = SourceReport::new(crate::extract_source(&name, &pages));
    tracing::info!(
        source = %name,
        records = report.metrics.records,
        blocks = report.metrics.detected_blocks,
        "extracted positions"
    );
    report
}

/// Path of the CSV extract for a source.
pub fn extract_path(output_dir: &Path, source: &Path) -> PathBuf {
    output_dir.join(format!("{}_positions.csv", file_stem(source)))
}

/// Extract paths for every source, in order.
///
/// Sources sharing a stem (`a.pdf` and `a.txt`) get the lowercased
/// extension in their name, `a_pdf_positions.csv` and `a_txt_positions.csv`,
/// so no extract overwrites another.
pub fn extract_paths(output_dir: &Path, sources: &[PathBuf]) -> Vec<PathBuf> {
    let mut stems: HashMap<String, usize> = HashMap::new();
    for source in sources {
        *stems.entry(file_stem(source)).or_default() += 1;
    }

    sources
        .iter()
        .map(|source| {
            let stem = file_stem(source);
            if stems.get(&stem).copied().unwrap_or(0) < 2 {
                return extract_path(output_dir, source);
            }
            let ext = source
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            tracing::debug!(source = %source.display(), "stem shared with another source");
            output_dir.join(format!("{stem}_{ext}_positions.csv"))
        })
        .collect()
}

fn file_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Run the whole pipeline described by `config`.
///
/// Sources are processed in parallel; extracts and the report are written
/// afterwards in discovery order.
pub fn run_batch(
    config: &BatchConfig,
    backends: Backends<'_>,
) -> Result<BatchSummary, RastreioError> {
    config.validate()?;
    let sources = discover_sources(&config.input_dir)?;
    tracing::info!(
        count = sources.len(),
        dir = %config.input_dir.display(),
        "discovered sources"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs.unwrap_or(0))
        .build()?;
    let reports: Vec<SourceReport> = pool.install(|| {
        sources
            .par_iter()
            .map(|path| {
                let kind = SourceKind::from_path(path).unwrap_or(SourceKind::Pdf);
                process_source(path, backends.for_kind(kind))
            })
            .collect()
    });

    std::fs::create_dir_all(&config.output_dir)?;
    let extract_paths = extract_paths(&config.output_dir, &sources);
    for (path, report) in extract_paths.iter().zip(&reports) {
        let file = BufWriter::new(File::create(path)?);
        write_extract(
            file,
            report.extract.plate_or_empty(),
            &report.extract.records,
        )?;
        tracing::info!(
            path = %path.display(),
            rows = report.extract.records.len(),
            "wrote extract"
        );
    }

    if let Some(parent) = config.report_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&config.report_path, render_report(&reports))?;
    tracing::info!(path = %config.report_path.display(), "wrote report");

    let totals = reports.iter().map(|r| &r.metrics).collect();
    Ok(BatchSummary {
        sources: reports,
        totals,
        extract_paths,
        report_path: config.report_path.clone(),
    })
}
