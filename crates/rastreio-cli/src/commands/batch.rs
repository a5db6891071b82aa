use rastreio_core::batch::{run_batch, Backends};
use rastreio_core::config::BatchConfig;
use rastreio_core::error::RastreioError;
use rastreio_core::extraction::pdftotext::PdftotextExtractor;
use rastreio_core::extraction::plain_text::PlainTextExtractor;
use std::path::PathBuf;

pub struct BatchArgs {
    pub input_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub no_layout: bool,
}

pub fn run(args: BatchArgs) -> Result<(), RastreioError> {
    let mut config = match &args.config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    if let Some(dir) = args.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = args.out_dir {
        config.output_dir = dir;
    }
    if let Some(path) = args.report {
        config.report_path = path;
    }
    if args.jobs.is_some() {
        config.jobs = args.jobs;
    }
    if args.no_layout {
        config.layout = false;
    }

    if !config.input_dir.is_dir() {
        return Err(RastreioError::ConfigInvalid(format!(
            "input directory {} not found",
            config.input_dir.display()
        )));
    }

    let pdftotext = PdftotextExtractor::new().with_layout(config.layout);
    let backends = Backends {
        pdf: &pdftotext,
        text: &PlainTextExtractor,
    };
    let summary = run_batch(&config, backends)?;

    eprintln!(
        "Processed {} file(s), {} record(s). Report: {}",
        summary.totals.files,
        summary.totals.records,
        summary.report_path.display()
    );

    Ok(())
}
