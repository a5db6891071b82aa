use rastreio_core::batch::SourceKind;
use rastreio_core::extraction::pdftotext::PdftotextExtractor;
use rastreio_core::extraction::plain_text::PlainTextExtractor;
use rastreio_core::extraction::PdfExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    layout: bool,
) -> Result<(), rastreio_core::error::RastreioError> {
    let bytes = std::fs::read(&input_file)?;
    let name = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_file.display().to_string());

    let pdftotext = PdftotextExtractor::new().with_layout(layout);
    let extractor: &dyn PdfExtractor = match SourceKind::from_path(&input_file) {
        Some(SourceKind::Text) => &PlainTextExtractor,
        _ => &pdftotext,
    };
    let report = rastreio_core::analyze_pdf(&name, &bytes, extractor)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report),
    }

    Ok(())
}
