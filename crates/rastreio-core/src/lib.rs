pub mod batch;
pub mod config;
pub mod error;
pub mod extraction;
pub mod metrics;
pub mod model;
pub mod parsing;
pub mod report;

use error::RastreioError;
use extraction::{full_text, PageContent, PdfExtractor};
use model::SourceExtract;
use parsing::collect_records;
use parsing::plate::extract_plate;
use report::SourceReport;

/// Main API entry point: extract the vehicle positions of one PDF report.
pub fn extract_pdf(
    name: &str,
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<SourceExtract, RastreioError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    Ok(extract_source(name, &pages))
}

/// Extract positions from already decoded pages.
///
/// The plate is looked up on the first page only and attached to the
/// whole source.
pub fn extract_source(name: &str, pages: &[PageContent]) -> SourceExtract {
    let plate = pages.first().and_then(|p| extract_plate(&p.text()));
    let records = collect_records(pages);
    tracing::debug!(
        source = name,
        pages = pages.len(),
        records = records.len(),
        plate = plate.as_deref().unwrap_or(""),
        "parsed source"
    );

    SourceExtract {
        name: name.to_string(),
        plate,
        records,
        raw_text: full_text(pages),
    }
}

/// Extract positions and compute the quality metrics of one PDF report.
pub fn analyze_pdf(
    name: &str,
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<SourceReport, RastreioError> {
    Ok(SourceReport::new(extract_pdf(name, pdf_bytes, extractor)?))
}
