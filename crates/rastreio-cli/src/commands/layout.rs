use rastreio_core::batch::{discover_sources, SourceKind};
use rastreio_core::error::RastreioError;
use rastreio_core::extraction::pdftotext::PdftotextExtractor;
use rastreio_core::report::tabular::write_word_boxes;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Dump word positions of one PDF, or of every PDF in a directory, to
/// `<out_dir>/<stem>.csv`.
pub fn run(input: PathBuf, out_dir: PathBuf) -> Result<(), RastreioError> {
    let pdfs = if input.is_dir() {
        discover_sources(&input)?
            .into_iter()
            .filter(|p| SourceKind::from_path(p) == Some(SourceKind::Pdf))
            .collect()
    } else {
        vec![input]
    };

    std::fs::create_dir_all(&out_dir)?;
    let extractor = PdftotextExtractor::new();
    for pdf in &pdfs {
        let csv_path = layout_path(&out_dir, pdf);
        let bytes = std::fs::read(pdf)?;
        let words = extractor.extract_word_boxes(&bytes)?;
        write_word_boxes(BufWriter::new(File::create(&csv_path)?), &words)?;
        eprintln!("Wrote {} word(s) to {}", words.len(), csv_path.display());
    }

    Ok(())
}

fn layout_path(out_dir: &Path, pdf: &Path) -> PathBuf {
    let stem = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{stem}.csv"))
}
