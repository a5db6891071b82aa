use crate::error::RastreioError;
use crate::extraction::bbox::{parse_bbox_xml, WordBox};
use crate::extraction::{split_pages, PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// By default runs `pdftotext -layout`, which keeps each table row of a
/// tracking report on one line.
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { layout: true }
    }

    /// Toggle `-layout` mode. Raw mode follows the content stream order.
    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    /// Word-level bounding boxes from `pdftotext -bbox`.
    pub fn extract_word_boxes(&self, pdf_bytes: &[u8]) -> Result<Vec<WordBox>, RastreioError> {
        let stdout = run_pdftotext(&["-bbox", "-enc", "UTF-8"], pdf_bytes)?;
        parse_bbox_xml(&String::from_utf8_lossy(&stdout))
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RastreioError> {
        let mut args = Vec::new();
        if self.layout {
            args.push("-layout");
        }
        args.extend(["-enc", "UTF-8"]);

        let stdout = run_pdftotext(&args, pdf_bytes)?;
        Ok(split_pages(&String::from_utf8_lossy(&stdout)))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Run pdftotext on `pdf_bytes` with `args`, writing to stdout.
fn run_pdftotext(args: &[&str], pdf_bytes: &[u8]) -> Result<Vec<u8>, RastreioError> {
    // Write PDF bytes to a temp file
    let mut tmpfile =
        tempfile::NamedTempFile::new().map_err(|e| RastreioError::Extraction(e.to_string()))?;
    tmpfile
        .write_all(pdf_bytes)
        .map_err(|e| RastreioError::Extraction(e.to_string()))?;

    let output = Command::new("pdftotext")
        .args(args)
        .arg(tmpfile.path())
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RastreioError::PdftotextNotFound
            } else {
                RastreioError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(RastreioError::PdftotextFailed { code, stderr });
    }

    Ok(output.stdout)
}
