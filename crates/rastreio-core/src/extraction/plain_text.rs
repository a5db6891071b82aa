use crate::error::RastreioError;
use crate::extraction::{split_pages, PageContent, PdfExtractor};

/// Backend for reports that were already converted to text, e.g. with
/// `pdftotext report.pdf report.txt`. Pages are separated by form feeds.
pub struct PlainTextExtractor;

impl PdfExtractor for PlainTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, RastreioError> {
        Ok(split_pages(&String::from_utf8_lossy(bytes)))
    }

    fn backend_name(&self) -> &str {
        "plain-text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let pages = PlainTextExtractor
            .extract_pages(b"Placa: \xffABC1234\x0cnext")
            .unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].lines[0].contains('\u{fffd}'));
    }
}
