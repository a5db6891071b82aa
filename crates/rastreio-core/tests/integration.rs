//! Integration tests for the extraction pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use rastreio_core::batch::{run_batch, Backends};
use rastreio_core::config::BatchConfig;
use rastreio_core::error::RastreioError;
use rastreio_core::extraction::plain_text::PlainTextExtractor;
use rastreio_core::extraction::{PageContent, PdfExtractor};
use rastreio_core::{analyze_pdf, extract_pdf};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RastreioError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingExtractor;

impl PdfExtractor for FailingExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RastreioError> {
        Err(RastreioError::Extraction("corrupt xref table".into()))
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

const BLOCK_A: &str = "01/01/2024 10:00:00 01/01/2024 10:00:01 01/01/2024 10:00:05 35 Posição Rua das Flores 123 -23.5505 -46.6333";

// ---------------------------------------------------------------------------
// Scenario A: a complete block becomes one record with the source plate
// ---------------------------------------------------------------------------
#[test]
fn complete_block_extracted_with_plate() {
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            &[
                "Relatório de Posições",
                "Placa: ABC1D23",
                "Data Posição  Data Evento  Data Comunicação  Velocidade  Endereço",
                BLOCK_A,
            ],
        )],
    };

    let extract = extract_pdf("frota.pdf", &[], &extractor).unwrap();

    assert_eq!(extract.plate.as_deref(), Some("ABC1D23"));
    assert_eq!(extract.records.len(), 1);
    let r = &extract.records[0];
    assert_eq!(r.position_timestamp, "01/01/2024 10:00:00");
    assert_eq!(r.event_timestamp, "01/01/2024 10:00:01");
    assert_eq!(r.communication_timestamp, "01/01/2024 10:00:05");
    assert_eq!(r.speed.as_deref(), Some("35"));
    assert_eq!(r.address, "Rua das Flores 123");
    assert_eq!(r.latitude.as_deref(), Some("-23.5505"));
    assert_eq!(r.longitude.as_deref(), Some("-46.6333"));
}

// ---------------------------------------------------------------------------
// Scenario B: two timestamps never make a record
// ---------------------------------------------------------------------------
#[test]
fn two_timestamp_block_yields_nothing() {
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            &[
                "01/01/2024 10:00:00 01/01/2024 10:00:01 35 Posição Rua A -23.5505 -46.6333",
            ],
        )],
    };

    let report = analyze_pdf("b.pdf", &[], &extractor).unwrap();
    assert!(report.extract.records.is_empty());
    assert_eq!(report.metrics.detected_blocks, 0);
}

// ---------------------------------------------------------------------------
// Scenario C: a block without coordinates lowers coverage
// ---------------------------------------------------------------------------
#[test]
fn block_without_coordinates_lowers_coverage() {
    let no_coords = BLOCK_A.replace(" -23.5505 -46.6333", "");
    let extractor = MockExtractor {
        pages: vec![page(1, &[BLOCK_A, &no_coords])],
    };

    let report = analyze_pdf("c.pdf", &[], &extractor).unwrap();
    assert_eq!(report.extract.records.len(), 1);
    assert_eq!(report.metrics.detected_blocks, 2);
    assert_eq!(report.metrics.coverage_ratio, 0.5);
    assert!(report.extract.records.iter().all(|r| r.has_coordinates()));
}

// ---------------------------------------------------------------------------
// Scenario D: an empty source reports zero coverage and no dates
// ---------------------------------------------------------------------------
#[test]
fn empty_source_has_zero_coverage() {
    let extractor = MockExtractor {
        pages: vec![page(1, &["Placa: XYZ9876", "Nenhuma posição no período"])],
    };

    let report = analyze_pdf("d.pdf", &[], &extractor).unwrap();
    assert_eq!(report.metrics.records, 0);
    assert_eq!(report.metrics.detected_blocks, 0);
    assert_eq!(report.metrics.coverage_ratio, 0.0);
    assert_eq!(report.metrics.min_date, "");
    assert_eq!(report.metrics.max_date, "");
}

// ---------------------------------------------------------------------------
// Multi-line rows across pages, with the plate only on page one
// ---------------------------------------------------------------------------
#[test]
fn multi_page_report_with_wrapped_rows() {
    let extractor = MockExtractor {
        pages: vec![
            page(
                1,
                &[
                    "Placa: QRS-4567",
                    "02/03/2024 08:00:00  02/03/2024 08:00:00  02/03/2024 08:00:03  0   Sim  Posição",
                    "   Av. Brasil, 1500 - Centro",
                    "   -22.9068 -43.1729",
                    "02/03/2024 08:05:00  02/03/2024 08:05:00  02/03/2024 08:05:02  48  Sim  Posição",
                    "   Av. Brasil, 2000 -22.9100 -43.1800",
                ],
            ),
            page(
                2,
                &[
                    "Página 2",
                    "02/03/2024 08:10:00  02/03/2024 08:10:00  02/03/2024 08:10:04  51  Sim  Posição",
                    "   Av. Brasil, 2000 -22.9100 -43.1800",
                ],
            ),
        ],
    };

    let report = analyze_pdf("rio.pdf", &[], &extractor).unwrap();
    let records = &report.extract.records;

    assert_eq!(report.extract.plate.as_deref(), Some("QRS-4567"));
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].address, "Av. Brasil, 1500 - Centro");
    assert_eq!(records[0].speed.as_deref(), Some("0"));
    assert_eq!(records[2].speed.as_deref(), Some("51"));
    assert_eq!(report.metrics.detected_blocks, 3);
    assert_eq!(report.metrics.coverage_ratio, 1.0);
    assert_eq!(report.metrics.duplicate_coordinates, 1);
    assert_eq!(report.metrics.duplicate_position_timestamps, 0);
    assert_eq!(report.metrics.min_date, "2024-03-02T08:00:00");
    assert_eq!(report.metrics.max_date, "2024-03-02T08:10:00");
}

// ---------------------------------------------------------------------------
// Extraction errors surface from the single-file API
// ---------------------------------------------------------------------------
#[test]
fn extraction_error_propagates() {
    let result = extract_pdf("broken.pdf", &[], &FailingExtractor);
    assert!(matches!(result, Err(RastreioError::Extraction(_))));
}

// ---------------------------------------------------------------------------
// Batch run over pre-extracted text files, one of them undecodable
// ---------------------------------------------------------------------------
#[test]
fn batch_writes_extracts_and_report() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    std::fs::write(
        input.path().join("a.txt"),
        format!("Placa: ABC1234\n{BLOCK_A}\n\x0c{}\n", BLOCK_A.replace("10:00:00", "11:00:00")),
    )
    .unwrap();
    std::fs::write(input.path().join("b.pdf"), b"%PDF-1.4 garbage").unwrap();
    std::fs::write(input.path().join("ignored.md"), b"# notes").unwrap();

    let config = BatchConfig {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().join("csv"),
        report_path: output.path().join("relatorio.md"),
        jobs: Some(2),
        layout: true,
    };
    let backends = Backends {
        pdf: &FailingExtractor,
        text: &PlainTextExtractor,
    };

    let summary = run_batch(&config, backends).unwrap();

    assert_eq!(summary.sources.len(), 2);
    assert_eq!(summary.sources[0].extract.name, "a.txt");
    assert_eq!(summary.sources[1].extract.name, "b.pdf");
    assert_eq!(summary.totals.files, 2);
    assert_eq!(summary.totals.records, 2);
    assert_eq!(summary.totals.min_date(), "2024-01-01T10:00:00");
    assert_eq!(summary.totals.max_date(), "2024-01-01T11:00:00");

    let csv_a = std::fs::read_to_string(output.path().join("csv/a_positions.csv")).unwrap();
    let lines: Vec<&str> = csv_a.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "plate,position_timestamp,speed,address,latitude,longitude");
    assert!(lines[1].starts_with("ABC1234,01/01/2024 10:00:00,35,"));
    assert!(lines[2].starts_with("ABC1234,01/01/2024 11:00:00,35,"));

    let csv_b = std::fs::read_to_string(output.path().join("csv/b_positions.csv")).unwrap();
    assert_eq!(csv_b.lines().count(), 1);

    let report = std::fs::read_to_string(&summary.report_path).unwrap();
    assert!(report.contains("- Files processed: **2**"));
    assert!(report.contains("| a.txt | ABC1234 | 2 | 2 | 1.0 |"));
    assert!(report.contains("## PDF: b.pdf"));
}

// ---------------------------------------------------------------------------
// Sources sharing a stem keep separate extracts
// ---------------------------------------------------------------------------
#[test]
fn batch_keeps_extracts_of_sources_sharing_a_stem() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    std::fs::write(input.path().join("a.pdf"), format!("Placa: PDF0001\n{BLOCK_A}\n")).unwrap();
    std::fs::write(input.path().join("a.txt"), format!("Placa: TXT0001\n{BLOCK_A}\n")).unwrap();

    let config = BatchConfig {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        report_path: output.path().join("relatorio.md"),
        jobs: Some(1),
        layout: true,
    };
    let backends = Backends {
        pdf: &PlainTextExtractor,
        text: &PlainTextExtractor,
    };

    let summary = run_batch(&config, backends).unwrap();

    assert_eq!(summary.extract_paths.len(), 2);
    let csv_files = std::fs::read_dir(output.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "csv"))
        .count();
    assert_eq!(csv_files, 2);

    let pdf = std::fs::read_to_string(output.path().join("a_pdf_positions.csv")).unwrap();
    let txt = std::fs::read_to_string(output.path().join("a_txt_positions.csv")).unwrap();
    assert!(pdf.lines().nth(1).unwrap().starts_with("PDF0001,"));
    assert!(txt.lines().nth(1).unwrap().starts_with("TXT0001,"));
}
