use crate::metrics::{sample, BatchTotals};
use crate::report::tabular::EXTRACT_COLUMNS;
use crate::report::SourceReport;
use std::fmt::Write;

/// Render the aggregate report: global totals, a summary table across
/// sources, then one section per source in the given order.
pub fn render_report(sources: &[SourceReport]) -> String {
    let totals: BatchTotals = sources.iter().map(|s| &s.metrics).collect();
    let mut out = String::new();

    out.push_str("# Position Extraction Report\n\n");
    let _ = writeln!(out, "- Files processed: **{}**", totals.files);
    let _ = writeln!(
        out,
        "- Total records (all plates / PDFs): **{}**",
        totals.records
    );
    let _ = writeln!(out, "- Global min date: **{}**", totals.min_date());
    let _ = writeln!(out, "- Global max date: **{}**", totals.max_date());
    out.push_str("\n## Global Summary\n\n");

    if sources.is_empty() {
        out.push_str("No PDF processed.\n");
    } else {
        out.push_str(
            "| PDF | Plate | Records | Blocks | Coverage | Dups position_timestamp | Dups coordinates | Min date | Max date |\n",
        );
        out.push_str("| --- | --- | ---: | ---: | ---: | ---: | ---: | --- | --- |\n");
        for source in sources {
            let m = &source.metrics;
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                cell(&source.extract.name),
                cell(source.extract.plate_or_empty()),
                m.records,
                m.detected_blocks,
                m.coverage_label(),
                m.duplicate_position_timestamps,
                m.duplicate_coordinates,
                m.min_date,
                m.max_date
            );
        }
    }
    out.push_str("\n---\n\n");

    for source in sources {
        out.push_str(&render_section(source));
        out.push('\n');
    }

    out
}

/// Render the section of a single source.
pub fn render_section(source: &SourceReport) -> String {
    let m = &source.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "## PDF: {}\n", source.extract.name);
    let _ = writeln!(out, "- Plate: **{}**", source.extract.plate_or_empty());
    let _ = writeln!(out, "- Records extracted: **{}**", m.records);
    let _ = writeln!(out, "- Detected blocks (heuristic): **{}**", m.detected_blocks);
    let _ = writeln!(
        out,
        "- Coverage (records/blocks): **{}**",
        m.coverage_label()
    );
    let _ = writeln!(
        out,
        "- Duplicate position_timestamp: **{}**",
        m.duplicate_position_timestamps
    );
    let _ = writeln!(
        out,
        "- Duplicate latitude/longitude: **{}**",
        m.duplicate_coordinates
    );
    let _ = writeln!(out, "- Missing speed: **{}**", m.missing_speed);
    let _ = writeln!(out, "- Empty address: **{}**", m.empty_address);
    let _ = writeln!(out, "- Min date: **{}**", m.min_date);
    let _ = writeln!(out, "- Max date: **{}**", m.max_date);
    out.push_str("\n### Sample (first 3 + last 3)\n\n");

    let _ = writeln!(out, "| {} |", EXTRACT_COLUMNS.join(" | "));
    let _ = writeln!(out, "| {} |", vec!["---"; EXTRACT_COLUMNS.len()].join(" | "));
    let plate = source.extract.plate_or_empty();
    for record in sample(&source.extract.records) {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            cell(plate),
            cell(&record.position_timestamp),
            cell(record.speed.as_deref().unwrap_or("")),
            cell(&record.address),
            cell(record.latitude.as_deref().unwrap_or("")),
            cell(record.longitude.as_deref().unwrap_or("")),
        );
    }

    out
}

/// Escape pipes so free text cannot break the table layout.
fn cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SourceMetrics;
    use crate::model::{Record, SourceExtract};

    fn record(ts: &str) -> Record {
        Record {
            position_timestamp: ts.to_string(),
            event_timestamp: ts.to_string(),
            communication_timestamp: ts.to_string(),
            speed: None,
            address: "Rua | Beco".to_string(),
            latitude: Some("-1.5".to_string()),
            longitude: Some("-2.5".to_string()),
        }
    }

    fn source(name: &str, plate: Option<&str>, records: Vec<Record>, raw: &str) -> SourceReport {
        let metrics = SourceMetrics::compute(raw, &records);
        SourceReport {
            extract: SourceExtract {
                name: name.to_string(),
                plate: plate.map(str::to_string),
                records,
                raw_text: raw.to_string(),
            },
            metrics,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = render_report(&[]);
        assert!(report.starts_with("# Position Extraction Report\n"));
        assert!(report.contains("- Files processed: **0**"));
        assert!(report.contains("- Global min date: ****"));
        assert!(report.contains("No PDF processed."));
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_summary_row_per_source() {
        let raw = "01/01/2024 10:00:00 01/01/2024 10:00:01 01/01/2024 10:00:05 x\n".repeat(2);
        let sources = vec![
            source("a.pdf", Some("ABC1234"), vec![record("01/01/2024 10:00:00")], &raw),
            source("b.pdf", None, vec![], ""),
        ];
        let report = render_report(&sources);
        assert!(report.contains(
            "| a.pdf | ABC1234 | 1 | 2 | 0.5 | 0 | 0 | 2024-01-01T10:00:00 | 2024-01-01T10:00:00 |"
        ));
        assert!(report.contains("| b.pdf |  | 0 | 0 | 0 | 0 | 0 |  |  |"));
        assert!(report.contains("- Files processed: **2**"));
        assert!(report.contains("- Total records (all plates / PDFs): **1**"));
        let a = report.find("## PDF: a.pdf").unwrap();
        let b = report.find("## PDF: b.pdf").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_coverage_keeps_decimal_when_blocks_detected() {
        let raw = "01/01/2024 10:00:00 01/01/2024 10:00:01 01/01/2024 10:00:05 x\n";
        let sources = vec![
            source("full.pdf", None, vec![record("01/01/2024 10:00:00")], raw),
            source("none.pdf", None, vec![], raw),
        ];
        let report = render_report(&sources);
        assert!(report.contains("| full.pdf |  | 1 | 1 | 1.0 |"));
        assert!(report.contains("| none.pdf |  | 0 | 1 | 0.0 |"));
        assert!(report.contains("- Coverage (records/blocks): **1.0**"));
        assert!(report.contains("- Coverage (records/blocks): **0.0**"));
    }

    #[test]
    fn test_section_sample_table() {
        let records = (0..8)
            .map(|i| record(&format!("0{}/01/2024 10:00:00", i + 1)))
            .collect();
        let section = render_section(&source("c.pdf", Some("XYZ9876"), records, ""));
        assert!(section.contains("- Plate: **XYZ9876**"));
        assert!(section.contains("- Missing speed: **8**"));
        assert!(section.contains(
            "| plate | position_timestamp | speed | address | latitude | longitude |"
        ));
        let rows = section.lines().filter(|l| l.starts_with("| XYZ9876 |")).count();
        assert_eq!(rows, 6);
        assert!(section.contains("| XYZ9876 | 01/01/2024 10:00:00 |  | Rua \\| Beco | -1.5 | -2.5 |"));
        assert!(!section.contains("04/01/2024"));
    }
}
