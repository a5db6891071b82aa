use rastreio_core::model::Record;
use rastreio_core::report::SourceReport;

pub fn print(report: &SourceReport) {
    let extract = &report.extract;
    let m = &report.metrics;

    println!("=== {} ===\n", extract.name);
    println!("  Plate: {}", extract.plate.as_deref().unwrap_or("(not found)"));
    println!(
        "  Records: {} of {} detected block(s) (coverage {})",
        m.records,
        m.detected_blocks,
        m.coverage_label()
    );
    if !m.min_date.is_empty() {
        println!("  Period: {} .. {}", m.min_date, m.max_date);
    }
    if m.duplicate_position_timestamps > 0 || m.duplicate_coordinates > 0 {
        println!(
            "  Duplicates: {} timestamp(s), {} coordinate pair(s)",
            m.duplicate_position_timestamps, m.duplicate_coordinates
        );
    }
    if m.missing_speed > 0 || m.empty_address > 0 {
        println!(
            "  Gaps: {} without speed, {} without address",
            m.missing_speed, m.empty_address
        );
    }
    println!();

    if extract.records.is_empty() {
        println!("  No positions found.");
        return;
    }

    let speed_width = extract
        .records
        .iter()
        .map(|r| speed(r).len())
        .max()
        .unwrap_or(0)
        .max("Speed".len());

    println!(
        "  {:<19}  {:>sw$}  {:>10}  {:>10}  Address",
        "Position",
        "Speed",
        "Latitude",
        "Longitude",
        sw = speed_width
    );
    for r in &extract.records {
        println!(
            "  {:<19}  {:>sw$}  {:>10}  {:>10}  {}",
            r.position_timestamp,
            speed(r),
            r.latitude.as_deref().unwrap_or(""),
            r.longitude.as_deref().unwrap_or(""),
            r.address,
            sw = speed_width
        );
    }
}

fn speed(record: &Record) -> &str {
    record.speed.as_deref().unwrap_or("-")
}
