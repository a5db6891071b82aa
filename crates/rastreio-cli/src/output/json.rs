use rastreio_core::error::RastreioError;
use rastreio_core::report::SourceReport;

pub fn print(report: &SourceReport) -> Result<(), RastreioError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
