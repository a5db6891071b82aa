use crate::error::RastreioError;
use crate::extraction::bbox::WordBox;
use crate::model::Record;
use serde::Serialize;
use std::io::Write;

/// Column order of the per-source extract.
pub const EXTRACT_COLUMNS: [&str; 6] = [
    "plate",
    "position_timestamp",
    "speed",
    "address",
    "latitude",
    "longitude",
];

#[derive(Serialize)]
struct ExtractRow<'a> {
    plate: &'a str,
    position_timestamp: &'a str,
    speed: Option<&'a str>,
    address: &'a str,
    latitude: Option<&'a str>,
    longitude: Option<&'a str>,
}

impl<'a> ExtractRow<'a> {
    fn new(plate: &'a str, record: &'a Record) -> Self {
        ExtractRow {
            plate,
            position_timestamp: &record.position_timestamp,
            speed: record.speed.as_deref(),
            address: &record.address,
            latitude: record.latitude.as_deref(),
            longitude: record.longitude.as_deref(),
        }
    }
}

/// Write the CSV extract of one source. The header is written even when
/// there are no records.
pub fn write_extract<W: Write>(
    writer: W,
    plate: &str,
    records: &[Record],
) -> Result<(), RastreioError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(EXTRACT_COLUMNS)?;
    for record in records {
        wtr.serialize(ExtractRow::new(plate, record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Column order of the word layout dump.
pub const LAYOUT_COLUMNS: [&str; 6] = ["page", "text", "x0", "top", "x1", "bottom"];

/// Write word boxes as CSV, header first, one row per word.
pub fn write_word_boxes<W: Write>(writer: W, words: &[WordBox]) -> Result<(), RastreioError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(LAYOUT_COLUMNS)?;
    for word in words {
        wtr.serialize(word)?;
    }
    wtr.flush()?;
    Ok(())
}
