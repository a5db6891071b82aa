use crate::model::Record;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::LazyLock;

/// Three timestamps in a row, each followed by whitespace.
static BLOCK_HEURISTIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2}\s+){3}")
        .expect("block heuristic pattern is valid")
});

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Records shown in full before the sample switches to head + tail.
const SAMPLE_EDGE: usize = 3;

/// Data-quality figures for one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetrics {
    pub records: usize,
    pub detected_blocks: usize,
    pub coverage_ratio: f64,
    pub duplicate_position_timestamps: usize,
    pub duplicate_coordinates: usize,
    pub missing_speed: usize,
    pub empty_address: usize,
    /// ISO 8601, empty when no timestamp parsed.
    pub min_date: String,
    pub max_date: String,
}

impl SourceMetrics {
    /// Compute metrics from the raw text of a source and its kept records.
    ///
    /// The block count is a textual heuristic over `raw_text` and does not
    /// depend on how segmentation went.
    pub fn compute(raw_text: &str, records: &[Record]) -> Self {
        let detected_blocks = count_detected_blocks(raw_text);
        let (min_date, max_date) = date_range(records);

        SourceMetrics {
            records: records.len(),
            detected_blocks,
            coverage_ratio: coverage_ratio(records.len(), detected_blocks),
            duplicate_position_timestamps: count_duplicates(
                records.iter().map(|r| r.position_timestamp.as_str()),
            ),
            duplicate_coordinates: count_duplicates(records.iter().map(Record::coordinates)),
            missing_speed: records.iter().filter(|r| r.speed.is_none()).count(),
            empty_address: records
                .iter()
                .filter(|r| r.address.trim().is_empty())
                .count(),
            min_date: min_date.map(format_iso).unwrap_or_default(),
            max_date: max_date.map(format_iso).unwrap_or_default(),
        }
    }

    /// Coverage as shown in reports: `0` without detected blocks, otherwise
    /// the rounded ratio with at least one decimal (`1.0`, `0.0`, `0.6667`).
    pub fn coverage_label(&self) -> String {
        if self.detected_blocks == 0 {
            return "0".to_string();
        }
        let label = self.coverage_ratio.to_string();
        if label.contains('.') {
            label
        } else {
            format!("{label}.0")
        }
    }
}

/// Non-overlapping runs of three consecutive timestamps in `text`.
pub fn count_detected_blocks(text: &str) -> usize {
    BLOCK_HEURISTIC.find_iter(text).count()
}

/// `records / blocks` rounded to four decimals, 0 without blocks.
///
/// Ties round to even on the exact binary value, so 1/32 gives 0.0312.
pub fn coverage_ratio(records: usize, blocks: usize) -> f64 {
    if blocks == 0 {
        return 0.0;
    }
    let ratio = records as f64 / blocks as f64;
    format!("{ratio:.4}").parse().unwrap_or(ratio)
}

/// Occurrences of a key already seen earlier in the sequence.
pub fn count_duplicates<K, I>(keys: I) -> usize
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    for key in keys {
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Parse a report timestamp. Returns None for anything off-pattern.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

pub fn format_iso(dt: NaiveDateTime) -> String {
    dt.format(ISO_FORMAT).to_string()
}

fn date_range(records: &[Record]) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let parsed: Vec<NaiveDateTime> = records
        .iter()
        .filter_map(|r| parse_timestamp(&r.position_timestamp))
        .collect();
    (parsed.iter().min().copied(), parsed.iter().max().copied())
}

/// Display sample: everything up to six records, otherwise the first three
/// and last three in original order.
pub fn sample(records: &[Record]) -> Vec<&Record> {
    if records.len() <= 2 * SAMPLE_EDGE {
        return records.iter().collect();
    }
    records[..SAMPLE_EDGE]
        .iter()
        .chain(&records[records.len() - SAMPLE_EDGE..])
        .collect()
}

/// Running totals over every processed source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchTotals {
    pub files: usize,
    pub records: usize,
    #[serde(skip)]
    min_date: Option<NaiveDateTime>,
    #[serde(skip)]
    max_date: Option<NaiveDateTime>,
}

impl BatchTotals {
    /// Fold one source's metrics into the totals.
    pub fn absorb(&mut self, metrics: &SourceMetrics) {
        self.files += 1;
        self.records += metrics.records;

        let Some(min) = parse_iso(&metrics.min_date) else {
            return;
        };
        let max = parse_iso(&metrics.max_date).unwrap_or(min);
        if self.min_date.map_or(true, |current| min < current) {
            self.min_date = Some(min);
        }
        if self.max_date.map_or(true, |current| max > current) {
            self.max_date = Some(max);
        }
    }

    pub fn min_date(&self) -> String {
        self.min_date.map(format_iso).unwrap_or_default()
    }

    pub fn max_date(&self) -> String {
        self.max_date.map(format_iso).unwrap_or_default()
    }
}

impl<'a> FromIterator<&'a SourceMetrics> for BatchTotals {
    fn from_iter<I: IntoIterator<Item = &'a SourceMetrics>>(iter: I) -> Self {
        let mut totals = BatchTotals::default();
        for metrics in iter {
            totals.absorb(metrics);
        }
        totals
    }
}

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, ISO_FORMAT).ok()
}
