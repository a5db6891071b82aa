use serde::{Deserialize, Serialize};

/// One vehicle position event parsed from a report block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub position_timestamp: String,
    pub event_timestamp: String,
    pub communication_timestamp: String,
    pub speed: Option<String>,
    pub address: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Record {
    /// Both coordinates present and non-empty.
    pub fn has_coordinates(&self) -> bool {
        matches!(
            (&self.latitude, &self.longitude),
            (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty()
        )
    }

    /// Joint key used for coordinate duplicate detection.
    pub fn coordinates(&self) -> (Option<&str>, Option<&str>) {
        (self.latitude.as_deref(), self.longitude.as_deref())
    }
}

/// Everything extracted from one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceExtract {
    /// File name of the source, used as the report heading.
    pub name: String,
    pub plate: Option<String>,
    pub records: Vec<Record>,
    /// All pages joined by newlines, for the block-count heuristic.
    #[serde(skip)]
    pub raw_text: String,
}

impl SourceExtract {
    pub fn plate_or_empty(&self) -> &str {
        self.plate.as_deref().unwrap_or("")
    }
}
