pub mod markdown;
pub mod tabular;

use crate::metrics::SourceMetrics;
use crate::model::SourceExtract;
use serde::{Deserialize, Serialize};

/// A processed source: its records plus the metrics derived from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub extract: SourceExtract,
    pub metrics: SourceMetrics,
}

impl SourceReport {
    pub fn new(extract: SourceExtract) -> Self {
        let metrics = SourceMetrics::compute(&extract.raw_text, &extract.records);
        SourceReport { extract, metrics }
    }
}
