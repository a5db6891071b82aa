use crate::error::RastreioError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a batch run over a directory of reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Directory scanned for `.pdf` and `.txt` reports.
    pub input_dir: PathBuf,
    /// Directory receiving one `<stem>_positions.csv` per report.
    pub output_dir: PathBuf,
    /// Path of the aggregated Markdown report.
    pub report_path: PathBuf,
    /// Worker threads; rayon's default when unset.
    pub jobs: Option<usize>,
    /// Run pdftotext with `-layout`.
    pub layout: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            input_dir: PathBuf::from("sourcePdf"),
            output_dir: PathBuf::from("output"),
            report_path: PathBuf::from("relatorio_extracao.md"),
            jobs: None,
            layout: true,
        }
    }
}

impl BatchConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, RastreioError> {
        let content = std::fs::read_to_string(path).map_err(|e| RastreioError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: BatchConfig =
            serde_json::from_str(&content).map_err(|e| RastreioError::ConfigLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RastreioError> {
        if self.jobs == Some(0) {
            return Err(RastreioError::ConfigInvalid(
                "jobs must be at least 1".into(),
            ));
        }
        if self.input_dir.as_os_str().is_empty() {
            return Err(RastreioError::ConfigInvalid(
                "input_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}
