use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::LabReport;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create output directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize report for {0}: {1}")]
    Serialize(String, serde_json::Error),

    #[error("Failed to write report {0}: {1}")]
    Write(PathBuf, std::io::Error),
}

/// `<file name>_parsed.json` for a source file. The extension is kept so
/// `lab.txt` and `lab.pdf` in one folder map to different outputs.
pub fn report_file_name(file: &str) -> String {
    let name = Path::new(file)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "report".to_string());
    format!("{name}_parsed.json")
}

/// Write `report` as pretty-printed JSON into `dir`, creating it if needed.
/// An existing file for the same source is overwritten.
pub fn save_report(report: &LabReport, dir: &Path) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportError::CreateDir(dir.to_path_buf(), e))?;

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| ReportError::Serialize(report.file.clone(), e))?;

    let path = dir.join(report_file_name(&report.file));
    std::fs::write(&path, json).map_err(|e| ReportError::Write(path.clone(), e))?;

    tracing::debug!(path = %path.display(), "Saved parsed report");
    Ok(path)
}
