/// Fit-result reader for unpacked fitting-service downloads
///
/// The fitting service returns a zip archive whose JSON report carries a
/// `fit-results` string: a pipe-separated table with a header row. This
/// module finds the first JSON report under a results folder and turns that
/// string into a tab-separated table suitable for pasting into a spreadsheet.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No JSON file found in {0} or its subfolders")]
    NoJsonFile(PathBuf),
    #[error("'fit-results' key not found. Available keys: {0:?}")]
    FitResultsMissing(Vec<String>),
}

/// Parsed `fit-results` table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FitTable {
    /// Parse the pipe-separated table. Cells are separated by ` | `.
    pub fn parse(fit_results: &str) -> Self {
        let cleaned = fit_results.replace(" | ", "\t");
        let mut lines = cleaned.trim().split('\n');
        let split = |line: &str| line.split('\t').map(str::to_string).collect::<Vec<_>>();

        let headers = lines.next().map(split).unwrap_or_default();
        let rows = lines.map(split).collect();
        Self { headers, rows }
    }

    /// Tab-separated rendering with a `Headers:` preamble
    pub fn to_display_text(&self) -> String {
        let mut out = format!("Headers:\n{}\n\n", self.headers.join("\t"));
        for row in &self.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}

/// Depth-first search for the first `*.json` file. Files of a folder are
/// checked before its subfolders; entries are visited in name order.
pub fn find_first_json(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|e| e.path())
        .collect();
    entries.sort();

    let is_json = |p: &PathBuf| {
        p.extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    };
    if let Some(found) = entries.iter().find(|p| p.is_file() && is_json(p)) {
        return Ok(Some(found.clone()));
    }
    for sub in entries.iter().filter(|p| p.is_dir()) {
        if let Some(found) = find_first_json(sub)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Read the `fit-results` table from one JSON report
pub fn read_fit_results(path: &Path) -> Result<FitTable, FitResultsError> {
    let json = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    match value.get("fit-results").and_then(|v| v.as_str()) {
        Some(table) if !table.is_empty() => Ok(FitTable::parse(table)),
        _ => {
            let keys = value
                .as_object()
                .map(|o| o.keys().cloned().collect())
                .unwrap_or_default();
            Err(FitResultsError::FitResultsMissing(keys))
        }
    }
}

/// Locate and read the first report under `dir`
pub fn load_from_folder(dir: &Path) -> Result<(PathBuf, FitTable), FitResultsError> {
    let path = find_first_json(dir)?.ok_or_else(|| FitResultsError::NoJsonFile(dir.to_path_buf()))?;
    log::info!("Reading fit results from {}", path.display());
    let table = read_fit_results(&path)?;
    Ok((path, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("relax_fit_{}_{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_table() {
        let table = FitTable::parse("Zone | T11 | err\nZone1 | 0.12 | 0.01\nZone2 | 0.34 | 0.02\n");
        assert_eq!(table.headers, vec!["Zone", "T11", "err"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Zone2", "0.34", "0.02"]);
        assert_eq!(
            table.to_display_text(),
            "Headers:\nZone\tT11\terr\n\nZone1\t0.12\t0.01\nZone2\t0.34\t0.02\n"
        );
    }

    #[test]
    fn test_load_from_nested_folder() {
        let dir = scratch_dir("nested");
        let nested = dir.join("job-1").join("out");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.join("notes.txt"), "not json").unwrap();
        fs::write(
            nested.join("report.json"),
            r#"{"fit-results": "a | b\n1 | 2", "status": "ok"}"#,
        )
        .unwrap();

        let (path, table) = load_from_folder(&dir).unwrap();
        assert!(path.ends_with("report.json"));
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "2".to_string()]]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_key_lists_available_keys() {
        let dir = scratch_dir("missing");
        let report = dir.join("report.json");
        fs::write(&report, r#"{"status": "failed", "message": "bad file"}"#).unwrap();

        match read_fit_results(&report) {
            Err(FitResultsError::FitResultsMissing(keys)) => {
                assert!(keys.contains(&"status".to_string()));
                assert!(keys.contains(&"message".to_string()));
            }
            other => panic!("expected missing key error, got {:?}", other),
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_folder_has_no_report() {
        let dir = scratch_dir("empty");
        assert!(matches!(
            load_from_folder(&dir),
            Err(FitResultsError::NoJsonFile(_))
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
