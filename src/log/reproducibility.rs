/// Reproducibility logging
///
/// Every operation performed on a data file is recorded with:
/// - Timestamp
/// - Operation name and description
/// - The processing settings that were in effect
/// - Sequential order
///
/// The log can be exported as human-readable text or JSON, so a result
/// file sent to the fitting service can be traced back to its settings.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// A single log entry representing one operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential operation number (1-based)
    pub sequence: usize,
    /// Timestamp when the operation was performed
    pub timestamp: DateTime<Local>,
    /// Human-readable operation name
    pub operation: String,
    /// Detailed description of what was done
    pub description: String,
    /// Settings in effect, e.g. `dialect=SDF range=0:349 normalize=false`
    pub settings: String,
}

impl LogEntry {
    /// Format as human-readable text line
    pub fn to_text(&self) -> String {
        format!(
            "[{:03}] {} | {} | {}\n      Settings: {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.description,
            if self.settings.is_empty() {
                "(n/a)"
            } else {
                self.settings.as_str()
            }
        )
    }
}

/// Ordered record of every operation in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproLog {
    /// Session metadata
    pub session_id: String,
    pub session_start: DateTime<Local>,
    pub source_file: String,
    pub software_version: String,
    /// Ordered list of operations
    pub entries: Vec<LogEntry>,
}

impl ReproLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            source_file: String::new(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: Vec::new(),
        }
    }

    /// Set the source file for this session
    pub fn set_source(&mut self, source: &str) {
        self.source_file = source.to_string();
    }

    /// Add an operation to the log
    pub fn add_entry(&mut self, operation: &str, description: &str, settings: &str) {
        let seq = self.entries.len() + 1;
        self.entries.push(LogEntry {
            sequence: seq,
            timestamp: Local::now(),
            operation: operation.to_string(),
            description: description.to_string(),
            settings: settings.to_string(),
        });
        log::info!("[LOG {:03}] {} — {}", seq, operation, description);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Export as human-readable text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str("  Relaxometry Processing Log\n");
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!("  Session ID:  {}\n", self.session_id));
        out.push_str(&format!(
            "  Started:     {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("  Source:      {}\n", self.source_file));
        out.push_str(&format!("  Software:    relax_gui v{}\n", self.software_version));
        out.push_str(&format!("  Operations:  {}\n", self.entries.len()));
        out.push_str("───────────────────────────────────────────────────────────────\n\n");

        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push_str("\n\n");
        }

        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!(
            "  Log exported: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out
    }

    /// Export as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// Save log as text file
    pub fn save_text(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_text())
    }

    /// Save log as JSON file
    pub fn save_json(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_json())
    }

    /// Save by extension: `.json` writes JSON, anything else text
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => self.save_json(path),
            _ => self.save_text(path),
        }
    }
}

impl Default for ReproLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_creation_and_entries() {
        let mut log = ReproLog::new();
        assert_eq!(log.len(), 0);

        log.add_entry("Process", "Processed run.sdf: 3 zones", "dialect=SDF range= normalize=false");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].sequence, 1);
        assert_eq!(log.entries[0].operation, "Process");

        log.add_entry("Normalize", "Normalized 3 zones", "");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries[1].sequence, 2);
    }

    #[test]
    fn test_text_export() {
        let mut log = ReproLog::new();
        log.set_source("run.sdf");
        log.add_entry("Process", "Processed 2 zones", "range=1:1");
        log.add_entry("Save Output", "Saved to out.txt", "");
        let text = log.to_text();
        assert!(text.contains("Source:      run.sdf"));
        assert!(text.contains("Settings: range=1:1"));
        assert!(text.contains("Settings: (n/a)"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut log = ReproLog::new();
        log.add_entry("Test", "test desc", "test settings");
        let json = log.to_json();
        let parsed: ReproLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.session_id, log.session_id);
    }

    #[test]
    fn test_save_picks_format_by_extension() {
        let dir = std::env::temp_dir().join(format!("relax_log_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut log = ReproLog::new();
        log.add_entry("Process", "desc", "");

        let json_path = dir.join("log.json");
        log.save(&json_path).unwrap();
        let parsed: ReproLog =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);

        let text_path = dir.join("log.txt");
        log.save(&text_path).unwrap();
        assert!(std::fs::read_to_string(&text_path).unwrap().contains("Relaxometry Processing Log"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
