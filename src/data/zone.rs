use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Block layout shared by every zone of an SDF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalParameters {
    /// Number of blocks per zone (`NBLK`)
    pub nblk: usize,
    /// Rows per block (`BS`, truncated)
    pub bs: usize,
}

/// One measurement zone as read from an SDF file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zone {
    /// Full header line, e.g. `ZONE 1`
    pub name: String,
    /// Zone parameters. `T1MAX` is already in seconds, `BR` lives under `dum`.
    pub parameters: BTreeMap<String, String>,
    /// Trimmed data rows, each with a numeric third field
    pub data_rows: Vec<String>,
    /// 0 when no tau formula applies, else a 1-based index into the file's formulas
    pub tau_formula_index: usize,
}

impl Zone {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Raw `dum` offset carried over from the `BR` key
    pub fn dum(&self) -> Option<&str> {
        self.parameter("dum")
    }

    /// Raw `T1MAX` string (seconds when it was numeric)
    pub fn t1max(&self) -> Option<&str> {
        self.parameter("T1MAX")
    }
}

/// Why a line inside a `DATA` section was not taken as a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Fewer than three whitespace-separated fields
    TooFewFields,
    /// Third field (or the time/frequency field for FFC-IST) is not a number
    UnparsableValue,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewFields => write!(f, "too few fields"),
            SkipReason::UnparsableValue => write!(f, "unparsable value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Noise collected while parsing; never raised as an error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub skipped: Vec<SkippedLine>,
}

impl Diagnostics {
    pub fn skip(&mut self, line_number: usize, reason: SkipReason) {
        log::trace!("skipping line {}: {}", line_number, reason);
        self.skipped.push(SkippedLine { line_number, reason });
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn count_of(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}

/// Plot-ready view of one output zone
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSeries {
    /// Text after `TAG =`
    pub tag: String,
    /// Time axis in seconds; `None` when the zone printed `N/A`
    pub tau: Option<Vec<f64>>,
    pub values: Vec<f64>,
}

impl ZoneSeries {
    /// `[x, y]` pairs, falling back to the row index when there is no time axis
    pub fn points(&self) -> Vec<[f64; 2]> {
        match &self.tau {
            Some(tau) => tau
                .iter()
                .zip(&self.values)
                .map(|(&t, &v)| [t, v])
                .collect(),
            None => self
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| [i as f64, v])
                .collect(),
        }
    }
}
