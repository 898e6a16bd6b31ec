/// Processing entry point
///
/// One call turns a complete input buffer into a complete output buffer.
/// Structural problems abort with a `ProcessError`; everything else
/// (bad row range, unusable tau formula, noise rows) is absorbed and shows
/// up as warnings or diagnostics in the returned `ProcessReport`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::averaging::{self, RowRange};
use super::normalize;
use super::serialize::{self, BlockedZone};
use super::series;
use super::tau;
use crate::data::ffc_ist;
use crate::data::sdf::{self, SdfFile};
use crate::data::zone::{Diagnostics, Zone, ZoneSeries};
use crate::error::ProcessError;

/// Supported input dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputDialect {
    /// Zone-structured SDF dump
    #[default]
    Sdf,
    /// Comma-separated FFC-IST table
    FfcIst,
}

impl InputDialect {
    pub const ALL: [InputDialect; 2] = [InputDialect::Sdf, InputDialect::FfcIst];

    /// Guess the dialect from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "sdf" => Some(InputDialect::Sdf),
            "csv" => Some(InputDialect::FfcIst),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputDialect::Sdf => write!(f, "SDF"),
            InputDialect::FfcIst => write!(f, "FFC-IST"),
        }
    }
}

/// Knobs for one processing run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOptions {
    pub dialect: InputDialect,
    /// `start:end` window inside every block; empty for none
    pub row_range: String,
    /// Rescale each zone's value column to [0, 1] afterwards
    pub normalize: bool,
    /// Input file stem, used as FFC-IST sample name fallback
    pub source_stem: Option<String>,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessReport {
    pub output: String,
    pub series: Vec<ZoneSeries>,
    pub warnings: Vec<String>,
    pub diagnostics: Diagnostics,
    pub zone_count: usize,
}

impl ProcessReport {
    fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Run the pipeline for the selected dialect
pub fn process(input: &str, options: &ProcessOptions) -> Result<ProcessReport, ProcessError> {
    log::info!("Processing {} input ({} bytes)", options.dialect, input.len());

    let mut report = match options.dialect {
        InputDialect::Sdf => process_sdf(input, options)?,
        InputDialect::FfcIst => process_ffc_ist(input, options),
    };

    if options.normalize {
        report.output = normalize::normalize_text(&report.output);
    }
    report.series = series::read_series(&report.output);

    if report.diagnostics.skipped_count() > 0 {
        log::info!(
            "Skipped {} noise lines",
            report.diagnostics.skipped_count()
        );
    }
    log::info!(
        "Processed {} zones with {} warnings",
        report.zone_count,
        report.warnings.len()
    );
    Ok(report)
}

/// Read a file and run the pipeline on it
pub fn process_file(path: &Path, options: &ProcessOptions) -> Result<ProcessReport, ProcessError> {
    let input = std::fs::read_to_string(path)?;
    let mut options = options.clone();
    if options.source_stem.is_none() {
        options.source_stem = path.file_stem().map(|s| s.to_string_lossy().to_string());
    }
    process(&input, &options)
}

fn process_sdf(input: &str, options: &ProcessOptions) -> Result<ProcessReport, ProcessError> {
    let mut report = ProcessReport::default();

    let range = match RowRange::parse(&options.row_range) {
        Ok(range) => range,
        Err(e) => {
            report.warn(e.to_string());
            None
        }
    };
    if let Some(range) = range {
        log::debug!("Averaging rows {} of every block", range);
    }

    let file = sdf::parse_sdf(input)?;
    let blocked: Vec<BlockedZone> = file
        .zones
        .iter()
        .map(|zone| block_zone(&file, zone, range, &mut report))
        .collect();

    report.output = serialize::render_zones(&blocked);
    report.zone_count = blocked.len();
    report.diagnostics = file.diagnostics;
    Ok(report)
}

fn block_zone(
    file: &SdfFile,
    zone: &Zone,
    range: Option<RowRange>,
    report: &mut ProcessReport,
) -> BlockedZone {
    let t1max = match zone.t1max() {
        None => 1.0,
        Some(raw) => raw.parse::<f64>().unwrap_or_else(|_| {
            report.warn(format!(
                "{}: T1MAX '{}' is not a number, using 1.0",
                zone.name, raw
            ));
            1.0
        }),
    };

    let tau_formula = file.tau_formula_for(zone).map(str::to_string);
    let tau_values = match &tau_formula {
        None => Vec::new(),
        Some(formula) => match tau::tau_for_zone(formula, t1max) {
            Ok(Some(values)) => values,
            Ok(None) => {
                log::debug!("{}: '{}' is not a tau formula", zone.name, formula);
                Vec::new()
            }
            Err(e) => {
                report.warn(format!("{}: {}", zone.name, e));
                Vec::new()
            }
        },
    };

    BlockedZone {
        dum: zone.dum().map(str::to_string),
        t1max,
        tau_formula,
        tau_values,
        block_means: averaging::block_means(&zone.data_rows, file.globals, range),
    }
}

fn process_ffc_ist(input: &str, options: &ProcessOptions) -> ProcessReport {
    let mut report = ProcessReport::default();
    if !options.row_range.trim().is_empty() {
        log::debug!("Row range does not apply to FFC-IST input, ignoring");
    }

    let conversion = ffc_ist::convert(input, options.source_stem.as_deref());
    if conversion.group_count == 0 {
        report.warn("No FFC-IST data rows found".to_string());
    }
    report.output = conversion.output;
    report.zone_count = conversion.group_count;
    report.diagnostics = conversion.diagnostics;
    report
}
