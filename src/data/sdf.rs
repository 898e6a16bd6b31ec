/// SDF zone-file reader
///
/// SDF files are written by field-cycling relaxometers as a flat text dump:
///
/// ```text
/// PARAMETER SUMMARY
/// NBLK = 32
/// BS = 4
/// TAU = [log:0.05*T1MAX:5*T1MAX:32]
/// ZONE 1
/// BR = 0.0125
/// T1MAX = 40000
/// DATA
/// 0.001  12.5  830.1  ...
/// ```
///
/// The reader is a fold over trimmed lines carrying a `ParserState`. Section
/// markers switch the mode, `KEY = VALUE` lines feed the global or zone
/// parameter maps, and lines inside `DATA` become data rows when their third
/// field is numeric. Zones that never collect a row are dropped.

use std::collections::BTreeMap;

use crate::data::numfmt;
use crate::data::zone::{Diagnostics, GlobalParameters, SkipReason, Zone};
use crate::error::ProcessError;

/// Where the reader currently is in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Before the first section marker
    #[default]
    Outside,
    /// Inside a `PARAMETER SUMMARY` block, no zone open
    ParameterSummary,
    /// A zone is open, reading its parameters
    ZoneParams,
    /// A zone is open and past its `DATA` line
    ZoneData,
}

/// Everything the reader extracted from one file
#[derive(Debug, Clone, PartialEq)]
pub struct SdfFile {
    pub globals: GlobalParameters,
    /// Full `TAU = [...]` lines in order of appearance
    pub tau_formulas: Vec<String>,
    /// Zones with at least one data row, in file order
    pub zones: Vec<Zone>,
    pub diagnostics: Diagnostics,
}

impl SdfFile {
    /// The formula a zone refers to, if any
    pub fn tau_formula_for(&self, zone: &Zone) -> Option<&str> {
        match zone.tau_formula_index {
            0 => None,
            i => self.tau_formulas.get(i - 1).map(String::as_str),
        }
    }
}

/// Zone being accumulated
#[derive(Debug, Clone, Default)]
struct OpenZone {
    zone: Zone,
    /// Set on the first `DATA` line; later `DATA` lines do not move the formula cursor
    data_started: bool,
}

/// Fold state of the reader
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    mode: ParseMode,
    open: Option<OpenZone>,
    zones: Vec<Zone>,
    /// Raw `NBLK` / `BS` values; later assignments overwrite earlier ones
    globals: BTreeMap<&'static str, String>,
    tau_formulas: Vec<String>,
    /// Formulas consumed so far; a zone entering `DATA` takes the next one if there is one
    tau_cursor: usize,
    diagnostics: Diagnostics,
}

impl ParserState {
    #[cfg(test)]
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Advance the state machine by one input line
    pub fn step(mut self, line_number: usize, raw: &str) -> Self {
        let line = raw.trim();

        if line.contains("PARAMETER SUMMARY") {
            self.close_zone();
            self.mode = ParseMode::ParameterSummary;
            return self;
        }

        if line.starts_with("ZONE") {
            self.close_zone();
            self.open = Some(OpenZone {
                zone: Zone::new(line),
                data_started: false,
            });
            self.mode = ParseMode::ZoneParams;
            return self;
        }

        if let Some((name, value)) = split_parameter(line) {
            self.extract_parameter(name, value, line);
        }

        if line == "DATA" && self.open.is_some() {
            self.enter_data();
            return self;
        }

        if self.mode == ParseMode::ZoneData {
            self.accept_data_row(line_number, line);
        }

        self
    }

    /// Close the last zone and resolve the global block layout
    pub fn finish(mut self) -> Result<SdfFile, ProcessError> {
        self.close_zone();

        let nblk_raw = self
            .globals
            .get("NBLK")
            .ok_or(ProcessError::MissingGlobalParameter("NBLK"))?;
        let bs_raw = self
            .globals
            .get("BS")
            .ok_or(ProcessError::MissingGlobalParameter("BS"))?;

        let globals = GlobalParameters {
            nblk: parse_block_count(nblk_raw)?,
            bs: parse_block_size(bs_raw)?,
        };

        log::debug!(
            "SDF parsed: {} zones, {} tau formulas, NBLK={}, BS={}",
            self.zones.len(),
            self.tau_formulas.len(),
            globals.nblk,
            globals.bs
        );

        Ok(SdfFile {
            globals,
            tau_formulas: self.tau_formulas,
            zones: self.zones,
            diagnostics: self.diagnostics,
        })
    }

    fn close_zone(&mut self) {
        if let Some(open) = self.open.take() {
            if open.zone.data_rows.is_empty() {
                log::debug!("Dropping '{}': no data rows", open.zone.name);
            } else {
                self.zones.push(open.zone);
            }
        }
    }

    fn extract_parameter(&mut self, name: &str, value: &str, line: &str) {
        match self.mode {
            ParseMode::ParameterSummary => match name {
                "NBLK" => {
                    self.globals.insert("NBLK", value.to_string());
                }
                "BS" => {
                    self.globals.insert("BS", value.to_string());
                }
                "TAU" => self.tau_formulas.push(line.to_string()),
                _ => {}
            },
            ParseMode::ZoneParams | ParseMode::ZoneData => {
                let Some(open) = self.open.as_mut() else {
                    return;
                };
                let params = &mut open.zone.parameters;
                match name {
                    "T1MAX" => {
                        let stored = match value.parse::<f64>() {
                            Ok(us) => numfmt::repr_f64(us / 1_000_000.0),
                            Err(_) => value.to_string(),
                        };
                        params.insert("T1MAX".to_string(), stored);
                    }
                    "BR" => {
                        params.insert("dum".to_string(), value.to_string());
                    }
                    _ => {
                        params.insert(name.to_string(), value.to_string());
                    }
                }
            }
            ParseMode::Outside => {}
        }
    }

    fn enter_data(&mut self) {
        self.mode = ParseMode::ZoneData;
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if !open.data_started {
            open.data_started = true;
            if self.tau_cursor < self.tau_formulas.len() {
                self.tau_cursor += 1;
            }
        }
        open.zone.tau_formula_index = self.tau_cursor;
    }

    fn accept_data_row(&mut self, line_number: usize, line: &str) {
        if line.is_empty() {
            return;
        }
        match line.split_whitespace().nth(2) {
            None => self.diagnostics.skip(line_number, SkipReason::TooFewFields),
            Some(field) if field.parse::<f64>().is_err() => {
                self.diagnostics.skip(line_number, SkipReason::UnparsableValue)
            }
            Some(_) => {
                if let Some(open) = self.open.as_mut() {
                    open.zone.data_rows.push(line.to_string());
                }
            }
        }
    }
}

/// Split `KEY = VALUE` on the first `=`, trimming both sides
fn split_parameter(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
}

fn parse_block_count(raw: &str) -> Result<usize, ProcessError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ProcessError::InvalidGlobalParameter {
            name: "NBLK",
            value: raw.to_string(),
        }),
    }
}

/// `BS` is written as a float by some instruments; it is truncated
fn parse_block_size(raw: &str) -> Result<usize, ProcessError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 1.0 => Ok(v.trunc() as usize),
        _ => Err(ProcessError::InvalidGlobalParameter {
            name: "BS",
            value: raw.to_string(),
        }),
    }
}

/// Parse SDF text into zones, global parameters and tau formulas
pub fn parse_sdf(text: &str) -> Result<SdfFile, ProcessError> {
    text.lines()
        .enumerate()
        .fold(ParserState::default(), |state, (i, line)| state.step(i + 1, line))
        .finish()
}
