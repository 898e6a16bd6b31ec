/// FFC-IST relaxometry table reader
///
/// The FFC-IST instruments export one comma-separated row per measured
/// point:
///
/// ```text
/// 25, 10.0, 1200, 0.8312, 0.0021, 1
/// 25, 10.0, 2400, 0.7120, 0.0019, 1
/// endtau
/// Parameters
/// sampleName = "Lysozyme 5mM"
/// ```
///
/// Fields are `temperature, frequency (kHz), time (µs), value, ...`. Rows
/// are grouped by frequency and each group is written as one zone in the
/// same `# DATA` / `# TAG` layout the SDF writer uses.

use std::collections::HashMap;

use crate::data::numfmt::{format_g, whole_or_repr};
use crate::data::zone::{Diagnostics, SkipReason};

/// Result of converting one FFC-IST file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FfcIstConversion {
    pub output: String,
    pub sample_name: String,
    pub temperature: String,
    /// Number of distinct frequencies written
    pub group_count: usize,
    pub diagnostics: Diagnostics,
}

/// Sections of an FFC-IST file
struct Layout<'a> {
    data_lines: Vec<(usize, &'a str)>,
    parameters: HashMap<String, String>,
}

fn split_layout(text: &str) -> Layout<'_> {
    let lines: Vec<&str> = text.lines().collect();

    let endtau = lines
        .iter()
        .position(|l| l.trim().to_lowercase().starts_with("endtau"));
    let param_start = lines.iter().position(|l| l.trim().starts_with("Parameters"));
    let data_end = endtau.or(param_start).unwrap_or(lines.len());

    let mut parameters = HashMap::new();
    if let Some(start) = param_start {
        for line in &lines[start..] {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                parameters.insert(
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }
    }

    Layout {
        data_lines: lines[..data_end]
            .iter()
            .enumerate()
            .map(|(i, l)| (i + 1, *l))
            .collect(),
        parameters,
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// First numeric leading field in the data region
fn detect_temperature(data_lines: &[(usize, &str)]) -> Option<f64> {
    data_lines
        .iter()
        .map(|(_, l)| l.trim())
        .filter(|l| !l.is_empty() && !l.to_lowercase().starts_with("endtau"))
        .find_map(|l| split_fields(l).first()?.parse::<f64>().ok())
}

/// Frequency in Hz as `{mantissa}e{exp}` with the exponent kept in 3..=6
pub fn format_dum_hz(freq_khz: f64) -> String {
    let hz = freq_khz * 1000.0;
    if hz <= 0.0 {
        return "0e3".to_string();
    }
    let mut exp = hz.log10().floor() as i32;
    let mut mantissa = hz / 10f64.powi(exp);
    while exp > 6 {
        mantissa *= 10.0;
        exp -= 1;
    }
    while exp < 3 {
        mantissa /= 10.0;
        exp += 1;
    }
    format!("{}e{}", format_g(mantissa, 4), exp)
}

/// `MHz` label from 1000 kHz upwards, `KHz` below
pub fn format_tag_label(freq_khz: f64) -> String {
    if freq_khz >= 1000.0 {
        format!("{}MHz", format_g(freq_khz / 1000.0, 4))
    } else {
        format!("{}KHz", format_g(freq_khz, 4))
    }
}

/// Convert FFC-IST text. `source_stem` names the sample when the file has
/// no `sampleName` parameter.
pub fn convert(text: &str, source_stem: Option<&str>) -> FfcIstConversion {
    let layout = split_layout(text);
    let mut diagnostics = Diagnostics::default();

    let sample_name = layout
        .parameters
        .get("sampleName")
        .cloned()
        .or_else(|| source_stem.filter(|s| !s.is_empty()).map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string());
    let temperature = detect_temperature(&layout.data_lines)
        .map(whole_or_repr)
        .unwrap_or_else(|| "Unknown".to_string());

    // Groups in first-seen order, sorted by frequency below
    let mut groups: Vec<(f64, Vec<(usize, Vec<&str>)>)> = Vec::new();
    for &(line_number, line) in &layout.data_lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() < 6 {
            diagnostics.skip(line_number, SkipReason::TooFewFields);
            continue;
        }
        let freq = match fields[1].parse::<f64>() {
            Ok(f) if f.is_finite() => f,
            _ => {
                diagnostics.skip(line_number, SkipReason::UnparsableValue);
                continue;
            }
        };
        match groups.iter_mut().find(|(f, _)| *f == freq) {
            Some((_, rows)) => rows.push((line_number, fields)),
            None => groups.push((freq, vec![(line_number, fields)])),
        }
    }
    groups.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out_lines: Vec<String> = Vec::new();
    for (freq_khz, rows) in &groups {
        out_lines.push(format!("# DATA dum={}", format_dum_hz(*freq_khz)));
        out_lines.push(format!(
            "# TAG = {}_Temp = {}C_{}_1",
            sample_name,
            temperature,
            format_tag_label(*freq_khz)
        ));
        for (line_number, fields) in rows {
            let Ok(time_us) = fields[2].parse::<f64>() else {
                diagnostics.skip(*line_number, SkipReason::UnparsableValue);
                continue;
            };
            let value = match fields[3].parse::<f64>() {
                Ok(v) => format_g(v, 6),
                Err(_) => fields[3].to_string(),
            };
            out_lines.push(format!(
                "{:>12}  {:>12}  {:>12}",
                format_g(time_us * 1e-6, 6),
                value,
                1
            ));
        }
        out_lines.push(String::new());
    }

    let output = if out_lines.is_empty() {
        String::new()
    } else {
        out_lines.join("\n") + "\n"
    };

    log::debug!(
        "FFC-IST converted: sample '{}', {} frequencies, {} skipped lines",
        sample_name,
        groups.len(),
        diagnostics.skipped_count()
    );

    FfcIstConversion {
        output,
        sample_name,
        temperature,
        group_count: groups.len(),
        diagnostics,
    }
}
