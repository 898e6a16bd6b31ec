/// Read zone text back into plottable series
///
/// Accepts anything the zone writers (or the normalizer) produce, including
/// files saved by earlier sessions.

use crate::data::zone::ZoneSeries;

#[derive(Default)]
struct SeriesBuilder {
    tag: String,
    tau: Vec<f64>,
    values: Vec<f64>,
    missing_tau: bool,
}

impl SeriesBuilder {
    fn push_row(&mut self, line: &str) {
        let mut fields = line.split_whitespace();
        let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
            return;
        };
        let Ok(value) = y.parse::<f64>() else {
            return;
        };
        match x.parse::<f64>() {
            Ok(t) => self.tau.push(t),
            Err(_) => self.missing_tau = true,
        }
        self.values.push(value);
    }

    fn build(self, index: usize) -> ZoneSeries {
        let tag = if self.tag.is_empty() {
            format!("Zone{}", index + 1)
        } else {
            self.tag
        };
        ZoneSeries {
            tag,
            tau: if self.missing_tau { None } else { Some(self.tau) },
            values: self.values,
        }
    }
}

/// Split zone text into one series per `# DATA` block
pub fn read_series(text: &str) -> Vec<ZoneSeries> {
    let mut series = Vec::new();
    let mut current: Option<SeriesBuilder> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("# DATA") {
            if let Some(done) = current.take() {
                series.push(done.build(series.len()));
            }
            current = Some(SeriesBuilder::default());
            continue;
        }
        let Some(builder) = current.as_mut() else {
            continue;
        };
        if trimmed.starts_with('#') {
            if let Some((_, tag)) = trimmed.split_once("TAG =") {
                builder.tag = tag.trim().to_string();
            }
        } else if !trimmed.is_empty() {
            builder.push_row(trimmed);
        }
    }
    if let Some(done) = current {
        series.push(done.build(series.len()));
    }
    series
}
