/// Tau (time axis) generation from SDF formula lines
///
/// A formula such as `TAU = [log:0.05*T1MAX:5*T1MAX:32]` describes the
/// evolution times of a zone relative to its `T1MAX`. Points are generated in
/// microseconds and converted back to seconds so that very short times keep
/// their precision.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ProcessError;

/// Spacing of the generated points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TauScale {
    Log,
    Lin,
}

impl FromStr for TauScale {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(TauScale::Log),
            "lin" => Ok(TauScale::Lin),
            other => Err(ProcessError::UnknownScaleType(other.to_string())),
        }
    }
}

impl std::fmt::Display for TauScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TauScale::Log => write!(f, "log"),
            TauScale::Lin => write!(f, "lin"),
        }
    }
}

/// Parsed `TAU = [...]` formula
#[derive(Debug, Clone, PartialEq)]
pub struct TauFormula {
    pub scale: TauScale,
    /// Multiplier of T1MAX for the first point
    pub start_factor: f64,
    /// Multiplier of T1MAX for the last point
    pub stop_factor: f64,
    pub count: usize,
}

fn formula_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^TAU\s*=\s*\[(\w+):([\d.]+)\*T1MAX:([\d.]+)\*T1MAX:(\d+)\]")
            .expect("tau formula pattern is valid")
    })
}

impl TauFormula {
    /// Parse a formula line.
    ///
    /// `Ok(None)` when the line does not have the formula shape; the zone
    /// then prints `N/A` for tau. An unknown scale word is an error.
    pub fn parse(line: &str) -> Result<Option<Self>, ProcessError> {
        let Some(caps) = formula_regex().captures(line) else {
            return Ok(None);
        };
        let scale: TauScale = caps[1].parse()?;
        let (Ok(start_factor), Ok(stop_factor), Ok(count)) = (
            caps[2].parse::<f64>(),
            caps[3].parse::<f64>(),
            caps[4].parse::<usize>(),
        ) else {
            return Ok(None);
        };
        Ok(Some(Self {
            scale,
            start_factor,
            stop_factor,
            count,
        }))
    }

    /// Tau values in seconds for a zone with the given `T1MAX` (seconds)
    pub fn values(&self, t1max: f64) -> Result<Vec<f64>, ProcessError> {
        let start_us = self.start_factor * t1max * 1e6;
        let stop_us = self.stop_factor * t1max * 1e6;
        let micros = generate_tau_values(self.scale, start_us, stop_us, self.count)?;
        Ok(micros.into_iter().map(|us| us / 1e6).collect())
    }
}

/// `count` points from `start` to `stop` inclusive, in the caller's unit
pub fn generate_tau_values(
    scale: TauScale,
    start: f64,
    stop: f64,
    count: usize,
) -> Result<Vec<f64>, ProcessError> {
    match scale {
        TauScale::Lin => Ok(linspace(start, stop, count)),
        TauScale::Log => {
            if !(start > 0.0 && stop > 0.0) {
                return Err(ProcessError::InvalidTauBounds { start, stop });
            }
            Ok(linspace(start.log10(), stop.log10(), count)
                .into_iter()
                .map(|e| 10f64.powf(e))
                .collect())
        }
    }
}

fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            points[n - 1] = stop;
            points
        }
    }
}

/// Tau values for a zone, or `None` when the formula does not apply
pub fn tau_for_zone(formula: &str, t1max: f64) -> Result<Option<Vec<f64>>, ProcessError> {
    match TauFormula::parse(formula)? {
        Some(parsed) => parsed.values(t1max).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() <= 1e-9 * e.abs().max(1.0), "{} vs {}", a, e);
        }
    }

    #[test]
    fn test_parse_log_formula() {
        let f = TauFormula::parse("TAU = [log:0.05*T1MAX:5*T1MAX:32]")
            .unwrap()
            .unwrap();
        assert_eq!(f.scale, TauScale::Log);
        assert_eq!(f.start_factor, 0.05);
        assert_eq!(f.stop_factor, 5.0);
        assert_eq!(f.count, 32);
    }

    #[test]
    fn test_parse_tolerates_spacing_and_trailing_text() {
        let f = TauFormula::parse("TAU=[lin:1*T1MAX:4*T1MAX:4] ; comment").unwrap();
        assert!(f.is_some());
    }

    #[test]
    fn test_non_formula_is_not_an_error() {
        assert_eq!(TauFormula::parse("TAU = [1:2:3]").unwrap(), None);
        assert_eq!(TauFormula::parse("TAU = [log:1.2.3*T1MAX:4*T1MAX:4]").unwrap(), None);
        assert_eq!(TauFormula::parse("NBLK = 4").unwrap(), None);
    }

    #[test]
    fn test_unknown_scale_is_an_error() {
        match TauFormula::parse("TAU = [exp:1*T1MAX:2*T1MAX:3]") {
            Err(ProcessError::UnknownScaleType(s)) => assert_eq!(s, "exp"),
            other => panic!("expected unknown scale, got {:?}", other),
        }
    }

    #[test]
    fn test_log_values_in_seconds() {
        let values = tau_for_zone("TAU = [log:0.05*T1MAX:5*T1MAX:5]", 1.0)
            .unwrap()
            .unwrap();
        let r = 10f64.sqrt();
        assert_close(&values, &[0.05, 0.05 * r, 0.5, 0.5 * r, 5.0]);
    }

    #[test]
    fn test_lin_values_scale_with_t1max() {
        let values = tau_for_zone("TAU = [lin:1*T1MAX:4*T1MAX:4]", 0.5)
            .unwrap()
            .unwrap();
        assert_close(&values, &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_point_count_edges() {
        assert!(generate_tau_values(TauScale::Lin, 1.0, 2.0, 0).unwrap().is_empty());
        assert_eq!(generate_tau_values(TauScale::Lin, 3.0, 9.0, 1).unwrap(), vec![3.0]);
        let last = generate_tau_values(TauScale::Lin, 0.0, 0.3, 4).unwrap();
        assert_eq!(last[3], 0.3);
    }

    #[test]
    fn test_log_scale_rejects_zero_bound() {
        assert!(matches!(
            generate_tau_values(TauScale::Log, 0.0, 10.0, 3),
            Err(ProcessError::InvalidTauBounds { .. })
        ));
    }
}
