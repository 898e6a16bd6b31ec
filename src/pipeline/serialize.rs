/// Zone text writer
///
/// Renders averaged zones in the tabular layout the fitting service reads:
///
/// ```text
/// # DATA dum = 12500
/// #  TAG = Zone1
/// # T1MAX = 2.0
/// # TAU = [log:0.05*T1MAX:5*T1MAX:32]
/// 0.100000        2.000000        1
/// ```
///
/// Zones are separated by a single blank line.

use crate::data::numfmt;

/// One zone after block averaging, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct BlockedZone {
    /// Raw `dum` offset (from `BR`), if the zone had one
    pub dum: Option<String>,
    /// Reference time in seconds
    pub t1max: f64,
    /// Formula line echoed into the header
    pub tau_formula: Option<String>,
    /// Tau in seconds; may be shorter than `block_means` or empty
    pub tau_values: Vec<f64>,
    pub block_means: Vec<f64>,
}

/// Header line for a zone. `dum` is printed in micro-units, rounded half to even.
pub fn data_header(dum: Option<&str>) -> String {
    let Some(raw) = dum else {
        return "# DATA".to_string();
    };
    match raw.parse::<f64>() {
        Ok(v) if (v * 1e6).is_finite() => {
            format!("# DATA dum = {:.0} ", (v * 1e6).round_ties_even() + 0.0)
        }
        _ => format!("# DATA dum = {} ", raw),
    }
}

fn block_row(tau: Option<f64>, mean: f64) -> String {
    let tau_field = match tau {
        Some(t) => format!("{:<15}", numfmt::fixed6(t)),
        None => format!("{:<15}", "N/A"),
    };
    format!("{} {:<15} 1", tau_field, numfmt::fixed6(mean))
}

fn write_zone(out: &mut String, index: usize, zone: &BlockedZone) {
    out.push_str(&data_header(zone.dum.as_deref()));
    out.push('\n');
    out.push_str(&format!("#  TAG = Zone{}\n", index + 1));
    out.push_str(&format!("# T1MAX = {}\n", numfmt::repr_f64(zone.t1max)));
    if let Some(formula) = &zone.tau_formula {
        out.push_str(&format!("# {}\n", formula));
    }
    for (i, &mean) in zone.block_means.iter().enumerate() {
        out.push_str(&block_row(zone.tau_values.get(i).copied(), mean));
        out.push('\n');
    }
}

/// Render all zones in order
pub fn render_zones(zones: &[BlockedZone]) -> String {
    let mut out = String::new();
    for (index, zone) in zones.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_zone(&mut out, index, zone);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(dum: Option<&str>, tau: Vec<f64>, means: Vec<f64>) -> BlockedZone {
        BlockedZone {
            dum: dum.map(str::to_string),
            t1max: 2.0,
            tau_formula: None,
            tau_values: tau,
            block_means: means,
        }
    }

    #[test]
    fn test_header_variants() {
        assert_eq!(data_header(None), "# DATA");
        assert_eq!(data_header(Some("0.0125")), "# DATA dum = 12500 ");
        assert_eq!(data_header(Some("fast")), "# DATA dum = fast ");
        assert_eq!(data_header(Some("-0.0000001")), "# DATA dum = 0 ");
    }

    #[test]
    fn test_header_rounds_half_to_even() {
        assert_eq!(data_header(Some("0.0000025")), "# DATA dum = 2 ");
        assert_eq!(data_header(Some("0.0000035")), "# DATA dum = 4 ");
    }

    #[test]
    fn test_rows_without_tau() {
        let text = render_zones(&[zone(None, vec![], vec![2.0, 5.0])]);
        assert_eq!(
            text,
            "# DATA\n\
             #  TAG = Zone1\n\
             # T1MAX = 2.0\n\
             N/A             2.000000        1\n\
             N/A             5.000000        1\n"
        );
    }

    #[test]
    fn test_short_tau_falls_back_per_row() {
        let text = render_zones(&[zone(None, vec![0.5], vec![1.0, 2.0])]);
        let rows: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(rows[0], "0.500000        1.000000        1");
        assert_eq!(rows[1], "N/A             2.000000        1");
    }

    #[test]
    fn test_blank_line_between_zones_only() {
        let mut second = zone(Some("1"), vec![], vec![0.0]);
        second.tau_formula = Some("TAU = [lin:1*T1MAX:2*T1MAX:1]".to_string());
        let text = render_zones(&[zone(None, vec![], vec![1.0]), second]);
        assert!(text.contains("1\n\n# DATA dum = 1000000 \n#  TAG = Zone2\n"));
        assert!(text.contains("# TAU = [lin:1*T1MAX:2*T1MAX:1]\n"));
        assert!(text.ends_with("0.000000        1\n"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn test_nan_mean_prints_lowercase() {
        let text = render_zones(&[zone(None, vec![f64::INFINITY], vec![f64::NAN])]);
        assert_eq!(text.lines().nth(3), Some("inf             nan             1"));
    }
}
