/// Min-max normalization of written zone text
///
/// Works on the text produced by the zone writers, not on live zones, so
/// it can be applied to output that was edited or loaded from disk. A zone
/// starts at a `# DATA` line and ends at the next blank line. Within a zone
/// the second column of every data row is rescaled to `[0, 1]`; header
/// lines and rows containing `N/A` pass through untouched.

use crate::data::numfmt;

/// Rows that take part in normalization
fn is_data_candidate(line: &str) -> bool {
    !(line.starts_with('#') || line.contains("N/A"))
}

fn second_column(line: &str) -> Option<f64> {
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Normalize the second column of one zone's lines
fn normalize_zone(lines: Vec<String>) -> Vec<String> {
    let values: Vec<f64> = lines
        .iter()
        .filter(|l| is_data_candidate(l))
        .filter_map(|l| second_column(l))
        .collect();
    if values.is_empty() {
        return lines;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max != min { max - min } else { 1.0 };

    let mut scaled = values.into_iter().map(|v| (v - min) / range);
    lines
        .into_iter()
        .map(|line| {
            if !is_data_candidate(&line) || second_column(&line).is_none() {
                return line;
            }
            let Some(norm) = scaled.next() else {
                return line;
            };
            let mut parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            parts[1] = format!("{:<15}", numfmt::fixed6(norm));
            parts.join(" ")
        })
        .collect()
}

/// Normalize every zone in `text`. Lines are joined with `\n` and the
/// result carries no trailing newline.
pub fn normalize_text(text: &str) -> String {
    let mut normalized: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut inside_zone = false;

    for line in text.lines() {
        if line.starts_with("# DATA") {
            if !current.is_empty() {
                normalized.extend(normalize_zone(std::mem::take(&mut current)));
                normalized.push(String::new());
            }
            current.push(line.to_string());
            inside_zone = true;
        } else if inside_zone && line.trim().is_empty() {
            current.push(line.to_string());
            normalized.extend(normalize_zone(std::mem::take(&mut current)));
            inside_zone = false;
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        normalized.extend(normalize_zone(current));
    }

    log::debug!("Normalized {} lines", normalized.len());
    normalized.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: &str = "\
# DATA dum = 100
#  TAG = Zone1
# T1MAX = 1.0
0.100000        2.000000        1
0.200000        4.000000        1
0.300000        6.000000        1
";

    #[test]
    fn test_zone_is_rescaled_to_unit_range() {
        let out = normalize_text(ZONE);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "# DATA dum = 100");
        assert_eq!(lines[3], "0.100000 0.000000        1");
        assert_eq!(lines[4], "0.200000 0.500000        1");
        assert_eq!(lines[5], "0.300000 1.000000        1");
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_constant_column_becomes_zeros() {
        let text = "# DATA\n#  TAG = Zone1\n0.1 7.0 1\n0.2 7.0 1\n";
        let out = normalize_text(text);
        for line in out.lines().skip(2) {
            assert_eq!(second_column(line), Some(0.0));
        }
    }

    #[test]
    fn test_rows_with_placeholder_pass_through() {
        let text = "# DATA\n#  TAG = Zone1\nN/A             2.000000        1\nN/A             5.000000        1\n";
        let out = normalize_text(text);
        assert_eq!(out, text.trim_end_matches('\n'));
    }

    #[test]
    fn test_zones_are_normalized_independently() {
        let text = "# DATA\n0.1 1.0 1\n0.2 3.0 1\n\n# DATA\n0.1 10.0 1\n0.2 30.0 1\n0.3 20.0 1\n";
        let out = normalize_text(text);
        let values: Vec<f64> = out.lines().filter_map(|l| {
            if l.starts_with('#') { None } else { second_column(l) }
        }).collect();
        assert_eq!(values, vec![0.0, 1.0, 0.0, 1.0, 0.5]);
        assert!(out.contains("1\n\n# DATA"));
    }

    #[test]
    fn test_normalizing_twice_is_stable() {
        let once = normalize_text(ZONE);
        let twice = normalize_text(&once);
        assert_eq!(once, twice);
    }
}
