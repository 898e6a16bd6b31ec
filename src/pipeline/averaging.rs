/// Block averaging of SDF data rows
///
/// Each zone holds `NBLK * BS` rows. Block `i` covers rows
/// `[i*BS, (i+1)*BS)`; an optional `RowRange` keeps only an offset window
/// inside every block. The averaged quantity is the third field of a row.

use crate::data::zone::GlobalParameters;
use crate::error::ProcessError;

/// Inclusive row window applied inside every block, as offsets from the block start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    /// Parse `start:end`. An empty string means no window.
    pub fn parse(s: &str) -> Result<Option<Self>, ProcessError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        let invalid = || ProcessError::InvalidRowRange(s.to_string());

        let (start, end) = s.split_once(':').ok_or_else(invalid)?;
        let start: i64 = start.trim().parse().map_err(|_| invalid())?;
        let end: i64 = end.trim().parse().map_err(|_| invalid())?;
        if start < 0 || end < start {
            return Err(invalid());
        }
        Ok(Some(Self {
            start: start as usize,
            end: end as usize,
        }))
    }
}

impl std::fmt::Display for RowRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Third whitespace-separated field of a row
pub fn row_value(row: &str) -> Option<f64> {
    row.split_whitespace().nth(2)?.parse().ok()
}

/// Row indices that feed block `block`
fn block_span(block: usize, bs: usize, len: usize, range: Option<RowRange>) -> (usize, usize) {
    let start = block.saturating_mul(bs);
    let end = block.saturating_add(1).saturating_mul(bs).min(len);
    match range {
        None => (start, end),
        Some(r) => (
            start.saturating_add(r.start),
            start.saturating_add(r.end).saturating_add(1).min(end),
        ),
    }
}

/// One mean per block; empty blocks average to 0.0
pub fn block_means(rows: &[String], globals: GlobalParameters, range: Option<RowRange>) -> Vec<f64> {
    (0..globals.nblk)
        .map(|block| {
            let (lo, hi) = block_span(block, globals.bs, rows.len(), range);
            if lo >= hi {
                return 0.0;
            }
            let values: Vec<f64> = rows[lo..hi].iter().filter_map(|r| row_value(r)).collect();
            mean(&values)
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[f64]) -> Vec<String> {
        values.iter().map(|v| format!("0.1 0.2 {}", v)).collect()
    }

    #[test]
    fn test_parse_row_range() {
        assert_eq!(RowRange::parse("").unwrap(), None);
        assert_eq!(RowRange::parse("   ").unwrap(), None);
        assert_eq!(
            RowRange::parse("0:349").unwrap(),
            Some(RowRange { start: 0, end: 349 })
        );
        assert_eq!(
            RowRange::parse(" 2 : 2 ").unwrap(),
            Some(RowRange { start: 2, end: 2 })
        );
    }

    #[test]
    fn test_parse_row_range_rejects_bad_input() {
        for bad in ["abc", "1", "3:1", "-1:2", "1:2:3", "a:b"] {
            assert!(
                matches!(RowRange::parse(bad), Err(ProcessError::InvalidRowRange(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_full_block_means() {
        let data = rows(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let means = block_means(&data, GlobalParameters { nblk: 2, bs: 3 }, None);
        assert_eq!(means, vec![2.0, 5.0]);
    }

    #[test]
    fn test_block_count_is_independent_of_data_size() {
        let data = rows(&[1.0, 2.0, 3.0, 4.0]);
        let means = block_means(&data, GlobalParameters { nblk: 4, bs: 3 }, None);
        assert_eq!(means, vec![2.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_window_selects_middle_row() {
        let data = rows(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let range = RowRange::parse("1:1").unwrap();
        let means = block_means(&data, GlobalParameters { nblk: 2, bs: 3 }, range);
        assert_eq!(means, vec![2.0, 5.0]);

        let data = rows(&[1.0, 10.0, 100.0, 2.0, 20.0, 200.0]);
        let means = block_means(&data, GlobalParameters { nblk: 2, bs: 3 }, range);
        assert_eq!(means, vec![10.0, 20.0]);
    }

    #[test]
    fn test_window_is_capped_by_block_end() {
        let data = rows(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let range = Some(RowRange { start: 1, end: 10 });
        let means = block_means(&data, GlobalParameters { nblk: 2, bs: 3 }, range);
        assert_eq!(means, vec![2.5, 5.5]);

        let range = Some(RowRange { start: 5, end: 6 });
        let means = block_means(&data, GlobalParameters { nblk: 2, bs: 3 }, range);
        assert_eq!(means, vec![0.0, 0.0]);
    }

    #[test]
    fn test_unparsable_rows_are_skipped() {
        let data = vec!["0 0 2.0".to_string(), "0 0".to_string(), "0 0 4.0".to_string()];
        let means = block_means(&data, GlobalParameters { nblk: 1, bs: 3 }, None);
        assert_eq!(means, vec![3.0]);
    }
}
