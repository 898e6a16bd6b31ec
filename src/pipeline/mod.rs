pub mod averaging;
pub mod normalize;
pub mod processing;
pub mod serialize;
pub mod series;
pub mod tau;

#[cfg(test)]
mod tests {
    use super::processing::{process, InputDialect, ProcessOptions};
    use crate::error::ProcessError;

    const SIMPLE_SDF: &str = "\
PARAMETER SUMMARY
NBLK = 2
BS = 3
ZONE 1
T1MAX = 2000000
DATA
t v 1.0
t v 2.0
t v 3.0
t v 4.0
t v 5.0
t v 6.0
";

    const TWO_ZONE_SDF: &str = "\
PARAMETER SUMMARY
NBLK = 4
BS = 2
TAU = [log:0.05*T1MAX:5*T1MAX:4]
ZONE 1
BR = 0.0125
T1MAX = 1000000
DATA
0.0 0.0 10.0
0.0 0.0 12.0
0.0 0.0 20.0
0.0 0.0 22.0
0.0 0.0 30.0
0.0 0.0 32.0
0.0 0.0 40.0
0.0 0.0 42.0
ZONE 2
BR = 0.0250
T1MAX = 500000
DATA
0.0 0.0 5.0
0.0 0.0 5.0
0.0 0.0 5.0
0.0 0.0 5.0
";

    fn sdf_options() -> ProcessOptions {
        ProcessOptions::default()
    }

    #[test]
    fn test_end_to_end_without_tau() {
        let report = process(SIMPLE_SDF, &sdf_options()).unwrap();
        assert_eq!(
            report.output,
            "# DATA\n\
             #  TAG = Zone1\n\
             # T1MAX = 2.0\n\
             N/A             2.000000        1\n\
             N/A             5.000000        1\n"
        );
        assert_eq!(report.zone_count, 1);
        assert!(report.warnings.is_empty());
        assert_eq!(report.series[0].values, vec![2.0, 5.0]);
        assert_eq!(report.series[0].tau, None);
    }

    #[test]
    fn test_every_zone_has_nblk_rows() {
        let report = process(TWO_ZONE_SDF, &sdf_options()).unwrap();
        assert_eq!(report.zone_count, 2);
        for series in &report.series {
            assert_eq!(series.values.len(), 4);
        }
        // Zone 2 only filled two blocks
        assert_eq!(report.series[1].values, vec![5.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zone_headers_and_tau_rows() {
        let report = process(TWO_ZONE_SDF, &sdf_options()).unwrap();
        let lines: Vec<&str> = report.output.lines().collect();
        assert_eq!(lines[0], "# DATA dum = 12500 ");
        assert_eq!(lines[1], "#  TAG = Zone1");
        assert_eq!(lines[2], "# T1MAX = 1.0");
        assert_eq!(lines[3], "# TAU = [log:0.05*T1MAX:5*T1MAX:4]");
        assert!(lines[4].starts_with("0.050000        11.000000       1"));
        assert!(lines[7].starts_with("5.000000        41.000000       1"));
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "# DATA dum = 25000 ");
        assert_eq!(lines[10], "#  TAG = Zone2");
        assert_eq!(lines[11], "# T1MAX = 0.5");
        // Zone 2 reuses the only formula, scaled by its own T1MAX
        assert!(lines[13].starts_with("0.025000 "));
        assert!(lines[16].starts_with("2.500000 "));
    }

    #[test]
    fn test_row_range_restricts_each_block() {
        let options = ProcessOptions {
            row_range: "1:1".to_string(),
            ..sdf_options()
        };
        let report = process(TWO_ZONE_SDF, &options).unwrap();
        assert_eq!(report.series[0].values, vec![12.0, 22.0, 32.0, 42.0]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_malformed_row_range_warns_and_uses_full_blocks() {
        let options = ProcessOptions {
            row_range: "abc".to_string(),
            ..sdf_options()
        };
        let report = process(SIMPLE_SDF, &options).unwrap();
        assert_eq!(report.series[0].values, vec![2.0, 5.0]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("abc"));
    }

    #[test]
    fn test_missing_globals_fail_the_whole_file() {
        let text = SIMPLE_SDF.replace("BS = 3\n", "");
        match process(&text, &sdf_options()) {
            Err(ProcessError::MissingGlobalParameter("BS")) => {}
            other => panic!("expected missing BS, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_scale_only_affects_tau() {
        let text = TWO_ZONE_SDF.replace("[log:", "[exp:");
        let report = process(&text, &sdf_options()).unwrap();
        assert_eq!(report.zone_count, 2);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.output.contains("N/A             11.000000       1"));
        assert!(report.output.contains("# TAU = [exp:0.05*T1MAX:5*T1MAX:4]"));
    }

    #[test]
    fn test_empty_zone_never_appears() {
        let text = format!("{}ZONE 3\nT1MAX = 10\nDATA\n", TWO_ZONE_SDF);
        let report = process(&text, &sdf_options()).unwrap();
        assert_eq!(report.zone_count, 2);
        assert!(!report.output.contains("Zone3"));
    }

    #[test]
    fn test_normalize_after_processing() {
        let options = ProcessOptions {
            normalize: true,
            ..sdf_options()
        };
        let report = process(TWO_ZONE_SDF, &options).unwrap();
        assert_eq!(report.series[0].values, vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0].iter()
            .map(|v| format!("{:.6}", v).parse::<f64>().unwrap())
            .collect::<Vec<_>>());
        // Empty blocks average to zero and count toward the range
        assert_eq!(report.series[1].values, vec![1.0, 1.0, 0.0, 0.0]);
        for series in &report.series {
            assert!(series.values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_ffc_ist_dialect() {
        let options = ProcessOptions {
            dialect: InputDialect::FfcIst,
            source_stem: Some("sample".to_string()),
            ..Default::default()
        };
        let report = process("20, 10, 1000, 0.5, 0, 0\n20, 10, 2000, 0.25, 0, 0\n", &options).unwrap();
        assert_eq!(report.zone_count, 1);
        assert_eq!(report.series[0].tag, "sample_Temp = 20C_10KHz_1");
        assert_eq!(report.series[0].tau, Some(vec![0.001, 0.002]));
        assert_eq!(report.series[0].values, vec![0.5, 0.25]);
    }

    #[test]
    fn test_ffc_ist_without_rows_warns() {
        let options = ProcessOptions {
            dialect: InputDialect::FfcIst,
            ..Default::default()
        };
        let report = process("nothing here\n", &options).unwrap();
        assert!(report.output.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_bad_t1max_and_log_bounds_fall_back() {
        let text = "\
PARAMETER SUMMARY
NBLK = 1
BS = 1
TAU = [log:0*T1MAX:5*T1MAX:2]
ZONE 1
T1MAX = fast
DATA
0 0 1.0
";
        let report = process(text, &sdf_options()).unwrap();
        let lines: Vec<&str> = report.output.lines().collect();
        assert_eq!(lines[2], "# T1MAX = 1.0");
        assert_eq!(lines[3], "# TAU = [log:0*T1MAX:5*T1MAX:2]");
        assert_eq!(lines[4], "N/A             1.000000        1");
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("T1MAX 'fast' is not a number, using 1.0"));
        assert!(report.warnings[1].contains("positive bounds"));
    }

    #[test]
    fn test_nan_value_prints_lowercase() {
        let text = "PARAMETER SUMMARY\nNBLK = 1\nBS = 1\nZONE 1\nDATA\n0 0 nan\n";
        let report = process(text, &sdf_options()).unwrap();
        assert!(report.output.ends_with("N/A             nan             1\n"));
    }
}
