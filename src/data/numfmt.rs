/// Number formatting shared by the zone writers
///
/// The downstream fitting service and the lab's existing files use two
/// float renderings that Rust's `Display` does not produce on its own:
/// the shortest round-trip form that always keeps a fractional part or an
/// exponent (`2.0`, `1e-05`), and the C `%g` form with a significant-digit
/// budget (`%.6g`, `%.4g`).

/// Shortest round-trip rendering with `.0` on whole values and scientific
/// notation outside `1e-4 <= |x| < 1e16`.
pub fn repr_f64(x: f64) -> String {
    if let Some(special) = non_finite(x) {
        return special.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", x);
    let (mantissa, exp) = split_exponent(&sci);
    if (-4..16).contains(&exp) {
        let plain = x.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        format!("{}e{}", mantissa, exponent_suffix(exp))
    }
}

/// `%.{precision}g` rendering.
pub fn format_g(x: f64, precision: usize) -> String {
    let p = precision.max(1);
    if let Some(special) = non_finite(x) {
        return special.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // The exponent has to be taken after rounding to `p` digits
    let sci = format!("{:.*e}", p - 1, x);
    let (mantissa, exp) = split_exponent(&sci);
    if exp < -4 || exp >= p as i32 {
        format!("{}e{}", trim_fraction(mantissa), exponent_suffix(exp))
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_string()
    }
}

/// Whole values print as integers, everything else as `repr_f64`.
pub fn whole_or_repr(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        // `+ 0.0` folds -0.0 into 0.0
        format!("{:.0}", x + 0.0)
    } else {
        repr_f64(x)
    }
}

/// `%.6f`, with `nan`/`inf`/`-inf` spelled in lower case
pub fn fixed6(x: f64) -> String {
    match non_finite(x) {
        Some(special) => special.to_string(),
        None => format!("{:.6}", x),
    }
}

fn non_finite(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        Some("nan")
    } else if x == f64::INFINITY {
        Some("inf")
    } else if x == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

fn split_exponent(sci: &str) -> (&str, i32) {
    match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn exponent_suffix(exp: i32) -> String {
    format!("{}{:02}", if exp < 0 { '-' } else { '+' }, exp.abs())
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
