//! Breakdown expressions: `+`-joined sub-quantities such as `16000+8000+3000`
//! whose sum is the row's total volume.

/// Sum the tokens of a breakdown expression. Each token contributes its
/// leading numeric value; empty or non-numeric tokens contribute 0.
pub fn parse_breakdown(expr: &str) -> f64 {
    expr.split('+').map(token_value).sum()
}

fn token_value(token: &str) -> f64 {
    match leading_number(token.trim()) {
        Some(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Longest prefix of `s` that reads as a decimal number (optional sign,
/// digits, fraction, exponent), so `"12.5kg"` yields 12.5.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && bytes[exp_end] == b'-' {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}
