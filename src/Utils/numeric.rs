//! Numeric helpers: decimal rounding, Unicode subscripts/superscripts for formulae and
//! exponents, and formatting of very large or very small quantities (particle counts).

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Rounds `num` to `decimals` decimal places, halves away from zero.
pub fn round_to(num: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (num * factor).round() / factor
}

/// Nearest whole number as `u32`; `None` for negative, non-finite or too large values.
pub fn round_to_count(num: f64) -> Option<u32> {
    let rounded = num.round();
    if rounded.is_finite() && (0.0..=u32::MAX as f64).contains(&rounded) {
        Some(rounded as u32)
    } else {
        None
    }
}

/// Replaces every ASCII digit of `text` with its Unicode subscript, other chars are kept
pub fn digits_to_subscripts(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => SUBSCRIPTS[d as usize],
            None => c,
        })
        .collect()
}

/// 12 -> "₁₂"
pub fn to_subscript(num: u32) -> String {
    digits_to_subscripts(&num.to_string())
}

/// -23 -> "⁻²³"
pub fn to_superscript(num: i32) -> String {
    num.to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            _ => match c.to_digit(10) {
                Some(d) => SUPERSCRIPTS[d as usize],
                None => c,
            },
        })
        .collect()
}

/// Formats a quantity for display.
/// Values with magnitude >= 1e6 or below 1e-3 are written as `m.mm × 10ⁿ` with
/// `precision - 1` digits of mantissa, everything else as a plain decimal with at most
/// `precision` fractional digits and trailing zeros trimmed.
pub fn format_scientific(num: f64, precision: usize) -> String {
    if num == 0.0 {
        return "0".to_string();
    }
    if !num.is_finite() {
        return num.to_string();
    }
    let abs_num = num.abs();
    if abs_num >= 1e6 || abs_num < 0.001 {
        let mut exp = abs_num.log10().floor() as i32;
        let mut mantissa = num / 10f64.powi(exp);
        let digits = precision.saturating_sub(1);
        // 9.999e5 style mantissas can round up to 10.0
        if round_to(mantissa.abs(), digits as u32) >= 10.0 {
            exp += 1;
            mantissa /= 10.0;
        }
        return format!("{:.*} × 10{}", digits, mantissa, to_superscript(exp));
    }
    let fixed = format!("{:.*}", precision, num);
    if fixed.contains('.') {
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        fixed
    }
}
