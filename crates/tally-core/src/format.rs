//! # Number Formatting
//!
//! Rendering rules for numbers shown on the display and in the panels.
//!
//! The display follows ECMAScript number formatting (`Number.prototype`
//! `toString`, `toPrecision`, `toFixed`) so a browser front end and this
//! core always agree on the text:
//!
//! | Function             | Used for                                  |
//! |----------------------|-------------------------------------------|
//! | [`stringify_number`] | A computed result becoming the new entry  |
//! | [`to_precision`]     | Entries too long for the display          |
//! | [`to_fixed`]         | Two-decimal money outputs                 |
//!
//! ## Rounding
//! `to_precision` and `to_fixed` round ties away from zero on the exact
//! binary value (`0.125` → `"0.13"`), which differs from Rust's `{:.2}`
//! (ties to even).

/// Renders a computed value as entry text.
///
/// Shortest round-trip digits; exponential form for magnitudes `>= 1e21`
/// or `< 1e-6`; `-0` renders as `"0"`.
///
/// ## Example
/// ```rust
/// use tally_core::format::stringify_number;
///
/// assert_eq!(stringify_number(16.0), "16");
/// assert_eq!(stringify_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(stringify_number(1e21), "1e+21");
/// assert_eq!(stringify_number(1.5e-7), "1.5e-7");
/// ```
pub fn stringify_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        exponential(&format!("{value:e}"))
    } else {
        format!("{value}")
    }
}

/// Renders `value` with `significant` significant digits.
///
/// Exponential form when the decimal exponent is below `-6` or at least
/// `significant`; fixed form otherwise.
///
/// ## Example
/// ```rust
/// use tally_core::format::to_precision;
///
/// assert_eq!(to_precision(123456789012345.0, 8), "1.2345679e+14");
/// assert_eq!(to_precision(0.1234567890123, 8), "0.12345679");
/// ```
pub fn to_precision(value: f64, significant: usize) -> String {
    if !value.is_finite() {
        return stringify_number(value);
    }
    let significant = significant.max(1);

    // Wide enough that a tie at `significant` is never an artifact of this
    // intermediate rounding.
    let scientific = format!("{:.*e}", significant + 40, value.abs());
    let (mantissa, exp) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let mut exponent = exp.parse::<i32>().unwrap_or(0);

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut kept = all[..significant].to_vec();
    if all.get(significant).is_some_and(|d| *d >= b'5') {
        round_up_in_place(&mut kept);
        if kept.len() > significant {
            kept.truncate(significant);
            exponent += 1;
        }
    }

    let mut out = String::with_capacity(significant + 8);
    if value < 0.0 {
        out.push('-');
    }
    let digits = |range: &[u8]| range.iter().map(|&b| b as char).collect::<String>();

    if exponent < -6 || exponent >= significant as i32 {
        out.push(kept[0] as char);
        if significant > 1 {
            out.push('.');
            out.push_str(&digits(&kept[1..]));
        }
        out.push_str(&exponential(&format!("e{exponent}")));
    } else if exponent >= 0 {
        let split = exponent as usize + 1;
        out.push_str(&digits(&kept[..split]));
        if split < significant {
            out.push('.');
            out.push_str(&digits(&kept[split..]));
        }
    } else {
        out.push_str("0.");
        out.push_str(&"0".repeat((-exponent - 1) as usize));
        out.push_str(&digits(&kept[..]));
    }
    out
}

/// Renders `value` with exactly `digits` decimals, rounding ties away
/// from zero.
///
/// ## Example
/// ```rust
/// use tally_core::format::to_fixed;
///
/// assert_eq!(to_fixed(38.333333333, 2), "38.33");
/// assert_eq!(to_fixed(115.0, 2), "115.00");
/// assert_eq!(to_fixed(0.125, 2), "0.13");
/// ```
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return stringify_number(value);
    }

    // Wide enough that a tie at `digits` is never an artifact of this
    // intermediate rounding.
    let exact = format!("{:.*}", digits + 40, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();

    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        round_up_in_place(&mut kept);
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|&b| b as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|&b| b as char));
    }
    out
}

/// Rewrites Rust's `1.5e-7` / `1e21` exponent into `1.5e-7` / `1e+21`.
fn exponential(rust_form: &str) -> String {
    match rust_form.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => rust_form.to_string(),
    }
}

/// Adds one unit in the last place of an ASCII digit string.
fn round_up_in_place(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_integers_and_decimals() {
        assert_eq!(stringify_number(8.0), "8");
        assert_eq!(stringify_number(-3.0), "-3");
        assert_eq!(stringify_number(2.5), "2.5");
        assert_eq!(stringify_number(-0.0), "0");
    }

    #[test]
    fn test_stringify_exponent_thresholds() {
        assert_eq!(stringify_number(1e20), "100000000000000000000");
        assert_eq!(stringify_number(1e21), "1e+21");
        assert_eq!(stringify_number(-2.5e22), "-2.5e+22");
        assert_eq!(stringify_number(0.000001), "0.000001");
        assert_eq!(stringify_number(0.0000001), "1e-7");
    }

    #[test]
    fn test_stringify_non_finite() {
        assert_eq!(stringify_number(f64::INFINITY), "Infinity");
        assert_eq!(stringify_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(stringify_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_to_precision_fixed_range() {
        assert_eq!(to_precision(12345678.9012, 8), "12345679");
        assert_eq!(to_precision(0.000123456789, 8), "0.00012345679");
        assert_eq!(to_precision(0.0, 8), "0.0000000");
    }

    #[test]
    fn test_to_precision_exponential_range() {
        assert_eq!(to_precision(1234567890.123, 8), "1.2345679e+9");
        assert_eq!(to_precision(0.00000012345678, 8), "1.2345678e-7");
        assert_eq!(to_precision(-98765432109876.0, 8), "-9.8765432e+13");
    }

    #[test]
    fn test_to_precision_rounding_bumps_exponent() {
        // 99999999.6 rounds to 1.0000000e8, which no longer fits fixed form
        assert_eq!(to_precision(99999999.6, 8), "1.0000000e+8");
    }

    #[test]
    fn test_to_precision_exact_ties_round_up() {
        assert_eq!(to_precision(12345678.5, 8), "12345679");
        assert_eq!(to_precision(1000000050000.0, 8), "1.0000001e+12");
        assert_eq!(to_precision(99999999.5, 8), "1.0000000e+8");
        assert_eq!(to_precision(-12345678.5, 8), "-12345679");
        assert_eq!(to_precision(2.5, 1), "3");
        assert_eq!(to_precision(0.125, 2), "0.13");
        // 0.15 is 0.1499999... in binary
        assert_eq!(to_precision(0.15, 1), "0.1");
    }

    #[test]
    fn test_to_fixed_rounds_half_away_from_zero() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-1.5, 0), "-2");
        assert_eq!(to_fixed(9.995, 2), "9.99"); // 9.99499999... in binary
        assert_eq!(to_fixed(99.999, 2), "100.00");
    }

    #[test]
    fn test_to_fixed_negative_and_zero() {
        assert_eq!(to_fixed(-2.675, 2), "-2.67"); // -2.67499999... in binary
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
    }
}
