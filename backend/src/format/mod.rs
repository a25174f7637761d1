//! Text rendering of amounts and totals.
//!
//! Two renderings are used in the output table:
//!
//! - [`number_text`] - shortest round-trip text, used for record amounts
//!   (`4.50` is written back as `4.5`, `60.00` as `60`)
//! - [`two_decimals`] - fixed two fractional digits, used for subtotals
//!
//! Non-finite values render as `NaN`, `Infinity` and `-Infinity` in both.

/// Magnitude from which both renderings switch to exponent notation.
const EXPONENT_UPPER: f64 = 1e21;

/// Magnitude below which [`number_text`] switches to exponent notation.
const EXPONENT_LOWER: f64 = 1e-6;

/// Shortest text that parses back to the same value.
///
/// # Example
/// ```
/// use becu_convert::format::number_text;
///
/// assert_eq!(number_text(4.5), "4.5");
/// assert_eq!(number_text(60.0), "60");
/// assert_eq!(number_text(f64::NAN), "NaN");
/// ```
pub fn number_text(value: f64) -> String {
    if let Some(text) = non_finite_text(value) {
        return text.to_string();
    }
    if value == 0.0 {
        // Covers negative zero.
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER || magnitude < EXPONENT_LOWER {
        exponent_text(value)
    } else {
        value.to_string()
    }
}

/// Text with exactly two fractional digits.
///
/// Exact ties round away from zero (`0.125` → `0.13`). A negative zero
/// renders as `0.00`.
///
/// # Example
/// ```
/// use becu_convert::format::two_decimals;
///
/// assert_eq!(two_decimals(64.5), "64.50");
/// assert_eq!(two_decimals(-1000.0), "-1000.00");
/// assert_eq!(two_decimals(f64::NAN), "NaN");
/// ```
pub fn two_decimals(value: f64) -> String {
    if let Some(text) = non_finite_text(value) {
        return text.to_string();
    }

    let negative = value < 0.0;
    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER {
        return number_text(value);
    }

    // Only odd multiples of 1/8 sit exactly halfway between two cents.
    // Their three-digit expansion is exact and ends in 5.
    let eighths = magnitude * 8.0;
    let digits = if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let mut exact = format!("{:.3}", magnitude);
        exact.pop();
        increment_last_digit(&exact)
    } else {
        format!("{:.2}", magnitude)
    };
    if negative {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// `0.12` → `0.13`, `9.99` → `10.00`.
fn increment_last_digit(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let mut carry = true;
    for c in chars.iter_mut().rev() {
        match *c {
            '.' => continue,
            '9' => *c = '0',
            digit => {
                *c = char::from(digit as u8 + 1);
                carry = false;
                break;
            }
        }
    }

    let text: String = chars.into_iter().collect();
    if carry {
        format!("1{}", text)
    } else {
        text
    }
}

fn non_finite_text(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// `1.5e21` → `1.5e+21`, `1e-7` stays as is.
fn exponent_text(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}
