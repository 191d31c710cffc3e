//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Package emoji for per-app build announcements
pub const PACKAGE: Emoji = Emoji("📦", "*");

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Trend emoji for the summary table
pub const TREND: Emoji = Emoji("📈", "~");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Convert a byte count to kilobytes (1 KB = 1000 bytes) rounded to two decimals.
///
/// Rounding follows the exact binary value of `bytes / 1000`, the same way a
/// fixed-point `toFixed(2)` rendering does, so reports stay comparable with
/// ones produced by other tooling.
///
/// # Examples
///
/// ```
/// use bundle_compare::fmt::bytes_to_kb;
///
/// assert_eq!(bytes_to_kb(0), 0.0);
/// assert_eq!(bytes_to_kb(500), 0.5);
/// assert_eq!(bytes_to_kb(12_345), 12.35);
/// assert_eq!(bytes_to_kb(1_005), 1.0);
/// ```
pub fn bytes_to_kb(bytes: u64) -> f64 {
    kb_hundredths(bytes) as f64 / 100.0
}

/// Hundredths of a kilobyte for `bytes`, rounded like `(bytes / 1000).toFixed(2)`.
fn kb_hundredths(bytes: u64) -> u64 {
    let floor = bytes / 10;
    match bytes % 10 {
        0..=4 => floor,
        6..=9 => floor + 1,
        _ => {
            // Exact value sits on a tie; the nearest double decides the direction.
            let value = bytes as f64 / 1000.0;
            if at_least_half_step(value, 2 * floor + 1) {
                floor + 1
            } else {
                floor
            }
        }
    }
}

/// Whether `value >= numerator / 200`, evaluated exactly on the binary value.
fn at_least_half_step(value: f64, numerator: u64) -> bool {
    let bits = value.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exp) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };

    let lhs = mantissa as u128 * 200;
    let rhs = numerator as u128;
    if exp >= 0 {
        match lhs.checked_shl(exp as u32) {
            Some(scaled) => scaled >= rhs,
            None => true,
        }
    } else {
        match rhs.checked_shl((-exp) as u32) {
            Some(scaled) => lhs >= scaled,
            None => false,
        }
    }
}

/// Render a number with en-US thousands separators (`1234.5` → `"1,234.5"`).
///
/// # Examples
///
/// ```
/// use bundle_compare::fmt::group_thousands;
///
/// assert_eq!(group_thousands(45.2), "45.2");
/// assert_eq!(group_thousands(1234.56), "1,234.56");
/// assert_eq!(group_thousands(1_000_000.0), "1,000,000");
/// ```
pub fn group_thousands(value: f64) -> String {
    let rendered = value.to_string();
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_kb_divides_by_thousand() {
        assert_eq!(bytes_to_kb(1_000), 1.0);
        assert_eq!(bytes_to_kb(1_024), 1.02);
        assert_eq!(bytes_to_kb(800), 0.8);
        assert_eq!(bytes_to_kb(300), 0.3);
        assert_eq!(bytes_to_kb(45_678_901), 45_678.9);
    }

    #[test]
    fn test_bytes_to_kb_rounds_to_two_decimals() {
        assert_eq!(bytes_to_kb(1_234), 1.23);
        assert_eq!(bytes_to_kb(1_236), 1.24);
        assert_eq!(bytes_to_kb(99_999), 100.0);
    }

    #[test]
    fn test_bytes_to_kb_exact_ties_round_up() {
        // 0.125 and 0.375 are exactly representable
        assert_eq!(bytes_to_kb(125), 0.13);
        assert_eq!(bytes_to_kb(375), 0.38);
    }

    #[test]
    fn test_bytes_to_kb_inexact_ties_follow_binary_value() {
        // 1.005 and 1.015 are stored slightly below the tie
        assert_eq!(bytes_to_kb(1_005), 1.0);
        assert_eq!(bytes_to_kb(1_015), 1.01);
        // 12.345 is stored slightly above the tie
        assert_eq!(bytes_to_kb(12_345), 12.35);
    }

    #[test]
    fn test_group_thousands_various_magnitudes() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.99), "999.99");
        assert_eq!(group_thousands(1_000.0), "1,000");
        assert_eq!(group_thousands(12_345.6), "12,345.6");
        assert_eq!(group_thousands(-1_234.0), "-1,234");
    }
}
