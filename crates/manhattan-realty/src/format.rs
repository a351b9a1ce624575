//! Text rendering for prices and areas.

use std::fmt;

const PLAIN_MIN: f64 = 1e-3;
const PLAIN_MAX: f64 = 1e7;

/// Displays an `f64` the way listings and transcripts print numbers: plain
/// decimal with at least one fractional digit inside `[0.001, 10000000)`,
/// and `<mantissa>E<exponent>` outside it (`1.2E7`, `1.0E-4`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decimal(pub f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let magnitude = value.abs();
        if magnitude == 0.0 || (PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
            return write!(f, "{value:?}");
        }

        let scientific = format!("{value:e}");
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        if mantissa.contains('.') {
            write!(f, "{mantissa}E{exponent}")
        } else {
            write!(f, "{mantissa}.0E{exponent}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: f64) -> String {
        Decimal(value).to_string()
    }

    #[test]
    fn plain_range_keeps_one_fractional_digit() {
        assert_eq!(render(80.0), "80.0");
        assert_eq!(render(10_000.0), "10000.0");
        assert_eq!(render(809_000.0), "809000.0");
        assert_eq!(render(9_999_999.0), "9999999.0");
        assert_eq!(render(55.5), "55.5");
        assert_eq!(render(0.001), "0.001");
    }

    #[test]
    fn large_and_small_values_use_exponent_form() {
        assert_eq!(render(12_000_000.0), "1.2E7");
        assert_eq!(render(10_000_000.0), "1.0E7");
        assert_eq!(render(1_234_567_890.0), "1.23456789E9");
        assert_eq!(render(-12_000_000.0), "-1.2E7");
        assert_eq!(render(0.0001), "1.0E-4");
        assert_eq!(render(0.00025), "2.5E-4");
    }

    #[test]
    fn zero_and_non_finite_values() {
        assert_eq!(render(0.0), "0.0");
        assert_eq!(render(-0.0), "-0.0");
        assert_eq!(render(f64::NAN), "NaN");
        assert_eq!(render(f64::INFINITY), "Infinity");
        assert_eq!(render(f64::NEG_INFINITY), "-Infinity");
    }
}
