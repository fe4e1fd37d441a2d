//! Miscellaneous helper utilities.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Lossy conversion of a raw amount for ratio math.
pub fn raw_to_f64(raw: &BigUint) -> f64 {
    raw.to_f64().unwrap_or(f64::INFINITY)
}

/// Scale a raw amount into whole-token units without losing precision.
pub fn raw_to_units(raw: &BigUint, decimals: u8) -> BigDecimal {
    BigDecimal::new(BigInt::from(raw.clone()), i64::from(decimals))
}

/// Format a number with a K/M/B/T suffix and one decimal, e.g. 1500 -> 1.5K.
pub fn number_to_readable(num: f64) -> String {
    if num < 1_000.0 {
        // trim float noise such as 12.000000001
        let rounded = (num * 1e6).round() / 1e6;
        rounded.to_string()
    } else if num < 1_000_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else if num < 1_000_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num < 1_000_000_000_000.0 {
        format!("{:.1}B", num / 1_000_000_000.0)
    } else {
        format!("{:.1}T", num / 1_000_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn readable_thresholds() {
        assert_eq!(number_to_readable(999.0), "999");
        assert_eq!(number_to_readable(12.5), "12.5");
        assert_eq!(number_to_readable(1_000.0), "1.0K");
        assert_eq!(number_to_readable(1_550_000.0), "1.6M");
        assert_eq!(number_to_readable(2_000_000_000.0), "2.0B");
        assert_eq!(number_to_readable(3_260_000_000_000.0), "3.3T");
    }

    #[test]
    fn units_keep_full_precision() {
        let raw = BigUint::from_str("123456789012345678901").unwrap();
        let units = raw_to_units(&raw, 18);
        assert_eq!(units, BigDecimal::from_str("123.456789012345678901").unwrap());
    }

    #[test]
    fn huge_raw_amounts_convert_to_finite_f64() {
        let raw = BigUint::from(10u32).pow(60);
        let value = raw_to_f64(&raw);
        assert!(value.is_finite());
        assert!((value / 1e60 - 1.0).abs() < 1e-12);
    }
}
