use std::fmt;

use serde::de::{self, Deserializer, Visitor};

use crate::error::SizeError;

const KB: f64 = 1024.0;

/// Parse a size such as `"1MB"`, `"512kb"`, `"1.5MB"` or `"100"` into bytes.
///
/// Units are binary multiples (`1KB == 1024`) and matched case-insensitively.
/// A bare number is a byte count. Fractional results are truncated.
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let input = input.trim().to_ascii_uppercase();
    if input.is_empty() {
        return Err(SizeError::EmptySizeString);
    }

    if let Ok(bytes) = input.parse::<u64>() {
        return Ok(bytes);
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    if number.is_empty() {
        return Err(SizeError::NoNumericValue(input));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| SizeError::InvalidNumericValue(number.to_string()))?;

    let multiplier = match unit {
        "" | "B" => 1.0,
        "KB" => KB,
        "MB" => KB * KB,
        "GB" => KB * KB * KB,
        "TB" => KB * KB * KB * KB,
        _ => return Err(SizeError::UnknownUnit(unit.to_string())),
    };

    // `as` saturates and truncates toward zero
    Ok((value * multiplier) as u64)
}

/// Serde helper: accepts either a byte count or a size string.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct SizeVisitor;

    impl Visitor<'_> for SizeVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a byte count or a size string such as \"512KB\"")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative size: {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            parse_size(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(SizeVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("1MB"), Ok(1_048_576));
        assert_eq!(parse_size("512KB"), Ok(524_288));
        assert_eq!(parse_size("2GB"), Ok(2_147_483_648));
        assert_eq!(parse_size("1TB"), Ok(1_099_511_627_776));
        assert_eq!(parse_size("64B"), Ok(64));
        assert_eq!(parse_size("100"), Ok(100));
    }

    #[test]
    fn test_parse_size_case_and_fractions() {
        assert_eq!(parse_size("512kb"), Ok(524_288));
        assert_eq!(parse_size("1.5MB"), Ok(1_572_864));
        assert_eq!(parse_size(" 2mb "), Ok(2_097_152));
        // truncated, not rounded
        assert_eq!(parse_size("1.9"), Ok(1));
        assert_eq!(parse_size("0.0009KB"), Ok(0));
    }

    #[test]
    fn test_parse_size_errors() {
        assert_eq!(parse_size(""), Err(SizeError::EmptySizeString));
        assert_eq!(parse_size("   "), Err(SizeError::EmptySizeString));
        assert_eq!(
            parse_size("abc"),
            Err(SizeError::NoNumericValue("ABC".to_string()))
        );
        assert_eq!(
            parse_size("-5"),
            Err(SizeError::NoNumericValue("-5".to_string()))
        );
        assert_eq!(
            parse_size("10XB"),
            Err(SizeError::UnknownUnit("XB".to_string()))
        );
        assert_eq!(
            parse_size("1.2.3MB"),
            Err(SizeError::InvalidNumericValue("1.2.3".to_string()))
        );
        assert_eq!(
            parse_size("1 MB"),
            Err(SizeError::UnknownUnit(" MB".to_string()))
        );
    }
}
