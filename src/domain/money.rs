use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// A rate of 60.00 per day is stored as 6000 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount.
/// Example: 18000 -> "180.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Example: "60.00" -> 6000, "6.5" -> 650, "150" -> 15000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let negative = input.starts_with('-');
    let input = input.trim_start_matches('-');

    let parts: Vec<&str> = input.split('.').collect();
    let cents = match parts.as_slice() {
        [units] => parse_units(units)?
            .checked_mul(100)
            .ok_or(ParseCentsError::InvalidFormat)?,
        [units, decimals] => {
            let units = if units.is_empty() {
                0
            } else {
                parse_units(units)?
            };
            if units == 0 && decimals.is_empty() && parts[0].is_empty() {
                return Err(ParseCentsError::InvalidFormat);
            }

            // Pad or truncate the fractional part to two digits
            let decimal_cents: i64 = match decimals.len() {
                0 => 0,
                1 => parse_units(decimals)? * 10,
                2 => parse_units(decimals)?,
                _ => parse_units(&decimals[..2])?,
            };

            units
                .checked_mul(100)
                .and_then(|c| c.checked_add(decimal_cents))
                .ok_or(ParseCentsError::InvalidFormat)?
        }
        _ => return Err(ParseCentsError::InvalidFormat),
    };

    Ok(if negative { -cents } else { cents })
}

fn parse_units(digits: &str) -> Result<i64, ParseCentsError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    digits.parse().map_err(|_| ParseCentsError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(18000), "180.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(100), "1.00");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("60.00"), Ok(6000));
        assert_eq!(parse_cents("60"), Ok(6000));
        assert_eq!(parse_cents("12.34"), Ok(1234));
        assert_eq!(parse_cents("6.5"), Ok(650));
        assert_eq!(parse_cents("0.01"), Ok(1));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents("100.999"), Ok(10099)); // Truncates
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("12.34.56").is_err());
        assert!(parse_cents("").is_err());
        assert!(parse_cents(".").is_err());
        assert!(parse_cents("1.x").is_err());
    }
}
