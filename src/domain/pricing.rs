use serde::{Deserialize, Serialize};

/// Unit a vehicle's rate is charged per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBasis {
    Day,
    Kilometre,
}

impl RateBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateBasis::Day => "day",
            RateBasis::Kilometre => "kilometre",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" | "daily" => Some(RateBasis::Day),
            "kilometre" | "kilometer" | "km" | "distance" => Some(RateBasis::Kilometre),
            _ => None,
        }
    }

    /// Short unit suffix for rates, e.g. "60.00/day".
    pub fn unit(&self) -> &'static str {
        match self {
            RateBasis::Day => "day",
            RateBasis::Kilometre => "km",
        }
    }
}

impl std::fmt::Display for RateBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much a rental is used: whole days, or distance in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "basis", content = "amount")]
pub enum Usage {
    Days(u32),
    Distance(f64),
}

impl Usage {
    pub fn basis(&self) -> RateBasis {
        match self {
            Usage::Days(_) => RateBasis::Day,
            Usage::Distance(_) => RateBasis::Kilometre,
        }
    }

    /// Parse user input as a usage quantity of the given basis.
    /// "3" -> Days(3) for a daily rate, "12.5" -> Distance(12.5) for a metered one.
    pub fn parse(basis: RateBasis, input: &str) -> Result<Self, PricingError> {
        let input = input.trim();
        match basis {
            RateBasis::Day => input
                .parse::<u32>()
                .map(Usage::Days)
                .map_err(|_| PricingError::InvalidQuantity(input.to_string())),
            RateBasis::Kilometre => {
                let km: f64 = input
                    .parse()
                    .map_err(|_| PricingError::InvalidQuantity(input.to_string()))?;
                if !km.is_finite() || km < 0.0 {
                    return Err(PricingError::InvalidDistance(km));
                }
                Ok(Usage::Distance(km))
            }
        }
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Usage::Days(1) => write!(f, "1 day"),
            Usage::Days(days) => write!(f, "{} days", days),
            Usage::Distance(km) => write!(f, "{} km", km),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    UsageMismatch {
        expected: RateBasis,
        actual: RateBasis,
    },
    InvalidDistance(f64),
    InvalidQuantity(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::UsageMismatch { expected, actual } => write!(
                f,
                "Vehicle is priced per {} but usage was given per {}",
                expected.unit(),
                actual.unit()
            ),
            PricingError::InvalidDistance(km) => {
                write!(f, "Distance must be a non-negative number, got {}", km)
            }
            PricingError::InvalidQuantity(input) => {
                write!(f, "Invalid usage quantity '{}'", input)
            }
        }
    }
}

impl std::error::Error for PricingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_basis_aliases() {
        assert_eq!(RateBasis::from_str("Day"), Some(RateBasis::Day));
        assert_eq!(RateBasis::from_str("km"), Some(RateBasis::Kilometre));
        assert_eq!(RateBasis::from_str("kilometer"), Some(RateBasis::Kilometre));
        assert_eq!(RateBasis::from_str("hour"), None);
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(Usage::parse(RateBasis::Day, " 3 "), Ok(Usage::Days(3)));
        assert!(matches!(
            Usage::parse(RateBasis::Day, "2.5"),
            Err(PricingError::InvalidQuantity(_))
        ));
        assert!(matches!(
            Usage::parse(RateBasis::Day, "-1"),
            Err(PricingError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(
            Usage::parse(RateBasis::Kilometre, "12.5"),
            Ok(Usage::Distance(12.5))
        );
        assert!(matches!(
            Usage::parse(RateBasis::Kilometre, "-4"),
            Err(PricingError::InvalidDistance(_))
        ));
        assert!(matches!(
            Usage::parse(RateBasis::Kilometre, "inf"),
            Err(PricingError::InvalidDistance(_))
        ));
    }

    #[test]
    fn test_usage_display() {
        assert_eq!(Usage::Days(1).to_string(), "1 day");
        assert_eq!(Usage::Days(3).to_string(), "3 days");
        assert_eq!(Usage::Distance(12.5).to_string(), "12.5 km");
    }
}
