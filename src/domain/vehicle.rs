use serde::{Deserialize, Serialize};

use super::{Cents, PricingError, RateBasis, Usage};

pub type VehicleId = String;

/// Kind of vehicle. Only affects how the vehicle is labelled, never how it is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleClass {
    Bike,
    /// Three-wheeled auto rickshaw
    Auto,
    Car,
    EconomyCar,
    ClassicCar,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Bike => "bike",
            VehicleClass::Auto => "auto",
            VehicleClass::Car => "car",
            VehicleClass::EconomyCar => "economy-car",
            VehicleClass::ClassicCar => "classic-car",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "bike" => Some(VehicleClass::Bike),
            "auto" => Some(VehicleClass::Auto),
            "car" => Some(VehicleClass::Car),
            "economy-car" | "economy" => Some(VehicleClass::EconomyCar),
            "classic-car" | "classic" => Some(VehicleClass::ClassicCar),
            _ => None,
        }
    }

    /// Human-readable label used on receipts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::Bike => "Bike",
            VehicleClass::Auto => "Auto",
            VehicleClass::Car => "Car",
            VehicleClass::EconomyCar => "Economy Car",
            VehicleClass::ClassicCar => "Classic Car",
        }
    }

    pub fn wheels(&self) -> u8 {
        match self {
            VehicleClass::Bike => 2,
            VehicleClass::Auto => 3,
            VehicleClass::Car | VehicleClass::EconomyCar | VehicleClass::ClassicCar => 4,
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    /// Price per unit of `basis`, in cents
    pub rate_cents: Cents,
    pub basis: RateBasis,
    pub class: VehicleClass,
    /// True while the vehicle can be rented
    pub available: bool,
}

impl Vehicle {
    /// Create a new, available vehicle.
    pub fn new(
        id: impl Into<VehicleId>,
        brand: impl Into<String>,
        model: impl Into<String>,
        rate_cents: Cents,
        basis: RateBasis,
        class: VehicleClass,
    ) -> Self {
        assert!(rate_cents >= 0, "Vehicle rate must not be negative");
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            rate_cents,
            basis,
            class,
            available: true,
        }
    }

    /// "Toyota Camry"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Price of renting this vehicle for the given usage: rate x usage.
    pub fn calculate_price(&self, usage: &Usage) -> Result<Cents, PricingError> {
        if usage.basis() != self.basis {
            return Err(PricingError::UsageMismatch {
                expected: self.basis,
                actual: usage.basis(),
            });
        }

        match *usage {
            Usage::Days(days) => Ok(self.rate_cents.saturating_mul(Cents::from(days))),
            Usage::Distance(km) => {
                if !km.is_finite() || km < 0.0 {
                    return Err(PricingError::InvalidDistance(km));
                }
                // f64 -> i64 casts saturate
                Ok((self.rate_cents as f64 * km).round() as Cents)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camry() -> Vehicle {
        Vehicle::new("C001", "Toyota", "Camry", 6000, RateBasis::Day, VehicleClass::Car)
    }

    #[test]
    fn test_vehicle_class_roundtrip() {
        for class in [
            VehicleClass::Bike,
            VehicleClass::Auto,
            VehicleClass::Car,
            VehicleClass::EconomyCar,
            VehicleClass::ClassicCar,
        ] {
            assert_eq!(VehicleClass::from_str(class.as_str()), Some(class));
        }
        assert_eq!(VehicleClass::from_str("Economy_Car"), Some(VehicleClass::EconomyCar));
        assert_eq!(VehicleClass::from_str("truck"), None);
    }

    #[test]
    fn test_wheel_counts() {
        assert_eq!(VehicleClass::Bike.wheels(), 2);
        assert_eq!(VehicleClass::Auto.wheels(), 3);
        assert_eq!(VehicleClass::ClassicCar.wheels(), 4);
    }

    #[test]
    fn test_new_vehicle_is_available() {
        let vehicle = camry();
        assert!(vehicle.available);
        assert_eq!(vehicle.display_name(), "Toyota Camry");
    }

    #[test]
    fn test_price_per_day_is_linear() {
        let vehicle = camry();
        assert_eq!(vehicle.calculate_price(&Usage::Days(0)), Ok(0));
        assert_eq!(vehicle.calculate_price(&Usage::Days(1)), Ok(6000));
        assert_eq!(vehicle.calculate_price(&Usage::Days(3)), Ok(18000));
    }

    #[test]
    fn test_price_per_distance_rounds_to_cent() {
        let auto = Vehicle::new("A001", "Bajaj", "RE", 650, RateBasis::Kilometre, VehicleClass::Auto);
        assert_eq!(auto.calculate_price(&Usage::Distance(0.0)), Ok(0));
        assert_eq!(auto.calculate_price(&Usage::Distance(10.0)), Ok(6500));
        assert_eq!(auto.calculate_price(&Usage::Distance(1.5)), Ok(975));
        assert_eq!(auto.calculate_price(&Usage::Distance(0.001)), Ok(1));
    }

    #[test]
    fn test_price_rejects_mismatched_usage() {
        let vehicle = camry();
        assert_eq!(
            vehicle.calculate_price(&Usage::Distance(12.0)),
            Err(PricingError::UsageMismatch {
                expected: RateBasis::Day,
                actual: RateBasis::Kilometre,
            })
        );
    }

    #[test]
    fn test_price_rejects_negative_distance() {
        let bike = Vehicle::new("B001", "Hero", "Splendor", 400, RateBasis::Kilometre, VehicleClass::Bike);
        assert!(matches!(
            bike.calculate_price(&Usage::Distance(-1.0)),
            Err(PricingError::InvalidDistance(_))
        ));
        assert!(matches!(
            bike.calculate_price(&Usage::Distance(f64::NAN)),
            Err(PricingError::InvalidDistance(_))
        ));
    }

    #[test]
    #[should_panic(expected = "Vehicle rate must not be negative")]
    fn test_vehicle_requires_non_negative_rate() {
        Vehicle::new("X", "Brand", "Model", -1, RateBasis::Day, VehicleClass::Car);
    }
}
