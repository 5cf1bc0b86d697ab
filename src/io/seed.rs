use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{parse_cents, RateBasis, Vehicle, VehicleClass};
use crate::storage::VehicleCatalog;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read fleet file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid fleet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fleet CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported fleet file format: {} (expected .json or .csv)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Duplicate vehicle ID in fleet: {0}")]
    DuplicateVehicle(String),

    #[error("Invalid rate '{rate}' for vehicle {vehicle_id}")]
    InvalidRate { vehicle_id: String, rate: String },

    #[error("Unknown vehicle class '{class}' for vehicle {vehicle_id}. Valid classes: bike, auto, car, economy-car, classic-car")]
    UnknownClass { vehicle_id: String, class: String },

    #[error("Unknown rate basis '{basis}' for vehicle {vehicle_id}. Valid bases: day, kilometre")]
    UnknownBasis { vehicle_id: String, basis: String },
}

/// Fleets that ship with the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFleet {
    /// Cars charged per day
    Daily,
    /// Bikes, autos and cars charged per kilometre
    Metered,
}

impl BuiltinFleet {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinFleet::Daily => "daily",
            BuiltinFleet::Metered => "metered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(BuiltinFleet::Daily),
            "metered" => Some(BuiltinFleet::Metered),
            _ => None,
        }
    }

    pub fn catalog(&self) -> VehicleCatalog {
        use RateBasis::{Day, Kilometre};
        use VehicleClass::*;

        match self {
            BuiltinFleet::Daily => [
                Vehicle::new("C001", "Toyota", "Camry", 6000, Day, Car),
                Vehicle::new("C002", "Honda", "Accord", 7000, Day, Car),
                Vehicle::new("C003", "Mahindra", "Thar", 15000, Day, Car),
            ]
            .into_iter()
            .collect(),
            BuiltinFleet::Metered => [
                Vehicle::new("B001", "Hero", "Splendor", 400, Kilometre, Bike),
                Vehicle::new("A001", "Bajaj", "RE", 650, Kilometre, Auto),
                Vehicle::new("E001", "Maruti", "Alto", 900, Kilometre, EconomyCar),
                Vehicle::new("K001", "Hindustan", "Ambassador", 2000, Kilometre, ClassicCar),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// One vehicle as written in a fleet file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedVehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    /// Decimal amount, e.g. "60.00"
    pub rate: String,
    pub basis: String,
    pub class: String,
}

impl SeedVehicle {
    fn into_vehicle(self) -> Result<Vehicle, SeedError> {
        let rate_cents = match parse_cents(&self.rate) {
            Ok(cents) if cents >= 0 => cents,
            _ => {
                return Err(SeedError::InvalidRate {
                    vehicle_id: self.id,
                    rate: self.rate,
                })
            }
        };
        let basis = RateBasis::from_str(&self.basis).ok_or_else(|| SeedError::UnknownBasis {
            vehicle_id: self.id.clone(),
            basis: self.basis.clone(),
        })?;
        let class = VehicleClass::from_str(&self.class).ok_or_else(|| SeedError::UnknownClass {
            vehicle_id: self.id.clone(),
            class: self.class.clone(),
        })?;

        Ok(Vehicle::new(self.id, self.brand, self.model, rate_cents, basis, class))
    }
}

/// Build a catalog from seed records, rejecting duplicate ids.
pub fn build_catalog(records: Vec<SeedVehicle>) -> Result<VehicleCatalog, SeedError> {
    let mut seen = HashSet::new();
    let mut catalog = VehicleCatalog::new();

    for record in records {
        if !seen.insert(record.id.clone()) {
            return Err(SeedError::DuplicateVehicle(record.id));
        }
        catalog.add(record.into_vehicle()?);
    }

    Ok(catalog)
}

/// Load a fleet from a JSON array of vehicles.
pub fn load_fleet_json<R: Read>(reader: R) -> Result<VehicleCatalog, SeedError> {
    let records: Vec<SeedVehicle> = serde_json::from_reader(reader)?;
    build_catalog(records)
}

/// Load a fleet from CSV with header `id,brand,model,rate,basis,class`.
pub fn load_fleet_csv<R: Read>(reader: R) -> Result<VehicleCatalog, SeedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let records = csv_reader
        .deserialize()
        .collect::<Result<Vec<SeedVehicle>, _>>()?;
    build_catalog(records)
}

/// Load a fleet file, picking the format from its extension.
pub fn load_fleet_file(path: &Path) -> Result<VehicleCatalog, SeedError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let open = || {
        File::open(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match extension.as_deref() {
        Some("json") => load_fleet_json(open()?),
        Some("csv") => load_fleet_csv(open()?),
        _ => Err(SeedError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_daily_fleet() {
        let catalog = BuiltinFleet::Daily.catalog();
        let ids: Vec<&str> = catalog.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["C001", "C002", "C003"]);
        assert_eq!(catalog.get("C003").unwrap().rate_cents, 15000);
        assert!(catalog.iter().all(|v| v.available && v.basis == RateBasis::Day));
    }

    #[test]
    fn test_builtin_metered_fleet_is_per_kilometre() {
        let catalog = BuiltinFleet::Metered.catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.iter().all(|v| v.basis == RateBasis::Kilometre));
        assert_eq!(catalog.get("A001").unwrap().class.wheels(), 3);
    }

    #[test]
    fn test_builtin_fleet_names() {
        assert_eq!(BuiltinFleet::from_str("Metered"), Some(BuiltinFleet::Metered));
        assert_eq!(BuiltinFleet::from_str(BuiltinFleet::Daily.as_str()), Some(BuiltinFleet::Daily));
        assert_eq!(BuiltinFleet::from_str("hourly"), None);
    }

    #[test]
    fn test_load_json_fleet() {
        let json = r#"[
            {"id": "C001", "brand": "Toyota", "model": "Camry", "rate": "60.00", "basis": "day", "class": "car"},
            {"id": "B001", "brand": "Hero", "model": "Splendor", "rate": "4", "basis": "km", "class": "bike"}
        ]"#;
        let catalog = load_fleet_json(json.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let bike = catalog.get("B001").unwrap();
        assert_eq!(bike.rate_cents, 400);
        assert_eq!(bike.basis, RateBasis::Kilometre);
        assert_eq!(bike.class, VehicleClass::Bike);
    }

    #[test]
    fn test_load_csv_fleet() {
        let csv = "id,brand,model,rate,basis,class\n\
                   K001, Hindustan, Ambassador, 20.00, kilometre, classic-car\n";
        let catalog = load_fleet_csv(csv.as_bytes()).unwrap();

        let classic = catalog.get("K001").unwrap();
        assert_eq!(classic.brand, "Hindustan");
        assert_eq!(classic.rate_cents, 2000);
        assert_eq!(classic.class, VehicleClass::ClassicCar);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "C001", "brand": "Toyota", "model": "Camry", "rate": "60", "basis": "day", "class": "car"},
            {"id": "C001", "brand": "Honda", "model": "Accord", "rate": "70", "basis": "day", "class": "car"}
        ]"#;
        assert!(matches!(
            load_fleet_json(json.as_bytes()),
            Err(SeedError::DuplicateVehicle(id)) if id == "C001"
        ));
    }

    #[test]
    fn test_rejects_negative_rate_and_unknown_class() {
        let negative = r#"[{"id": "C001", "brand": "T", "model": "M", "rate": "-5", "basis": "day", "class": "car"}]"#;
        assert!(matches!(
            load_fleet_json(negative.as_bytes()),
            Err(SeedError::InvalidRate { .. })
        ));

        let truck = r#"[{"id": "T001", "brand": "T", "model": "M", "rate": "5", "basis": "day", "class": "truck"}]"#;
        assert!(matches!(
            load_fleet_json(truck.as_bytes()),
            Err(SeedError::UnknownClass { .. })
        ));

        let hourly = r#"[{"id": "C001", "brand": "T", "model": "M", "rate": "5", "basis": "hour", "class": "car"}]"#;
        assert!(matches!(
            load_fleet_json(hourly.as_bytes()),
            Err(SeedError::UnknownBasis { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            load_fleet_file(Path::new("fleet.yaml")),
            Err(SeedError::UnsupportedFormat(_))
        ));
    }
}
