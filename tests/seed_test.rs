use anyhow::Result;
use rentdesk::application::RentalService;
use rentdesk::domain::{RateBasis, VehicleClass};
use rentdesk::io::{load_fleet_file, Exporter, SeedError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_json_fleet_file() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("fleet.json");
    fs::write(
        &path,
        r#"[
            {"id": "E001", "brand": "Maruti", "model": "Alto", "rate": "9", "basis": "kilometre", "class": "economy-car"},
            {"id": "C010", "brand": "Tata", "model": "Nexon", "rate": "85.50", "basis": "day", "class": "car"}
        ]"#,
    )?;

    let catalog = load_fleet_file(&path)?;
    assert_eq!(catalog.len(), 2);

    let nexon = catalog.get("C010").unwrap();
    assert_eq!(nexon.rate_cents, 8550);
    assert_eq!(nexon.basis, RateBasis::Day);
    assert_eq!(catalog.get("E001").unwrap().class, VehicleClass::EconomyCar);
    Ok(())
}

#[test]
fn test_load_csv_fleet_file_and_export_back() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("fleet.CSV");
    fs::write(
        &path,
        "id,brand,model,rate,basis,class\nB001,Hero,Splendor,4.00,km,bike\nC001,Toyota,Camry,60,day,car\n",
    )?;

    let service = RentalService::new(load_fleet_file(&path)?);
    let export_path = temp.path().join("vehicles.csv");
    let count = Exporter::new(&service).export_vehicles_csv(fs::File::create(&export_path)?, true)?;
    assert_eq!(count, 2);

    let exported = fs::read_to_string(&export_path)?;
    assert!(exported.contains("B001,Hero,Splendor,bike,2,kilometre,4.00,true"));
    assert!(exported.contains("C001,Toyota,Camry,car,4,day,60.00,true"));
    Ok(())
}

#[test]
fn test_missing_fleet_file() {
    let temp = TempDir::new().unwrap();
    let result = load_fleet_file(&temp.path().join("missing.json"));
    assert!(matches!(result, Err(SeedError::Io { .. })));
}

#[test]
fn test_malformed_fleet_file() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("fleet.json");
    fs::write(&path, r#"{"id": "C001"}"#)?;

    assert!(matches!(load_fleet_file(&path), Err(SeedError::Json(_))));
    Ok(())
}
