use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::application::RentalService;
use crate::domain::{format_cents, Vehicle};

/// Flat view of a vehicle for listings
#[derive(Debug, Clone, Serialize)]
pub struct VehicleRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub class: String,
    pub wheels: u8,
    pub basis: String,
    pub rate: String,
    pub available: bool,
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            class: vehicle.class.as_str().to_string(),
            wheels: vehicle.class.wheels(),
            basis: vehicle.basis.as_str().to_string(),
            rate: format_cents(vehicle.rate_cents),
            available: vehicle.available,
        }
    }
}

/// Exporter for writing the desk's fleet and rentals in machine-readable formats
pub struct Exporter<'a> {
    service: &'a RentalService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a RentalService) -> Self {
        Self { service }
    }

    /// Vehicles to export: the whole fleet, or only what can be rented now.
    pub fn vehicle_records(&self, include_rented: bool) -> Vec<VehicleRecord> {
        self.service
            .catalog()
            .iter()
            .filter(|v| include_rented || v.available)
            .map(VehicleRecord::from)
            .collect()
    }

    /// Export vehicles to CSV format
    pub fn export_vehicles_csv<W: Write>(&self, writer: W, include_rented: bool) -> Result<usize> {
        let records = self.vehicle_records(include_rented);
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "brand",
            "model",
            "class",
            "wheels",
            "basis",
            "rate",
            "available",
        ])?;

        for record in &records {
            let wheels = record.wheels.to_string();
            csv_writer.write_record([
                record.id.as_str(),
                record.brand.as_str(),
                record.model.as_str(),
                record.class.as_str(),
                wheels.as_str(),
                record.basis.as_str(),
                record.rate.as_str(),
                if record.available { "true" } else { "false" },
            ])?;
        }

        csv_writer.flush()?;
        Ok(records.len())
    }

    /// Export vehicles as a pretty-printed JSON array
    pub fn export_vehicles_json<W: Write>(
        &self,
        mut writer: W,
        include_rented: bool,
    ) -> Result<usize> {
        let records = self.vehicle_records(include_rented);
        let json = serde_json::to_string_pretty(&records)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(records.len())
    }

    /// Export open rentals to CSV format
    pub fn export_rentals_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let rentals = self.service.active_rentals();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "rental_id",
            "vehicle_id",
            "vehicle",
            "customer_id",
            "customer_name",
            "usage",
            "price",
            "opened_at",
        ])?;

        for active in &rentals {
            csv_writer.write_record([
                active.rental.id.to_string(),
                active.vehicle.id.clone(),
                active.vehicle.display_name(),
                active.customer.id.clone(),
                active.customer.name.clone(),
                active.rental.usage.to_string(),
                format_cents(active.rental.price_cents),
                active.rental.opened_at.to_rfc3339(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(rentals.len())
    }
}
