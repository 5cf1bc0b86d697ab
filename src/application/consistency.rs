use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{CustomerId, RentalId, VehicleId};
use crate::storage::{CustomerDirectory, RentalLedger, VehicleCatalog};

/// Problems that break the "unavailable iff exactly one open rental" rule,
/// or leave a rental pointing at nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyIssue {
    DuplicateVehicleId {
        vehicle_id: VehicleId,
        count: usize,
    },
    RentedWithoutRecord {
        vehicle_id: VehicleId,
    },
    RecordForAvailableVehicle {
        vehicle_id: VehicleId,
        rental_id: RentalId,
    },
    MultipleRecords {
        vehicle_id: VehicleId,
        count: usize,
    },
    UnknownVehicle {
        rental_id: RentalId,
        vehicle_id: VehicleId,
    },
    UnknownCustomer {
        rental_id: RentalId,
        customer_id: CustomerId,
    },
}

impl std::fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyIssue::DuplicateVehicleId { vehicle_id, count } => {
                write!(f, "Vehicle ID {} appears {} times in the fleet", vehicle_id, count)
            }
            ConsistencyIssue::RentedWithoutRecord { vehicle_id } => {
                write!(f, "Vehicle {} is rented but has no rental record", vehicle_id)
            }
            ConsistencyIssue::RecordForAvailableVehicle {
                vehicle_id,
                rental_id,
            } => write!(
                f,
                "Rental {} is open but vehicle {} is available",
                rental_id, vehicle_id
            ),
            ConsistencyIssue::MultipleRecords { vehicle_id, count } => {
                write!(f, "Vehicle {} has {} open rentals", vehicle_id, count)
            }
            ConsistencyIssue::UnknownVehicle {
                rental_id,
                vehicle_id,
            } => write!(
                f,
                "Rental {} refers to unknown vehicle {}",
                rental_id, vehicle_id
            ),
            ConsistencyIssue::UnknownCustomer {
                rental_id,
                customer_id,
            } => write!(
                f,
                "Rental {} refers to unknown customer {}",
                rental_id, customer_id
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub vehicle_count: usize,
    pub rented_count: usize,
    pub open_rentals: usize,
    pub customer_count: usize,
    pub issues: Vec<ConsistencyIssue>,
}

impl ConsistencyReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn build_consistency_report(
    catalog: &VehicleCatalog,
    customers: &CustomerDirectory,
    ledger: &RentalLedger,
) -> ConsistencyReport {
    let mut issues = Vec::new();

    // Count ids in fleet order so issues come out deterministically
    let mut fleet_order: Vec<&str> = Vec::new();
    let mut fleet_counts: HashMap<&str, usize> = HashMap::new();
    for vehicle in catalog.iter() {
        let count = fleet_counts.entry(vehicle.id.as_str()).or_insert(0);
        if *count == 0 {
            fleet_order.push(vehicle.id.as_str());
        }
        *count += 1;
    }
    for id in &fleet_order {
        let count = fleet_counts[id];
        if count > 1 {
            issues.push(ConsistencyIssue::DuplicateVehicleId {
                vehicle_id: id.to_string(),
                count,
            });
        }
    }

    let mut record_counts: HashMap<&str, usize> = HashMap::new();
    for rental in ledger.iter() {
        *record_counts.entry(rental.vehicle_id.as_str()).or_insert(0) += 1;

        match catalog.get(&rental.vehicle_id) {
            None => issues.push(ConsistencyIssue::UnknownVehicle {
                rental_id: rental.id,
                vehicle_id: rental.vehicle_id.clone(),
            }),
            Some(vehicle) if vehicle.available => {
                issues.push(ConsistencyIssue::RecordForAvailableVehicle {
                    vehicle_id: rental.vehicle_id.clone(),
                    rental_id: rental.id,
                })
            }
            Some(_) => {}
        }

        if customers.get(&rental.customer_id).is_none() {
            issues.push(ConsistencyIssue::UnknownCustomer {
                rental_id: rental.id,
                customer_id: rental.customer_id.clone(),
            });
        }
    }

    let mut rented_count = 0;
    for vehicle in catalog.iter().filter(|v| !v.available) {
        rented_count += 1;
        match record_counts.get(vehicle.id.as_str()).copied().unwrap_or(0) {
            0 => issues.push(ConsistencyIssue::RentedWithoutRecord {
                vehicle_id: vehicle.id.clone(),
            }),
            1 => {}
            count => issues.push(ConsistencyIssue::MultipleRecords {
                vehicle_id: vehicle.id.clone(),
                count,
            }),
        }
    }

    ConsistencyReport {
        vehicle_count: catalog.len(),
        rented_count,
        open_rentals: ledger.len(),
        customer_count: customers.len(),
        issues,
    }
}
