// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use rentdesk::application::{CustomerRegistration, RentalRequest, RentalService, ServiceConfig};
use rentdesk::domain::{Usage, Vehicle};
use rentdesk::io::BuiltinFleet;

/// Desk with the daily fleet (C001 60.00/day, C002 70.00/day, C003 150.00/day)
pub fn daily_desk() -> RentalService {
    RentalService::new(BuiltinFleet::Daily.catalog())
}

/// Daily desk registering customers on every attempt
pub fn strict_daily_desk() -> RentalService {
    RentalService::with_config(
        BuiltinFleet::Daily.catalog(),
        ServiceConfig {
            registration: CustomerRegistration::OnAttempt,
        },
    )
}

pub fn metered_desk() -> RentalService {
    RentalService::new(BuiltinFleet::Metered.catalog())
}

/// Metered desk registering customers on every attempt
pub fn strict_metered_desk() -> RentalService {
    RentalService::with_config(
        BuiltinFleet::Metered.catalog(),
        ServiceConfig {
            registration: CustomerRegistration::OnAttempt,
        },
    )
}

pub fn days(vehicle_id: &str, customer: &str, days: u32) -> RentalRequest {
    RentalRequest::new(vehicle_id, customer, Usage::Days(days))
}

/// Snapshot of everything a failed operation must leave untouched
#[derive(Debug, PartialEq)]
pub struct DeskState {
    pub vehicles: Vec<Vehicle>,
    pub rentals: Vec<(String, String)>,
    pub customer_count: usize,
}

pub fn snapshot(service: &RentalService) -> DeskState {
    DeskState {
        vehicles: service.catalog().iter().cloned().collect(),
        rentals: service
            .ledger()
            .iter()
            .map(|r| (r.vehicle_id.clone(), r.customer_id.clone()))
            .collect(),
        customer_count: service.customers().len(),
    }
}

/// Unavailable vehicles and vehicles with an open rental must be the same set,
/// with exactly one rental each.
pub fn assert_availability_matches_ledger(service: &RentalService) {
    for vehicle in service.catalog().iter() {
        let open = service
            .ledger()
            .iter()
            .filter(|r| r.vehicle_id == vehicle.id)
            .count();
        if vehicle.available {
            assert_eq!(open, 0, "{} is available but has open rentals", vehicle.id);
        } else {
            assert_eq!(open, 1, "{} is rented but has {} open rentals", vehicle.id, open);
        }
    }
    assert!(service.check_consistency().is_healthy());
}
