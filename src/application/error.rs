use thiserror::Error;

use crate::domain::{PricingError, VehicleId};
use crate::storage::StorageError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Invalid vehicle selection or vehicle not available for rent: {0}")]
    VehicleUnavailableOrNotFound(VehicleId),

    #[error("Invalid vehicle ID or vehicle is not rented: {0}")]
    VehicleNotRentedOrNotFound(VehicleId),

    /// The vehicle is marked rented but the ledger has no entry for it.
    /// Never produced by a consistent desk.
    #[error("Vehicle {0} is marked rented but has no rental record")]
    RentalRecordMissing(VehicleId),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Invalid usage: {0}")]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
