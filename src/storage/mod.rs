mod catalog;
mod directory;
mod ledger;

pub use catalog::*;
pub use directory::*;
pub use ledger::*;

use thiserror::Error;

use crate::domain::VehicleId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(VehicleId),
}
