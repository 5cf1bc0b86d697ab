use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, CustomerId, Usage, VehicleId};

pub type RentalId = Uuid;

/// An active rental: one vehicle lent to one customer for a given usage.
/// Exists only while the vehicle is marked unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: RentalId,
    pub vehicle_id: VehicleId,
    pub customer_id: CustomerId,
    pub usage: Usage,
    /// Price agreed when the rental was opened
    pub price_cents: Cents,
    pub opened_at: DateTime<Utc>,
}

impl Rental {
    pub fn new(
        vehicle_id: impl Into<VehicleId>,
        customer_id: impl Into<CustomerId>,
        usage: Usage,
        price_cents: Cents,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: vehicle_id.into(),
            customer_id: customer_id.into(),
            usage,
            price_cents,
            opened_at: Utc::now(),
        }
    }
}
