use crate::domain::Rental;

/// Active rentals in the order they were opened.
///
/// The ledger trusts its caller: `open` does not look at vehicle availability.
/// The service flips the vehicle to rented first and records the rental second.
#[derive(Debug, Clone, Default)]
pub struct RentalLedger {
    rentals: Vec<Rental>,
}

impl RentalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, rental: Rental) {
        self.rentals.push(rental);
    }

    pub fn find_by_vehicle_id(&self, vehicle_id: &str) -> Option<&Rental> {
        self.rentals.iter().find(|r| r.vehicle_id == vehicle_id)
    }

    /// Remove the first rental for the vehicle. Returns None if there was none.
    pub fn close_by_vehicle_id(&mut self, vehicle_id: &str) -> Option<Rental> {
        let index = self
            .rentals
            .iter()
            .position(|r| r.vehicle_id == vehicle_id)?;
        Some(self.rentals.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rental> {
        self.rentals.iter()
    }

    pub fn len(&self) -> usize {
        self.rentals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }
}
