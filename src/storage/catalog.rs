use crate::domain::Vehicle;

use super::StorageError;

/// All vehicles of the desk, in insertion order, together with their availability.
#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl VehicleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle. Identifiers are not checked for uniqueness here;
    /// that is up to whoever seeds the catalog.
    pub fn add(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    /// First vehicle with the given id, whatever its availability.
    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// First vehicle with the given id that can currently be rented.
    pub fn find_available_by_id(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id && v.available)
    }

    /// First vehicle with the given id that is currently rented out.
    pub fn find_rented_by_id(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id && !v.available)
    }

    pub fn list_available(&self) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| v.available).collect()
    }

    /// Flip the first vehicle with this id that is not already in the
    /// requested state, so that with duplicate ids the flip lands on the
    /// same record `find_available_by_id` / `find_rented_by_id` returned.
    /// A no-op when every vehicle with the id is already in that state.
    pub fn set_availability(&mut self, id: &str, available: bool) -> Result<(), StorageError> {
        if let Some(vehicle) = self
            .vehicles
            .iter_mut()
            .find(|v| v.id == id && v.available != available)
        {
            vehicle.available = available;
            return Ok(());
        }

        match self.get(id) {
            Some(_) => Ok(()),
            None => Err(StorageError::VehicleNotFound(id.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl FromIterator<Vehicle> for VehicleCatalog {
    fn from_iter<I: IntoIterator<Item = Vehicle>>(iter: I) -> Self {
        Self {
            vehicles: iter.into_iter().collect(),
        }
    }
}
