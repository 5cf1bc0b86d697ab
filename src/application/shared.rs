use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::Vehicle;

use super::{
    ActiveRental, AppError, ConsistencyReport, RentalOutcome, RentalQuote, RentalRequest,
    RentalService, ReturnReceipt,
};

/// Cloneable handle to one rental desk shared between threads.
///
/// Every call holds a single lock over the whole desk for its entire
/// check-then-act sequence, so two callers can never rent the same vehicle.
#[derive(Clone)]
pub struct SharedRentalService {
    inner: Arc<Mutex<RentalService>>,
}

impl SharedRentalService {
    pub fn new(service: RentalService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    pub fn list_available(&self) -> Vec<Vehicle> {
        self.inner
            .lock()
            .list_available()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn quote(&self, request: &RentalRequest) -> Result<RentalQuote, AppError> {
        self.inner.lock().quote(request)
    }

    pub fn begin_rental(&self, request: RentalRequest) -> Result<RentalQuote, AppError> {
        self.inner.lock().begin_rental(request)
    }

    pub fn confirm_rental(
        &self,
        quote: RentalQuote,
        confirm: bool,
    ) -> Result<RentalOutcome, AppError> {
        self.inner.lock().confirm_rental(quote, confirm)
    }

    pub fn rent(&self, request: RentalRequest, confirm: bool) -> Result<RentalOutcome, AppError> {
        self.inner.lock().rent(request, confirm)
    }

    pub fn return_vehicle(&self, vehicle_id: &str) -> Result<ReturnReceipt, AppError> {
        self.inner.lock().return_vehicle(vehicle_id)
    }

    pub fn active_rentals(&self) -> Vec<ActiveRental> {
        self.inner.lock().active_rentals()
    }

    pub fn check_consistency(&self) -> ConsistencyReport {
        self.inner.lock().check_consistency()
    }

    /// Run a closure against the desk while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&RentalService) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }
}
