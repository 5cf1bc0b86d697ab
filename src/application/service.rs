use tracing::{debug, error, info, warn};

use crate::domain::{
    Cents, Customer, CustomerId, Rental, RentalId, Usage, Vehicle, VehicleClass, VehicleId,
};
use crate::storage::{CustomerDirectory, RentalLedger, VehicleCatalog};

use super::{build_consistency_report, AppError, ConsistencyReport};

/// When a walk-in customer gets a customer record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CustomerRegistration {
    /// Register the customer only once the rental is confirmed and committed.
    #[default]
    OnConfirm,
    /// Register the customer on every rental attempt, before the vehicle is even
    /// looked up. Declined and failed attempts leave an orphan record behind.
    OnAttempt,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceConfig {
    pub registration: CustomerRegistration,
}

/// Application service running the rental desk.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct RentalService {
    catalog: VehicleCatalog,
    customers: CustomerDirectory,
    ledger: RentalLedger,
    config: ServiceConfig,
}

/// What a walk-in customer asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRequest {
    pub vehicle_id: VehicleId,
    pub customer_name: String,
    pub usage: Usage,
}

impl RentalRequest {
    pub fn new(
        vehicle_id: impl Into<VehicleId>,
        customer_name: impl Into<String>,
        usage: Usage,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            customer_name: customer_name.into(),
            usage,
        }
    }
}

/// A priced rental waiting for the customer's confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct RentalQuote {
    pub request: RentalRequest,
    /// Set when the customer was registered before confirmation
    pub customer: Option<Customer>,
    pub brand: String,
    pub model: String,
    pub class: VehicleClass,
    pub price_cents: Cents,
}

/// Result of a committed rental
#[derive(Debug, Clone, PartialEq)]
pub struct RentalReceipt {
    pub rental_id: RentalId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub vehicle_id: VehicleId,
    pub brand: String,
    pub model: String,
    pub usage: Usage,
    pub price_cents: Cents,
}

/// Result of a rent call: either committed, or declined at confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum RentalOutcome {
    Rented(RentalReceipt),
    Declined(RentalQuote),
}

impl RentalOutcome {
    pub fn receipt(&self) -> Option<&RentalReceipt> {
        match self {
            RentalOutcome::Rented(receipt) => Some(receipt),
            RentalOutcome::Declined(_) => None,
        }
    }
}

/// Result of returning a vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnReceipt {
    pub rental_id: RentalId,
    pub vehicle_id: VehicleId,
    pub brand: String,
    pub model: String,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub usage: Usage,
    pub price_cents: Cents,
}

/// An open rental joined with its vehicle and customer, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRental {
    pub rental: Rental,
    pub vehicle: Vehicle,
    pub customer: Customer,
}

impl RentalService {
    /// Create a rental service over the given fleet with default settings.
    pub fn new(catalog: VehicleCatalog) -> Self {
        Self::with_config(catalog, ServiceConfig::default())
    }

    pub fn with_config(catalog: VehicleCatalog, config: ServiceConfig) -> Self {
        Self {
            catalog,
            customers: CustomerDirectory::new(),
            ledger: RentalLedger::new(),
            config,
        }
    }

    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    pub fn ledger(&self) -> &RentalLedger {
        &self.ledger
    }

    /// Vehicles that can be rented right now, in fleet order.
    pub fn list_available(&self) -> Vec<&Vehicle> {
        self.catalog.list_available()
    }

    // ========================
    // Renting
    // ========================

    /// Price a rental without touching any state.
    pub fn quote(&self, request: &RentalRequest) -> Result<RentalQuote, AppError> {
        let vehicle = self
            .catalog
            .find_available_by_id(&request.vehicle_id)
            .ok_or_else(|| AppError::VehicleUnavailableOrNotFound(request.vehicle_id.clone()))?;

        let price_cents = vehicle.calculate_price(&request.usage)?;
        debug!(
            vehicle_id = %request.vehicle_id,
            usage = %request.usage,
            price_cents,
            "Quoted rental"
        );

        Ok(RentalQuote {
            request: request.clone(),
            customer: None,
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            class: vehicle.class,
            price_cents,
        })
    }

    /// First half of a rental: take the customer's intent and price it.
    /// Under `CustomerRegistration::OnAttempt` the customer is registered here,
    /// before availability is checked.
    pub fn begin_rental(&mut self, request: RentalRequest) -> Result<RentalQuote, AppError> {
        let customer = match self.config.registration {
            CustomerRegistration::OnAttempt => {
                Some(self.customers.register(request.customer_name.clone()))
            }
            CustomerRegistration::OnConfirm => None,
        };

        let mut quote = self.quote(&request).inspect_err(|err| {
            warn!(vehicle_id = %request.vehicle_id, error = %err, "Rental rejected");
        })?;
        quote.customer = customer;
        Ok(quote)
    }

    /// Second half of a rental: commit or drop a quote.
    /// Availability is checked again, since the vehicle may have been rented
    /// between the two calls.
    pub fn confirm_rental(
        &mut self,
        quote: RentalQuote,
        confirm: bool,
    ) -> Result<RentalOutcome, AppError> {
        if !confirm {
            info!(vehicle_id = %quote.request.vehicle_id, "Rental declined");
            return Ok(RentalOutcome::Declined(quote));
        }

        let vehicle_id = quote.request.vehicle_id.clone();
        if self.catalog.find_available_by_id(&vehicle_id).is_none() {
            warn!(vehicle_id = %vehicle_id, "Vehicle no longer available at confirmation");
            return Err(AppError::VehicleUnavailableOrNotFound(vehicle_id));
        }

        let customer = match quote.customer {
            Some(customer) => customer,
            None => self.customers.register(quote.request.customer_name.clone()),
        };

        // Flip the flag first, then record
        self.catalog.set_availability(&vehicle_id, false)?;
        let rental = Rental::new(
            vehicle_id.clone(),
            customer.id.clone(),
            quote.request.usage,
            quote.price_cents,
        );
        let rental_id = rental.id;
        self.ledger.open(rental);

        info!(
            vehicle_id = %vehicle_id,
            customer_id = %customer.id,
            price_cents = quote.price_cents,
            "Vehicle rented"
        );

        Ok(RentalOutcome::Rented(RentalReceipt {
            rental_id,
            customer_id: customer.id,
            customer_name: customer.name,
            vehicle_id,
            brand: quote.brand,
            model: quote.model,
            usage: quote.request.usage,
            price_cents: quote.price_cents,
        }))
    }

    /// Rent a vehicle in one call: `confirm` carries the customer's yes/no answer.
    pub fn rent(
        &mut self,
        request: RentalRequest,
        confirm: bool,
    ) -> Result<RentalOutcome, AppError> {
        let quote = self.begin_rental(request)?;
        self.confirm_rental(quote, confirm)
    }

    // ========================
    // Returning
    // ========================

    /// Take a rented vehicle back and close its rental.
    pub fn return_vehicle(&mut self, vehicle_id: &str) -> Result<ReturnReceipt, AppError> {
        let vehicle = self.catalog.find_rented_by_id(vehicle_id).ok_or_else(|| {
            warn!(vehicle_id, "Return rejected: vehicle not rented or unknown");
            AppError::VehicleNotRentedOrNotFound(vehicle_id.to_string())
        })?;
        let (brand, model) = (vehicle.brand.clone(), vehicle.model.clone());

        let rental = self.ledger.find_by_vehicle_id(vehicle_id).ok_or_else(|| {
            error!(vehicle_id, "Vehicle is marked rented but has no rental record");
            AppError::RentalRecordMissing(vehicle_id.to_string())
        })?;

        let customer = self
            .customers
            .get(&rental.customer_id)
            .cloned()
            .ok_or_else(|| AppError::CustomerNotFound(rental.customer_id.clone()))?;

        self.catalog.set_availability(vehicle_id, true)?;
        let rental = self
            .ledger
            .close_by_vehicle_id(vehicle_id)
            .ok_or_else(|| AppError::RentalRecordMissing(vehicle_id.to_string()))?;

        info!(vehicle_id, customer_id = %customer.id, "Vehicle returned");

        Ok(ReturnReceipt {
            rental_id: rental.id,
            vehicle_id: rental.vehicle_id,
            brand,
            model,
            customer_id: customer.id,
            customer_name: customer.name,
            usage: rental.usage,
            price_cents: rental.price_cents,
        })
    }

    // ========================
    // Inspection
    // ========================

    /// Open rentals in the order they were opened.
    pub fn active_rentals(&self) -> Vec<ActiveRental> {
        self.ledger
            .iter()
            .filter_map(|rental| {
                let vehicle = self.catalog.get(&rental.vehicle_id)?;
                let customer = self.customers.get(&rental.customer_id)?;
                Some(ActiveRental {
                    rental: rental.clone(),
                    vehicle: vehicle.clone(),
                    customer: customer.clone(),
                })
            })
            .collect()
    }

    /// Verify that vehicle availability and the ledger agree.
    pub fn check_consistency(&self) -> ConsistencyReport {
        build_consistency_report(&self.catalog, &self.customers, &self.ledger)
    }

    /// Mutable access to the fleet, bypassing the rental protocol.
    #[cfg(test)]
    pub(crate) fn catalog_mut(&mut self) -> &mut VehicleCatalog {
        &mut self.catalog
    }
}
