use anyhow::Result;
use std::io::{BufRead, Write};

use crate::application::{CustomerRegistration, RentalOutcome, RentalRequest, RentalService};
use crate::domain::{format_cents, RateBasis, Usage};

/// Run the interactive rental desk until the operator exits or input ends.
///
/// Service errors are shown to the operator and the session carries on;
/// only I/O failures end it with an error.
pub fn run_desk<R: BufRead, W: Write>(
    service: &mut RentalService,
    input: R,
    output: W,
) -> Result<()> {
    let mut desk = Desk {
        service,
        input,
        output,
    };
    desk.run()
}

enum MenuChoice {
    Rent,
    Return,
    Available,
    Rentals,
    Check,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "rent" => Some(MenuChoice::Rent),
            "2" | "return" => Some(MenuChoice::Return),
            "3" | "available" | "list" => Some(MenuChoice::Available),
            "4" | "rentals" => Some(MenuChoice::Rentals),
            "5" | "check" => Some(MenuChoice::Check),
            "6" | "exit" | "quit" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

struct Desk<'a, R, W> {
    service: &'a mut RentalService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Desk<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "===== Vehicle Rental Desk =====")?;
            writeln!(self.output, "1. Rent a Vehicle")?;
            writeln!(self.output, "2. Return a Vehicle")?;
            writeln!(self.output, "3. Available Vehicles")?;
            writeln!(self.output, "4. Active Rentals")?;
            writeln!(self.output, "5. Check Consistency")?;
            writeln!(self.output, "6. Exit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let keep_going = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Rent) => self.rent()?,
                Some(MenuChoice::Return) => self.return_vehicle()?,
                Some(MenuChoice::Available) => {
                    self.show_available()?;
                    true
                }
                Some(MenuChoice::Rentals) => {
                    self.show_rentals()?;
                    true
                }
                Some(MenuChoice::Check) => {
                    self.check()?;
                    true
                }
                Some(MenuChoice::Exit) => false,
                None => {
                    writeln!(self.output, "Invalid choice. Please enter a valid option.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
            writeln!(self.output)?;
        }

        writeln!(self.output, "\nThank you for using the Vehicle Rental Desk!")?;
        self.output.flush()?;
        Ok(())
    }

    /// Print a prompt and read one line. None when input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Returns false when input ran out mid-dialogue.
    fn rent(&mut self) -> Result<bool> {
        writeln!(self.output, "\n== Rent a Vehicle ==\n")?;

        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(false);
        };
        // Strict registration takes any name, the empty one included
        let strict = self.service.config().registration == CustomerRegistration::OnAttempt;
        if name.is_empty() && !strict {
            writeln!(self.output, "\nName cannot be empty.")?;
            return Ok(true);
        }

        writeln!(self.output)?;
        self.show_available()?;

        let Some(vehicle_id) = self.prompt("\nEnter the vehicle ID you want to rent: ")? else {
            return Ok(false);
        };

        // Unknown ids are asked for in the fleet's own unit; the service rejects them right after
        let catalog = self.service.catalog();
        let basis = catalog
            .get(&vehicle_id)
            .or_else(|| catalog.iter().next())
            .map(|v| v.basis)
            .unwrap_or(RateBasis::Day);
        let usage_prompt = match basis {
            RateBasis::Day => "Enter the number of days for rental: ",
            RateBasis::Kilometre => "Enter the distance in km: ",
        };
        let Some(usage_input) = self.prompt(usage_prompt)? else {
            return Ok(false);
        };
        let usage = match Usage::parse(basis, &usage_input) {
            Ok(usage) => usage,
            Err(err) => {
                writeln!(self.output, "\n{}", err)?;
                return Ok(true);
            }
        };

        let request = RentalRequest::new(vehicle_id, name, usage);
        let quote = match self.service.begin_rental(request) {
            Ok(quote) => quote,
            Err(err) => {
                writeln!(self.output, "\n{}", err)?;
                return Ok(true);
            }
        };

        writeln!(self.output, "\n== Rental Information ==\n")?;
        if let Some(customer) = &quote.customer {
            writeln!(self.output, "Customer ID: {}", customer.id)?;
        }
        writeln!(self.output, "Customer Name: {}", quote.request.customer_name)?;
        writeln!(self.output, "Vehicle: {} {}", quote.brand, quote.model)?;
        match quote.request.usage {
            Usage::Days(days) => writeln!(self.output, "Rental Days: {}", days)?,
            Usage::Distance(km) => writeln!(self.output, "Distance: {} km", km)?,
        }
        writeln!(
            self.output,
            "Total Price: ${}",
            format_cents(quote.price_cents)
        )?;

        let Some(answer) = self.prompt("\nConfirm rental (Y/N): ")? else {
            return Ok(false);
        };
        let confirm = answer.eq_ignore_ascii_case("y");

        match self.service.confirm_rental(quote, confirm) {
            Ok(RentalOutcome::Rented(receipt)) => {
                writeln!(self.output, "\nVehicle rented successfully.")?;
                writeln!(self.output, "Customer ID: {}", receipt.customer_id)?;
            }
            Ok(RentalOutcome::Declined(_)) => {
                writeln!(self.output, "\nRental canceled.")?;
            }
            Err(err) => {
                writeln!(self.output, "\n{}", err)?;
            }
        }
        Ok(true)
    }

    fn return_vehicle(&mut self) -> Result<bool> {
        writeln!(self.output, "\n== Return a Vehicle ==\n")?;

        let Some(vehicle_id) = self.prompt("Enter the vehicle ID you want to return: ")? else {
            return Ok(false);
        };

        match self.service.return_vehicle(&vehicle_id) {
            Ok(receipt) => writeln!(
                self.output,
                "Vehicle returned successfully by {}",
                receipt.customer_name
            )?,
            Err(err) => writeln!(self.output, "{}", err)?,
        }
        Ok(true)
    }

    fn show_available(&mut self) -> Result<()> {
        writeln!(self.output, "Available Vehicles:")?;
        let available = self.service.list_available();
        if available.is_empty() {
            writeln!(self.output, "  (none)")?;
        }
        for vehicle in available {
            writeln!(
                self.output,
                "{} - {} {} ({}, {}/{})",
                vehicle.id,
                vehicle.brand,
                vehicle.model,
                vehicle.class.label(),
                format_cents(vehicle.rate_cents),
                vehicle.basis.unit()
            )?;
        }
        Ok(())
    }

    fn show_rentals(&mut self) -> Result<()> {
        let rentals = self.service.active_rentals();
        if rentals.is_empty() {
            writeln!(self.output, "No active rentals.")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "{:<6} {:<22} {:<8} {:<16} {:<12} {:>10}",
            "ID", "VEHICLE", "CUST", "NAME", "USAGE", "PRICE"
        )?;
        writeln!(self.output, "{}", "-".repeat(79))?;
        for active in rentals {
            writeln!(
                self.output,
                "{:<6} {:<22} {:<8} {:<16} {:<12} {:>10}",
                active.vehicle.id,
                active.vehicle.display_name(),
                active.customer.id,
                active.customer.name,
                active.rental.usage.to_string(),
                format_cents(active.rental.price_cents)
            )?;
        }
        Ok(())
    }

    fn check(&mut self) -> Result<()> {
        let report = self.service.check_consistency();

        writeln!(self.output, "Vehicles:      {}", report.vehicle_count)?;
        writeln!(self.output, "Rented:        {}", report.rented_count)?;
        writeln!(self.output, "Open rentals:  {}", report.open_rentals)?;
        writeln!(self.output, "Customers:     {}", report.customer_count)?;

        if report.is_healthy() {
            writeln!(self.output, "Desk is consistent.")?;
        } else {
            writeln!(self.output, "Issues found:")?;
            for issue in &report.issues {
                writeln!(self.output, "  - {}", issue)?;
            }
        }
        Ok(())
    }
}
