use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::{CustomerRegistration, RentalRequest, RentalService, ServiceConfig};
use crate::domain::{format_cents, RateBasis, Usage};
use crate::io::{load_fleet_file, BuiltinFleet, Exporter};
use crate::storage::VehicleCatalog;

mod desk;

pub use desk::run_desk;

/// Rentdesk - Vehicle Rental Desk
#[derive(Parser)]
#[command(name = "rentdesk")]
#[command(about = "Rent out and take back vehicles from a walk-in rental desk")]
#[command(version)]
pub struct Cli {
    /// Built-in fleet to load: daily, metered
    #[arg(short, long, default_value = "daily", global = true)]
    pub fleet: String,

    /// Fleet file (.json or .csv) to load instead of a built-in fleet
    #[arg(short, long, global = true)]
    pub seed: Option<PathBuf>,

    /// Register a customer on every rental attempt, even declined ones
    #[arg(long, global = true)]
    pub strict_registration: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List vehicles of the fleet
    Vehicles {
        /// Include vehicles that are currently rented
        #[arg(long)]
        all: bool,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,

        /// Output file for json/csv (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Price a rental without renting
    Quote {
        /// Vehicle ID (e.g., "C001")
        vehicle_id: String,

        /// Days for daily vehicles, kilometres for metered ones
        usage: String,
    },

    /// Run the interactive rental desk
    Desk {
        /// Write the rentals still open at the end of the session to this CSV file
        #[arg(long)]
        export_rentals: Option<PathBuf>,
    },
}

impl Cli {
    /// Build the rental service this invocation works on.
    pub fn build_service(&self) -> Result<RentalService> {
        let catalog = self.load_catalog()?;
        let registration = if self.strict_registration {
            CustomerRegistration::OnAttempt
        } else {
            CustomerRegistration::OnConfirm
        };
        tracing::debug!(vehicles = catalog.len(), ?registration, "Rental desk ready");
        Ok(RentalService::with_config(catalog, ServiceConfig { registration }))
    }

    fn load_catalog(&self) -> Result<VehicleCatalog> {
        if let Some(path) = &self.seed {
            return load_fleet_file(path)
                .with_context(|| format!("Failed to load fleet from {}", path.display()));
        }

        let fleet = BuiltinFleet::from_str(&self.fleet).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid fleet '{}'. Valid fleets: daily, metered",
                self.fleet
            )
        })?;
        Ok(fleet.catalog())
    }

    pub fn run(self) -> Result<()> {
        let mut service = self.build_service()?;

        match self.command {
            Commands::Vehicles {
                all,
                format,
                output,
            } => {
                run_vehicles_command(&service, all, &format, output.as_deref())?;
            }

            Commands::Quote { vehicle_id, usage } => {
                run_quote_command(&service, &vehicle_id, &usage)?;
            }

            Commands::Desk { export_rentals } => {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                run_desk(&mut service, stdin.lock(), stdout.lock())?;

                if let Some(path) = export_rentals {
                    let count = run_export_rentals(&service, &path)?;
                    eprintln!("Exported {} open rentals", count);
                }
            }
        }

        Ok(())
    }
}

fn run_vehicles_command(
    service: &RentalService,
    all: bool,
    format: &str,
    output: Option<&std::path::Path>,
) -> Result<()> {
    use std::fs::File;
    use std::io::{stdout, Write};

    if format == "table" {
        let vehicles: Vec<_> = service
            .catalog()
            .iter()
            .filter(|v| all || v.available)
            .collect();
        if vehicles.is_empty() {
            println!("No vehicles available.");
            return Ok(());
        }

        println!(
            "{:<6} {:<12} {:<12} {:<12} {:>6} {:>14}  {:<9}",
            "ID", "BRAND", "MODEL", "CLASS", "WHEELS", "RATE", "STATUS"
        );
        println!("{}", "-".repeat(78));
        for vehicle in vehicles {
            println!(
                "{:<6} {:<12} {:<12} {:<12} {:>6} {:>14}  {:<9}",
                vehicle.id,
                truncate(&vehicle.brand, 12),
                truncate(&vehicle.model, 12),
                vehicle.class.label(),
                vehicle.class.wheels(),
                format!("{}/{}", format_cents(vehicle.rate_cents), vehicle.basis.unit()),
                if vehicle.available { "available" } else { "rented" },
            );
        }
        return Ok(());
    }

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let exporter = Exporter::new(service);
    let count = match format {
        "json" => exporter.export_vehicles_json(writer, all)?,
        "csv" => exporter.export_vehicles_csv(writer, all)?,
        _ => anyhow::bail!(
            "Invalid format '{}'. Valid formats: table, json, csv",
            format
        ),
    };

    if output.is_some() {
        eprintln!("Exported {} vehicles", count);
    }
    Ok(())
}

fn run_export_rentals(service: &RentalService, path: &std::path::Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Exporter::new(service).export_rentals_csv(file)
}

fn run_quote_command(service: &RentalService, vehicle_id: &str, usage: &str) -> Result<()> {
    let basis = service
        .catalog()
        .get(vehicle_id)
        .map(|v| v.basis)
        .unwrap_or(RateBasis::Day);
    let usage = Usage::parse(basis, usage)?;

    let quote = service.quote(&RentalRequest::new(vehicle_id, "", usage))?;
    let rate_cents = service
        .catalog()
        .get(vehicle_id)
        .map(|v| v.rate_cents)
        .unwrap_or_default();

    println!(
        "{} {} {}: {} x {}/{} = {}",
        quote.request.vehicle_id,
        quote.brand,
        quote.model,
        quote.request.usage,
        format_cents(rate_cents),
        basis.unit(),
        format_cents(quote.price_cents)
    );
    Ok(())
}

/// Truncate a string to a maximum display length
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_service_from_builtin_fleet() {
        let cli = Cli::parse_from(["rentdesk", "--fleet", "metered", "vehicles"]);
        let service = cli.build_service().unwrap();
        assert_eq!(service.catalog().len(), 4);
        assert_eq!(service.config().registration, CustomerRegistration::OnConfirm);
    }

    #[test]
    fn test_strict_registration_flag() {
        let cli = Cli::parse_from(["rentdesk", "desk", "--strict-registration"]);
        let service = cli.build_service().unwrap();
        assert_eq!(service.config().registration, CustomerRegistration::OnAttempt);
    }

    #[test]
    fn test_unknown_fleet_is_rejected() {
        let cli = Cli::parse_from(["rentdesk", "--fleet", "hourly", "vehicles"]);
        assert!(cli.build_service().is_err());
    }

    #[test]
    fn test_desk_export_rentals_writes_open_rentals() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rentals.csv");
        let cli = Cli::parse_from([
            "rentdesk",
            "desk",
            "--export-rentals",
            path.to_str().unwrap(),
        ]);
        let Commands::Desk { export_rentals } = &cli.command else {
            panic!("expected the desk command");
        };
        assert_eq!(export_rentals.as_deref(), Some(path.as_path()));

        let mut service = cli.build_service().unwrap();
        run_desk(&mut service, "1\nAlice\nC002\n2\ny\n6\n".as_bytes(), Vec::<u8>::new()).unwrap();

        assert_eq!(run_export_rentals(&service, &path).unwrap(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("rental_id,vehicle_id,vehicle,"));
        assert!(text.contains(",C002,Honda Accord,CUS1,Alice,2 days,140.00,"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Camry", 12), "Camry");
        assert_eq!(truncate("Ambassador Classic", 12), "Ambassado...");
    }
}
