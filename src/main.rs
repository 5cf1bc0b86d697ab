use anyhow::Result;
use clap::Parser;
use rentdesk::cli::Cli;
use rentdesk::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    cli.run()
}
