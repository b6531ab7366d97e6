use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use parktrips::config::PlannerConfig;
use parktrips::{GoogleMapsClient, PlannerError, TripPlanner, logging, site, web};

#[derive(Debug, Parser)]
#[command(
    name = "parktrips",
    version,
    about = "Plan road trips to California state parks"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Geocode parks, fetch drive times, write the map and trip report (default)
    Plan,
    /// Build the static site from the cached park data
    Site,
    /// Build the static site and serve the output directory
    Serve {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // a missing .env is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match PlannerConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            print_error(&err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logging::init(&config.logging, cli.verbose) {
        eprintln!("ERROR: {err:#}");
        return ExitCode::FAILURE;
    }

    let command = cli.command.unwrap_or(Command::Plan);
    match run(command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &PlannerConfig) -> Result<()> {
    match command {
        Command::Plan => {
            config.validate_api_keys()?;
            let client = GoogleMapsClient::new(&config.google)?;

            println!("California State Parks Trip Planner");
            println!("{}", "=".repeat(40));

            let outcome = TripPlanner::new(config, &client, &client).run().await?;
            println!("\n{}", outcome.report);
            println!("\nReport saved to: {}", config.paths.report_file.display());
            println!(
                "\nDone! Open {} in your browser to view the map.",
                config.paths.map_file.display()
            );
        }
        Command::Site => {
            site::generate_site(&config.paths, &config.site.firebase, &config.home)?;
            println!("\nGenerated: {}", config.paths.site_file.display());
        }
        Command::Serve { port } => {
            site::generate_site(&config.paths, &config.site.firebase, &config.home)?;
            let port = port.unwrap_or(config.server.port);
            web::run(config.paths.output_dir.clone(), &config.paths.site_file, port).await?;
        }
    }
    Ok(())
}

fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<PlannerError>() {
        Some(planner_error) => eprintln!("ERROR: {}", planner_error.user_message()),
        None => eprintln!("ERROR: {err:#}"),
    }
}
