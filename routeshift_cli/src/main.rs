use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tracing::error;

use crate::{
    add_missing_vehicles::AddMissingVehiclesArgs, apply::ApplyArgs,
    clone_vehicles::CloneVehiclesArgs, config::Config, file_utils::MissingInputError,
    fix_required_vehicles::FixRequiredVehiclesArgs, generate::GenerateSubcommands,
    patch::PatchArgs, strip_breaks::StripBreaksArgs,
};

mod add_missing_vehicles;
mod apply;
mod clone_vehicles;
mod config;
mod file_utils;
mod fix_required_vehicles;
mod generate;
mod parsers;
mod patch;
mod strip_breaks;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a patch payload that carries a solved output back into its input
    Patch {
        #[command(flatten)]
        args: PatchArgs,
    },
    /// Apply the operations of a patch payload to an input
    Apply {
        #[command(flatten)]
        args: ApplyArgs,
    },
    /// Remove the location of every required break
    StripBreaks {
        #[command(flatten)]
        args: StripBreaksArgs,
    },
    /// Add copies of a vehicle with fresh identifiers
    CloneVehicles {
        #[command(flatten)]
        args: CloneVehiclesArgs,
    },
    /// Define the vehicles referenced by visits but missing from the input
    AddMissingVehicles {
        #[command(flatten)]
        args: AddMissingVehiclesArgs,
    },
    /// Drop required vehicle references to vehicles missing from the input
    #[command(visible_alias = "fix-required-vehicles")]
    RemoveMissingVehicleRequirements {
        #[command(flatten)]
        args: FixRequiredVehiclesArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<ExitCode, anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = Config::from_env();

    let result = match cli.command {
        Commands::Patch { args } => patch::run(args, &config),
        Commands::Apply { args } => apply::run(args),
        Commands::StripBreaks { args } => strip_breaks::run(args),
        Commands::CloneVehicles { args } => clone_vehicles::run(args),
        Commands::AddMissingVehicles { args } => add_missing_vehicles::run(args, &config),
        Commands::RemoveMissingVehicleRequirements { args } => fix_required_vehicles::run(args),
        Commands::Generate { commands } => generate::run(commands),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is::<MissingInputError>() => {
            error!("{err}");
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err),
    }
}
