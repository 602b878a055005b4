use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Args;
use routeshift::{
    json::{
        document::{read_json, write_json},
        input::JsonInputDocument,
        location::JsonLocation,
        shift_time::JsonShiftTime,
    },
    transform::add_missing_vehicles::{SyntheticVehicle, add_missing_vehicles},
};
use tracing::info;

use crate::{
    config::Config,
    file_utils::{ensure_exists, sibling_path},
    parsers,
};

#[derive(Args)]
pub struct AddMissingVehiclesArgs {
    input: PathBuf,

    /// Depot of the new vehicles as "lat,lng"
    #[arg(long, value_parser = parsers::parse_location)]
    depot: Option<JsonLocation>,

    /// Start of the new shifts (e.g. "2027-02-01T08:00:00Z")
    #[arg(long, value_parser = parsers::parse_shift_time)]
    shift_start: Option<JsonShiftTime>,

    /// End of the new shifts
    #[arg(long, value_parser = parsers::parse_shift_time)]
    shift_end: Option<JsonShiftTime>,

    /// Output file (defaults to <input>.with-vehicles.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: AddMissingVehiclesArgs, config: &Config) -> Result<(), anyhow::Error> {
    ensure_exists(&args.input)?;

    let mut document: JsonInputDocument = read_json(&args.input)?;
    let defaults = synthetic_vehicle(&args, config, &document)?;

    let created = add_missing_vehicles(document.model_input_mut(), &defaults);

    let out = args
        .output
        .unwrap_or_else(|| sibling_path(&args.input, "with-vehicles"));
    write_json(&out, &document)?;

    if created.is_empty() {
        info!("No missing vehicles, wrote {}", out.display());
    } else {
        info!(
            "Added {} vehicles at depot {}: {}",
            created.len(),
            defaults.depot,
            created.join(", ")
        );
    }

    Ok(())
}

fn synthetic_vehicle(
    args: &AddMissingVehiclesArgs,
    config: &Config,
    document: &JsonInputDocument,
) -> Result<SyntheticVehicle, anyhow::Error> {
    let inferred = SyntheticVehicle::infer(document.model_input());

    let depot = match &args.depot {
        Some(depot) => depot.clone(),
        None => config
            .depot()?
            .or_else(|| inferred.as_ref().map(|inferred| inferred.depot.clone()))
            .ok_or_else(|| anyhow!("No depot given and none found in {}", args.input.display()))?,
    };

    let shift_start = args
        .shift_start
        .clone()
        .or_else(|| inferred.as_ref().and_then(|inferred| inferred.shift_start.clone()));
    let shift_end = args
        .shift_end
        .clone()
        .or_else(|| inferred.as_ref().and_then(|inferred| inferred.shift_end.clone()));

    if let (Some(start), Some(end)) = (&shift_start, &shift_end) {
        if end.timestamp()? < start.timestamp()? {
            bail!("Shift window ends ({end}) before it starts ({start})");
        }
    }

    Ok(SyntheticVehicle {
        depot,
        shift_start,
        shift_end,
    })
}
