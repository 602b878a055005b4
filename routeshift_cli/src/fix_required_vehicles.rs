use std::path::PathBuf;

use clap::Args;
use routeshift::{
    json::{
        document::{read_json, write_json},
        input::JsonInputDocument,
    },
    transform::remove_missing_vehicle_requirements::remove_missing_vehicle_requirements,
};
use tracing::info;

use crate::file_utils::{ensure_exists, sibling_path};

#[derive(Args)]
pub struct FixRequiredVehiclesArgs {
    input: PathBuf,

    /// Output file (defaults to <input>.fixed.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: FixRequiredVehiclesArgs) -> Result<(), anyhow::Error> {
    ensure_exists(&args.input)?;

    let mut document: JsonInputDocument = read_json(&args.input)?;
    let removal = remove_missing_vehicle_requirements(document.model_input_mut());

    let out = args
        .output
        .unwrap_or_else(|| sibling_path(&args.input, "fixed"));
    write_json(&out, &document)?;

    info!(
        "Removed requirements on {} missing vehicles ({}) from {} visits",
        removal.missing_vehicle_ids.len(),
        removal.missing_vehicle_ids.join(", "),
        removal.modified_visit_ids.len()
    );

    Ok(())
}
