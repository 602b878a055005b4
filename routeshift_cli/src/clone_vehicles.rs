use std::path::PathBuf;

use clap::Args;
use routeshift::{
    json::{
        document::{read_json, write_json},
        input::JsonInputDocument,
    },
    transform::clone_vehicles::clone_vehicles,
};
use tracing::info;

use crate::file_utils::{ensure_exists, sibling_path};

#[derive(Args)]
pub struct CloneVehiclesArgs {
    input: PathBuf,

    /// Id of the vehicle to copy
    #[arg(short, long)]
    template: String,

    /// Number of copies
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Output file (defaults to <input>.more-vehicles.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: CloneVehiclesArgs) -> Result<(), anyhow::Error> {
    ensure_exists(&args.input)?;

    let mut document: JsonInputDocument = read_json(&args.input)?;
    let before = document.model_input().vehicles.len();
    let created = clone_vehicles(document.model_input_mut(), &args.template, args.count)?;

    let out = args
        .output
        .unwrap_or_else(|| sibling_path(&args.input, "more-vehicles"));
    write_json(&out, &document)?;

    info!(
        "Cloned {} {} times ({} -> {} vehicles): {}",
        args.template,
        created.len(),
        before,
        document.model_input().vehicles.len(),
        created.join(", ")
    );

    Ok(())
}
