use std::path::PathBuf;

use clap::Args;
use routeshift::{
    json::{
        document::{read_json, write_json},
        payload::JsonPatchPayload,
    },
    patch::apply_patch::apply_patch,
};
use serde_json::Value;
use tracing::info;

use crate::file_utils::{ensure_exists, sibling_path};

#[derive(Args)]
pub struct ApplyArgs {
    /// The input to patch
    input: PathBuf,

    /// Patch payload produced by `patch`
    #[arg(short, long)]
    payload: PathBuf,

    /// Patched input (defaults to <input>.patched.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ApplyArgs) -> Result<(), anyhow::Error> {
    ensure_exists(&args.input)?;
    ensure_exists(&args.payload)?;

    let mut document: Value = read_json(&args.input)?;
    let payload: JsonPatchPayload = read_json(&args.payload)?;

    if document.get("modelInput").is_some() {
        apply_patch(&mut document["modelInput"], &payload.patch)?;
    } else {
        apply_patch(&mut document, &payload.patch)?;
    }

    let out = args
        .output
        .unwrap_or_else(|| sibling_path(&args.input, "patched"));
    write_json(&out, &document)?;

    info!(
        "Applied {} operations of {:?} to {}",
        payload.patch.len(),
        payload.config.run.name,
        out.display()
    );

    Ok(())
}
