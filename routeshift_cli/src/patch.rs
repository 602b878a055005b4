use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use jiff::Timestamp;
use routeshift::{
    json::{
        document::{read_json, write_json},
        input::JsonInputDocument,
        output::JsonRoutePlanOutput,
        payload::{JsonPatchPayload, default_run_name},
    },
    patch::{build_patch::build_patch, patch_operation::PatchOperation},
};
use tracing::{error, info};

use crate::{
    config::Config,
    file_utils::{ensure_exists, sibling_path},
};

#[derive(Args)]
pub struct PatchArgs {
    /// The solved output to derive the patch from
    output_document: PathBuf,

    /// The input the output was solved from
    #[arg(short, long)]
    input: PathBuf,

    /// Payload file (defaults to <output>.patch.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run name of the resubmission
    #[arg(long)]
    name: Option<String>,

    /// Leave shifts without assigned visits out of the patch
    #[arg(long)]
    remove_empty_shifts: bool,

    /// End every patched shift at its start location
    #[arg(long)]
    end_shifts_at_depot: bool,

    /// Write the error report of a failed run to this file
    #[arg(long)]
    error_log: Option<PathBuf>,

    /// Print the patch operations as a table
    #[arg(long)]
    summary: bool,
}

pub fn run(args: PatchArgs, config: &Config) -> Result<(), anyhow::Error> {
    let error_log = args.error_log.clone().or_else(|| config.error_log.clone());

    let result = create_payload(args);

    if let (Err(err), Some(error_log)) = (&result, error_log) {
        if let Err(log_err) = write_error_log(&error_log, err) {
            error!("Failed to write {}: {log_err}", error_log.display());
        } else {
            error!("Patch failed, see {}", error_log.display());
        }
    }

    result
}

fn create_payload(args: PatchArgs) -> Result<(), anyhow::Error> {
    ensure_exists(&args.output_document)?;
    ensure_exists(&args.input)?;

    let output: JsonRoutePlanOutput = read_json(&args.output_document)?;
    let input: JsonInputDocument = read_json(&args.input)?;

    let patch = build_patch(
        &output,
        input.model_input(),
        args.remove_empty_shifts,
        args.end_shifts_at_depot,
    )
    .with_context(|| format!("Cannot patch {} from {}", args.input.display(), output.metadata.id))?;

    if args.summary {
        println!("{}", summary_table(&patch));
    }

    let name = args
        .name
        .unwrap_or_else(|| default_run_name(&output, Timestamp::now()));
    let out = args
        .output
        .unwrap_or_else(|| sibling_path(&args.output_document, "patch"));

    info!(
        "Patch {:?}: {} operations for {} assigned visits",
        name,
        patch.len(),
        output.assigned_visit_count()
    );

    write_json(&out, &JsonPatchPayload::new(name, patch))?;
    info!("Wrote {}", out.display());

    Ok(())
}

fn write_error_log(path: &Path, err: &anyhow::Error) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "[{}] {err:?}", Timestamp::now())
}

fn summary_table(patch: &[PatchOperation]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["op", "path", "items"]);

    for operation in patch {
        let items = operation
            .value()
            .filter(|_| operation.path().as_str().ends_with("/itinerary"))
            .and_then(|value| value.as_array())
            .map(|items| items.len().to_string())
            .unwrap_or_default();

        table.add_row(vec![
            operation.name().to_owned(),
            operation.path().to_string(),
            items,
        ]);
    }

    table
}
