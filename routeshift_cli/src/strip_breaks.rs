use std::path::{Path, PathBuf};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use routeshift::{
    json::{
        document::{read_json, write_json},
        input::JsonInputDocument,
    },
    transform::strip_break_locations::strip_break_locations,
};
use tracing::info;

use crate::file_utils::{ensure_exists, is_json, read_folder, sibling_path};

const SUFFIX: &str = "no-breaks";

#[derive(Args)]
pub struct StripBreaksArgs {
    /// Input file, or a folder of input files
    input: PathBuf,

    /// Output file, or output folder when the input is a folder
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: StripBreaksArgs) -> Result<(), anyhow::Error> {
    ensure_exists(&args.input)?;

    if args.input.is_file() {
        let out = args
            .output
            .unwrap_or_else(|| sibling_path(&args.input, SUFFIX));
        let stripped = strip_file(&args.input, &out)?;
        info!("Stripped {} break locations into {}", stripped, out.display());

        return Ok(());
    }

    let mut files = read_folder(&args.input)?;
    files.retain(|path| is_json(path) && !is_stripped(path));

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let mut total = 0;
    for path in &files {
        let out = match &args.output {
            Some(folder) => folder.join(path.strip_prefix(&args.input)?),
            None => sibling_path(path, SUFFIX),
        };

        bar.set_message(path.display().to_string());
        total += strip_file(path, &out)?;
        bar.inc(1);
    }

    bar.finish_and_clear();
    info!("Stripped {} break locations in {} files", total, files.len());

    Ok(())
}

fn strip_file(input: &Path, out: &Path) -> Result<usize, anyhow::Error> {
    let mut document: JsonInputDocument = read_json(input)?;
    let stripped = strip_break_locations(document.model_input_mut());
    write_json(out, &document)?;

    Ok(stripped)
}

fn is_stripped(path: &Path) -> bool {
    path.to_string_lossy()
        .ends_with(&format!(".{SUFFIX}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stripped() {
        assert!(is_stripped(Path::new("data/monday.no-breaks.json")));
        assert!(!is_stripped(Path::new("data/monday.json")));
    }

    #[test]
    fn test_strip_folder() {
        let root = std::env::temp_dir().join(format!("routeshift-{}", uuid::Uuid::new_v4()));
        let input = root.join("inputs");
        let output = root.join("outputs");
        std::fs::create_dir_all(input.join("week")).unwrap();

        let document = serde_json::json!({
            "vehicles": [{
                "id": "V1",
                "shifts": [{
                    "id": "S1",
                    "requiredBreaks": [
                        { "id": "B1", "location": [50.0, 4.0] },
                        { "id": "B2" },
                    ],
                }],
            }],
            "visits": [],
        });
        write_json(input.join("monday.json"), &document).unwrap();
        write_json(input.join("week/tuesday.json"), &document).unwrap();

        run(StripBreaksArgs {
            input: input.clone(),
            output: Some(output.clone()),
        })
        .unwrap();

        for file in ["monday.json", "week/tuesday.json"] {
            let stripped: serde_json::Value = read_json(output.join(file)).unwrap();
            assert!(
                stripped["vehicles"][0]["shifts"][0]["requiredBreaks"][0]
                    .get("location")
                    .is_none()
            );
        }

        std::fs::remove_dir_all(root).unwrap();
    }
}
