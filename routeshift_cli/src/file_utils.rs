use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
#[error("Input file {0} does not exist")]
pub struct MissingInputError(pub PathBuf);

pub fn ensure_exists(path: &Path) -> Result<(), MissingInputError> {
    if path.exists() {
        Ok(())
    } else {
        Err(MissingInputError(path.to_path_buf()))
    }
}

pub fn read_folder(folder_path: &PathBuf) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.insert(0, path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

pub fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

/// `<folder>/<stem>.<suffix>.json` next to `input`.
pub fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{stem}.{suffix}.json"))
}
