use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::DocumentError;

pub fn read_json<T, P>(path: P) -> Result<T, DocumentError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("Reading {}", path.display());

    let file = File::open(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` as pretty-printed JSON, creating parent folders as needed.
pub fn write_json<T, P>(path: P, value: &T) -> Result<(), DocumentError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("Writing {}", path.display());

    let write_error = |source: std::io::Error| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::with_capacity(64 * 1024, file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|err| {
        if err.is_io() {
            write_error(err.into())
        } else {
            DocumentError::Serialize(err)
        }
    })?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    Ok(())
}
