use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON document {path}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to serialize document")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Vehicle {0} is not defined in the input")]
    UnknownVehicle(String),
    #[error("Shift {shift_id} of vehicle {vehicle_id} is not defined in the input")]
    UnknownShift {
        vehicle_id: String,
        shift_id: String,
    },
    #[error("Invalid patch path {0}")]
    InvalidPath(String),
    #[error("Patch path {0} does not exist in the document")]
    PathNotFound(String),
    #[error("Failed to serialize patch value")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Vehicle {0} is not defined in the input")]
    UnknownVehicle(String),
}
