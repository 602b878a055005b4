use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{json::output::JsonRoutePlanOutput, patch::patch_operation::PatchOperation};

/// Request body of a patch resubmission.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "PatchPayload")]
pub struct JsonPatchPayload {
    pub config: JsonPatchConfig,
    pub patch: Vec<PatchOperation>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "PatchConfig")]
pub struct JsonPatchConfig {
    pub run: JsonRunConfig,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "RunConfig")]
pub struct JsonRunConfig {
    pub name: String,
}

impl JsonPatchPayload {
    pub fn new(name: impl Into<String>, patch: Vec<PatchOperation>) -> Self {
        JsonPatchPayload {
            config: JsonPatchConfig {
                run: JsonRunConfig { name: name.into() },
            },
            patch,
        }
    }
}

pub fn default_run_name(output: &JsonRoutePlanOutput, now: Timestamp) -> String {
    format!("{} refined {}", output.display_name(), now.strftime("%Y-%m-%dT%H:%M:%SZ"))
}
