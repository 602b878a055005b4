use schemars::schema_for;

use crate::json::{input, payload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Input,
    Payload,
}

pub fn generate_json_schema(kind: SchemaKind) -> Result<String, serde_json::Error> {
    match kind {
        SchemaKind::Input => serde_json::to_string_pretty(&schema_for!(input::JsonInputDocument)),
        SchemaKind::Payload => {
            serde_json::to_string_pretty(&schema_for!(payload::JsonPatchPayload))
        }
    }
}
