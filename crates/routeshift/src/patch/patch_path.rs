use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PatchError;

/// A JSON Pointer where array elements may be addressed by identifier with
/// `[id=<id>]` segments, e.g. `/vehicles/[id=V1]/shifts/[id=V1-S1]/itinerary`.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PatchPath(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Array element whose `id` equals the value.
    Id(String),
    /// Object member, array index, or `-` for the end of an array.
    Key(String),
}

impl PatchPath {
    pub fn vehicle(vehicle_id: &str) -> Self {
        PatchPath(String::new()).key("vehicles").id(vehicle_id)
    }

    pub fn shift(self, shift_id: &str) -> Self {
        self.key("shifts").id(shift_id)
    }

    pub fn key(mut self, key: &str) -> Self {
        self.0.push('/');
        self.0.push_str(&escape(key));
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.0.push_str("/[id=");
        self.0.push_str(&escape(id));
        self.0.push(']');
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> Result<Vec<PathSegment>, PatchError> {
        let Some(rest) = self.0.strip_prefix('/') else {
            return Err(PatchError::InvalidPath(self.0.clone()));
        };

        Ok(rest
            .split('/')
            .map(|raw| match raw.strip_prefix("[id=").and_then(|s| s.strip_suffix(']')) {
                Some(id) => PathSegment::Id(unescape(id)),
                None => PathSegment::Key(unescape(raw)),
            })
            .collect())
    }

    /// Whether the path points at, or inside, the given shift.
    pub fn targets_shift(&self, vehicle_id: &str, shift_id: &str) -> bool {
        let shift_path = PatchPath::vehicle(vehicle_id).shift(shift_id);
        self.0 == shift_path.0
            || self
                .0
                .strip_prefix(shift_path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for PatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatchPath {
    fn from(value: &str) -> Self {
        PatchPath(value.to_owned())
    }
}

fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
