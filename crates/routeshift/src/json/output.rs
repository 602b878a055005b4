use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json::input::JsonItineraryItem;

/// A solved route plan returned by the routing service.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "RoutePlanOutput")]
pub struct JsonRoutePlanOutput {
    pub metadata: JsonMetadata,
    pub model_output: JsonModelOutput,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonRoutePlanOutput {
    /// Name of the run when the service reported one, its id otherwise.
    pub fn display_name(&self) -> &str {
        self.metadata
            .name
            .as_deref()
            .unwrap_or(self.metadata.id.as_str())
    }

    pub fn assigned_visit_count(&self) -> usize {
        self.model_output
            .vehicles
            .iter()
            .flat_map(|vehicle| vehicle.shifts.iter())
            .map(JsonShiftRoute::visit_count)
            .sum()
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "Metadata")]
pub struct JsonMetadata {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "ModelOutput")]
pub struct JsonModelOutput {
    #[serde(default)]
    pub vehicles: Vec<JsonVehicleRoute>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "VehicleRoute")]
pub struct JsonVehicleRoute {
    pub id: String,
    #[serde(default)]
    pub shifts: Vec<JsonShiftRoute>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "ShiftRoute")]
pub struct JsonShiftRoute {
    pub id: String,
    #[serde(default)]
    pub itinerary: Vec<JsonItineraryItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonShiftRoute {
    pub fn visit_count(&self) -> usize {
        self.itinerary.iter().filter(|item| item.is_visit()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.visit_count() == 0
    }
}
