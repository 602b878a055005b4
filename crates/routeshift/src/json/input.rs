use fxhash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

use crate::json::{location::JsonLocation, shift_time::JsonShiftTime};

const MODEL_INPUT_KEY: &str = "modelInput";

/// An input as stored on disk: either the bare model input or the request
/// envelope the service accepts, with the model under `modelInput`.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(untagged, rename = "InputDocument")]
pub enum JsonInputDocument {
    Request(JsonRoutePlanRequest),
    ModelInput(JsonRoutePlanInput),
}

// The bare input accepts any object, so the shape is decided by the
// `modelInput` key and errors inside the envelope are not swallowed.
impl<'de> Deserialize<'de> for JsonInputDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        let document = if value.get(MODEL_INPUT_KEY).is_some() {
            serde_json::from_value(value).map(JsonInputDocument::Request)
        } else {
            serde_json::from_value(value).map(JsonInputDocument::ModelInput)
        };

        document.map_err(de::Error::custom)
    }
}

impl JsonInputDocument {
    pub fn model_input(&self) -> &JsonRoutePlanInput {
        match self {
            JsonInputDocument::Request(request) => &request.model_input,
            JsonInputDocument::ModelInput(input) => input,
        }
    }

    pub fn model_input_mut(&mut self) -> &mut JsonRoutePlanInput {
        match self {
            JsonInputDocument::Request(request) => &mut request.model_input,
            JsonInputDocument::ModelInput(input) => input,
        }
    }

    pub fn into_model_input(self) -> JsonRoutePlanInput {
        match self {
            JsonInputDocument::Request(request) => request.model_input,
            JsonInputDocument::ModelInput(input) => input,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "RoutePlanRequest")]
pub struct JsonRoutePlanRequest {
    pub model_input: JsonRoutePlanInput,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", rename = "RoutePlanInput")]
pub struct JsonRoutePlanInput {
    #[serde(default)]
    pub vehicles: Vec<JsonVehicle>,
    #[serde(default)]
    pub visits: Vec<JsonVisit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_groups: Option<Vec<JsonVisitGroup>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonRoutePlanInput {
    pub fn visit_groups(&self) -> &[JsonVisitGroup] {
        self.visit_groups.as_deref().unwrap_or_default()
    }

    pub fn vehicle(&self, id: &str) -> Option<&JsonVehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn vehicle_ids(&self) -> FxHashSet<&str> {
        self.vehicles
            .iter()
            .map(|vehicle| vehicle.id.as_str())
            .collect()
    }

    /// Top-level visits followed by the visits nested in visit groups.
    pub fn all_visits(&self) -> impl Iterator<Item = &JsonVisit> {
        self.visits
            .iter()
            .chain(self.visit_groups().iter().flat_map(|group| group.visits.iter()))
    }

    pub fn all_visits_mut(&mut self) -> impl Iterator<Item = &mut JsonVisit> {
        self.visits.iter_mut().chain(
            self.visit_groups
                .iter_mut()
                .flatten()
                .flat_map(|group| group.visits.iter_mut()),
        )
    }

    pub fn shifts(&self) -> impl Iterator<Item = &JsonShift> {
        self.vehicles
            .iter()
            .flat_map(|vehicle| vehicle.shifts.iter())
    }

    pub fn shifts_mut(&mut self) -> impl Iterator<Item = &mut JsonShift> {
        self.vehicles
            .iter_mut()
            .flat_map(|vehicle| vehicle.shifts.iter_mut())
    }

    /// Vehicle ids named in `requiredVehicles` but absent from `vehicles`,
    /// in order of first reference.
    pub fn missing_vehicle_ids(&self) -> Vec<String> {
        let defined = self.vehicle_ids();
        let mut seen = FxHashSet::default();

        self.all_visits()
            .flat_map(|visit| visit.required_vehicles.iter().flatten())
            .filter(|id| !defined.contains(id.as_str()))
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "Vehicle")]
pub struct JsonVehicle {
    pub id: String,
    #[serde(default)]
    pub shifts: Vec<JsonShift>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonVehicle {
    pub fn shift(&self, id: &str) -> Option<&JsonShift> {
        self.shifts.iter().find(|shift| shift.id == id)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "Shift")]
pub struct JsonShift {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location: Option<JsonLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_location: Option<JsonLocation>,
    #[serde(alias = "start", skip_serializing_if = "Option::is_none")]
    pub min_start_time: Option<JsonShiftTime>,
    #[serde(alias = "end", skip_serializing_if = "Option::is_none")]
    pub max_end_time: Option<JsonShiftTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<JsonSkill>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_breaks: Option<Vec<JsonBreak>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Vec<JsonItineraryItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonShift {
    pub fn required_breaks(&self) -> &[JsonBreak] {
        self.required_breaks.as_deref().unwrap_or_default()
    }

    pub fn itinerary(&self) -> &[JsonItineraryItem] {
        self.itinerary.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Skill")]
pub struct JsonSkill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "RequiredBreak")]
pub struct JsonBreak {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<JsonLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "Visit")]
pub struct JsonVisit {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<JsonLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_vehicles: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "VisitGroup")]
pub struct JsonVisitGroup {
    pub id: String,
    #[serde(default)]
    pub visits: Vec<JsonVisit>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", rename = "ItineraryKind")]
pub enum JsonItineraryKind {
    Visit,
    Break,
}

/// One stop of a shift itinerary. Solved outputs carry timing fields in
/// `extra`; inputs only need `id` and `kind`.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", rename = "ItineraryItem")]
pub struct JsonItineraryItem {
    pub id: String,
    pub kind: JsonItineraryKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsonItineraryItem {
    pub fn new(id: impl Into<String>, kind: JsonItineraryKind) -> Self {
        JsonItineraryItem {
            id: id.into(),
            kind,
            extra: Map::new(),
        }
    }

    /// Drops timing and metric fields, keeping what an input itinerary needs.
    pub fn to_assignment(&self) -> Self {
        JsonItineraryItem::new(self.id.clone(), self.kind)
    }

    pub fn is_visit(&self) -> bool {
        self.kind == JsonItineraryKind::Visit
    }
}
