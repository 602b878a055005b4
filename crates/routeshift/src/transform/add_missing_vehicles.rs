use serde_json::Map;
use tracing::{debug, instrument};

use crate::json::{
    input::{JsonRoutePlanInput, JsonShift, JsonVehicle},
    location::JsonLocation,
    shift_time::JsonShiftTime,
};

/// Defaults for vehicles created to satisfy dangling references.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticVehicle {
    pub depot: JsonLocation,
    pub shift_start: Option<JsonShiftTime>,
    pub shift_end: Option<JsonShiftTime>,
}

impl SyntheticVehicle {
    pub fn new(depot: JsonLocation) -> Self {
        SyntheticVehicle {
            depot,
            shift_start: None,
            shift_end: None,
        }
    }

    /// Uses the depot and time window of the first shift that has a start
    /// location.
    pub fn infer(input: &JsonRoutePlanInput) -> Option<Self> {
        let shift = input
            .shifts()
            .find(|shift| shift.start_location.is_some())?;

        Some(SyntheticVehicle {
            depot: shift.start_location.clone()?,
            shift_start: shift.min_start_time.clone(),
            shift_end: shift.max_end_time.clone(),
        })
    }

    pub fn build(&self, vehicle_id: &str) -> JsonVehicle {
        JsonVehicle {
            id: vehicle_id.to_owned(),
            shifts: vec![JsonShift {
                id: format!("{vehicle_id}-shift-1"),
                start_location: Some(self.depot.clone()),
                end_location: Some(self.depot.clone()),
                min_start_time: self.shift_start.clone(),
                max_end_time: self.shift_end.clone(),
                skills: Some(Vec::new()),
                required_breaks: Some(Vec::new()),
                itinerary: None,
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }
}

/// Appends a single-shift vehicle for every vehicle id referenced by a visit
/// but not defined, and returns the created ids.
#[instrument(skip_all, level = "debug")]
pub fn add_missing_vehicles(
    input: &mut JsonRoutePlanInput,
    defaults: &SyntheticVehicle,
) -> Vec<String> {
    let missing_vehicle_ids = input.missing_vehicle_ids();

    for vehicle_id in &missing_vehicle_ids {
        debug!(vehicle = %vehicle_id, "Adding synthetic vehicle");
        input.vehicles.push(defaults.build(vehicle_id));
    }

    missing_vehicle_ids
}
