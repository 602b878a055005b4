use fxhash::FxHashSet;
use tracing::{debug, instrument};

use crate::json::input::JsonRoutePlanInput;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequirementRemoval {
    /// Referenced vehicle ids that the input does not define.
    pub missing_vehicle_ids: Vec<String>,
    pub modified_visit_ids: Vec<String>,
}

/// Drops `requiredVehicles` references to vehicles the input does not define.
/// Visits left without any required vehicle lose the field entirely. Visits
/// that only reference defined vehicles are not touched.
#[instrument(skip_all, level = "debug")]
pub fn remove_missing_vehicle_requirements(input: &mut JsonRoutePlanInput) -> RequirementRemoval {
    let missing_vehicle_ids = input.missing_vehicle_ids();
    let missing = missing_vehicle_ids
        .iter()
        .map(String::as_str)
        .collect::<FxHashSet<_>>();

    let mut modified_visit_ids = Vec::new();

    for visit in input.all_visits_mut() {
        let Some(required_vehicles) = visit.required_vehicles.as_mut() else {
            continue;
        };

        let before = required_vehicles.len();
        required_vehicles.retain(|id| !missing.contains(id.as_str()));

        if required_vehicles.len() == before {
            continue;
        }

        if required_vehicles.is_empty() {
            visit.required_vehicles = None;
        }

        debug!(visit = %visit.id, "Removed missing vehicle requirements");
        modified_visit_ids.push(visit.id.clone());
    }

    RequirementRemoval {
        missing_vehicle_ids,
        modified_visit_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::input_fixture;

    #[test]
    fn test_remove_missing_vehicle_requirements() {
        let mut input = input_fixture();
        let removal = remove_missing_vehicle_requirements(&mut input);

        assert_eq!(removal.missing_vehicle_ids, vec!["V3", "V4"]);
        assert_eq!(removal.modified_visit_ids, vec!["D", "E", "F"]);

        assert_eq!(input.visits[3].required_vehicles, None);
        assert_eq!(
            input.visits[4].required_vehicles,
            Some(vec![String::from("V1")])
        );
        assert_eq!(input.visit_groups()[0].visits[0].required_vehicles, None);
        assert!(input.missing_vehicle_ids().is_empty());
    }

    #[test]
    fn test_untouched_visits_are_identical() {
        let original = input_fixture();
        let mut input = original.clone();
        let removal = remove_missing_vehicle_requirements(&mut input);

        for (before, after) in original.all_visits().zip(input.all_visits()) {
            if removal.modified_visit_ids.contains(&before.id) {
                continue;
            }

            assert_eq!(
                serde_json::to_string(before).unwrap(),
                serde_json::to_string(after).unwrap()
            );
        }
        assert_eq!(original.vehicles, input.vehicles);
    }

    #[test]
    fn test_nothing_missing() {
        let mut input = input_fixture();
        remove_missing_vehicle_requirements(&mut input);

        let again = input.clone();
        let removal = remove_missing_vehicle_requirements(&mut input);

        assert_eq!(removal, RequirementRemoval::default());
        assert_eq!(input, again);
    }
}
