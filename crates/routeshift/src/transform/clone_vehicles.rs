use fxhash::FxHashSet;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    error::TransformError,
    json::input::{JsonRoutePlanInput, JsonVehicle},
};

/// Appends `count` copies of the vehicle `template_id` with fresh vehicle,
/// shift and break ids, and returns the new vehicle ids. Visits are never
/// touched.
#[instrument(skip(input), level = "debug")]
pub fn clone_vehicles(
    input: &mut JsonRoutePlanInput,
    template_id: &str,
    count: usize,
) -> Result<Vec<String>, TransformError> {
    let template = input
        .vehicle(template_id)
        .cloned()
        .ok_or_else(|| TransformError::UnknownVehicle(template_id.to_owned()))?;

    let mut taken = input
        .vehicles
        .iter()
        .map(|vehicle| vehicle.id.clone())
        .collect::<FxHashSet<_>>();
    let mut created = Vec::with_capacity(count);

    while created.len() < count {
        let vehicle_id = format!("{}-{}", template.id, &Uuid::new_v4().simple().to_string()[..8]);
        if !taken.insert(vehicle_id.clone()) {
            continue;
        }

        debug!(vehicle = %vehicle_id, "Cloned vehicle");
        input.vehicles.push(clone_vehicle(&template, &vehicle_id));
        created.push(vehicle_id);
    }

    Ok(created)
}

fn clone_vehicle(template: &JsonVehicle, vehicle_id: &str) -> JsonVehicle {
    let mut vehicle = template.clone();
    vehicle.id = vehicle_id.to_owned();

    for (shift_index, shift) in vehicle.shifts.iter_mut().enumerate() {
        shift.id = format!("{vehicle_id}-shift-{}", shift_index + 1);
        // Assignments belong to the template.
        shift.itinerary = None;

        for (break_index, required_break) in
            shift.required_breaks.iter_mut().flatten().enumerate()
        {
            required_break.id = format!("{}-break-{}", shift.id, break_index + 1);
        }
    }

    vehicle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::input_fixture;

    #[test]
    fn test_clone_vehicles() {
        let mut input = input_fixture();
        let original = input.clone();

        let created = clone_vehicles(&mut input, "V2", 3).unwrap();

        assert_eq!(created.len(), 3);
        assert_eq!(input.vehicles.len(), original.vehicles.len() + 3);
        assert_eq!(input.visits, original.visits);
        assert_eq!(input.visit_groups, original.visit_groups);
        assert_eq!(input.vehicles[..2], original.vehicles[..]);

        let ids = input.vehicle_ids();
        assert_eq!(ids.len(), input.vehicles.len());

        for vehicle_id in &created {
            assert!(vehicle_id.starts_with("V2-"));

            let vehicle = input.vehicle(vehicle_id).unwrap();
            let shift = &vehicle.shifts[0];
            assert_eq!(shift.id, format!("{vehicle_id}-shift-1"));
            assert_eq!(shift.itinerary, None);
            assert_eq!(shift.start_location, original.vehicles[1].shifts[0].start_location);
            assert_eq!(shift.required_breaks()[0].id, format!("{vehicle_id}-shift-1-break-1"));
            assert_eq!(
                shift.required_breaks()[0].extra,
                original.vehicles[1].shifts[0].required_breaks()[0].extra
            );
        }
    }

    #[test]
    fn test_clone_zero_vehicles() {
        let mut input = input_fixture();
        let created = clone_vehicles(&mut input, "V1", 0).unwrap();

        assert!(created.is_empty());
        assert_eq!(input, input_fixture());
    }

    #[test]
    fn test_unknown_template() {
        let mut input = input_fixture();
        let result = clone_vehicles(&mut input, "V9", 2);

        assert!(matches!(result, Err(TransformError::UnknownVehicle(id)) if id == "V9"));
        assert_eq!(input, input_fixture());
    }
}
