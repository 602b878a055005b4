use tracing::{debug, instrument};

use crate::{
    error::PatchError,
    json::{
        input::{JsonItineraryItem, JsonRoutePlanInput, JsonShift},
        output::{JsonRoutePlanOutput, JsonShiftRoute},
    },
    patch::{patch_operation::PatchOperation, patch_path::PatchPath},
};

/// Derives the edits that carry the assignments of a solved `output` back
/// into the `input` it was solved from.
///
/// For every shift of the output, the solved itinerary is written to the
/// input shift when it differs from the one already there. With
/// `remove_empty_shifts`, shifts without any assigned visit produce no
/// operation at all. With `end_shifts_at_depot`, shifts are made to end at
/// their start location instead of the last visited stop.
#[instrument(skip_all, level = "debug")]
pub fn build_patch(
    output: &JsonRoutePlanOutput,
    input: &JsonRoutePlanInput,
    remove_empty_shifts: bool,
    end_shifts_at_depot: bool,
) -> Result<Vec<PatchOperation>, PatchError> {
    let mut operations = Vec::new();

    for vehicle_route in &output.model_output.vehicles {
        let vehicle = input
            .vehicle(&vehicle_route.id)
            .ok_or_else(|| PatchError::UnknownVehicle(vehicle_route.id.clone()))?;

        for shift_route in &vehicle_route.shifts {
            let shift = vehicle
                .shift(&shift_route.id)
                .ok_or_else(|| PatchError::UnknownShift {
                    vehicle_id: vehicle.id.clone(),
                    shift_id: shift_route.id.clone(),
                })?;

            if remove_empty_shifts && shift_route.is_empty() {
                debug!(vehicle = %vehicle.id, shift = %shift.id, "Skipping empty shift");
                continue;
            }

            let shift_path = PatchPath::vehicle(&vehicle.id).shift(&shift.id);

            if let Some(operation) = itinerary_operation(&shift_path, shift, shift_route)? {
                operations.push(operation);
            }

            if end_shifts_at_depot {
                if let Some(operation) = end_location_operation(&shift_path, shift)? {
                    operations.push(operation);
                }
            }
        }
    }

    debug!("Built {} patch operations", operations.len());

    Ok(operations)
}

fn itinerary_operation(
    shift_path: &PatchPath,
    shift: &JsonShift,
    shift_route: &JsonShiftRoute,
) -> Result<Option<PatchOperation>, PatchError> {
    let solved = shift_route
        .itinerary
        .iter()
        .map(JsonItineraryItem::to_assignment)
        .collect::<Vec<_>>();

    if same_assignments(shift.itinerary(), &solved) {
        return Ok(None);
    }

    Ok(Some(PatchOperation::Add {
        path: shift_path.clone().key("itinerary"),
        value: serde_json::to_value(&solved)?,
    }))
}

fn end_location_operation(
    shift_path: &PatchPath,
    shift: &JsonShift,
) -> Result<Option<PatchOperation>, PatchError> {
    let Some(depot) = &shift.start_location else {
        return Ok(None);
    };

    let path = shift_path.clone().key("endLocation");
    let value = serde_json::to_value(depot)?;

    Ok(match &shift.end_location {
        Some(end_location) if end_location == depot => None,
        Some(_) => Some(PatchOperation::Replace { path, value }),
        // No end location means the shift ends at its last stop.
        None => Some(PatchOperation::Add { path, value }),
    })
}

fn same_assignments(current: &[JsonItineraryItem], solved: &[JsonItineraryItem]) -> bool {
    current.len() == solved.len()
        && current
            .iter()
            .zip(solved)
            .all(|(a, b)| a.id == b.id && a.kind == b.kind)
}
