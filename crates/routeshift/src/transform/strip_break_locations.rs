use tracing::instrument;

use crate::json::input::JsonRoutePlanInput;

/// Removes the `location` of every required break and returns the number of
/// required breaks visited.
#[instrument(skip_all, level = "debug")]
pub fn strip_break_locations(input: &mut JsonRoutePlanInput) -> usize {
    let mut count = 0;

    for required_break in input
        .shifts_mut()
        .flat_map(|shift| shift.required_breaks.iter_mut().flatten())
    {
        required_break.location = None;
        count += 1;
    }

    count
}
