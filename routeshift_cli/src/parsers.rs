use routeshift::json::{location::JsonLocation, shift_time::JsonShiftTime};

/// Accepts a timestamp with an offset, or a local date and time read as UTC.
/// The text is kept as given.
pub fn parse_shift_time(input: &str) -> Result<JsonShiftTime, String> {
    input
        .parse::<JsonShiftTime>()
        .map_err(|err| format!("Invalid timestamp: {err}"))
}

pub fn parse_location(input: &str) -> Result<JsonLocation, String> {
    input.parse::<JsonLocation>()
}
