use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A `[latitude, longitude]` pair, as the routing service encodes locations.
/// Coordinates keep the number representation they were read with, so `[50, 4]`
/// is written back as `[50, 4]`. Equality compares the coordinate values.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename = "Location")]
pub struct JsonLocation([Number; 2]);

impl JsonLocation {
    /// Returns `None` when a coordinate is not finite.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        Some(JsonLocation([Number::from_f64(lat)?, Number::from_f64(lng)?]))
    }

    pub fn lat(&self) -> f64 {
        self.0[0].as_f64().unwrap_or(f64::NAN)
    }

    pub fn lng(&self) -> f64 {
        self.0[1].as_f64().unwrap_or(f64::NAN)
    }
}

impl PartialEq for JsonLocation {
    fn eq(&self, other: &Self) -> bool {
        self.lat() == other.lat() && self.lng() == other.lng()
    }
}

impl fmt::Display for JsonLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0[0], self.0[1])
    }
}

fn parse_coordinate(input: &str, name: &str) -> Result<Number, String> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("Invalid {name}: {err}"))?;

    // Integers stay integers, as they would in a document.
    match input.trim().parse::<i64>() {
        Ok(integer) => Ok(Number::from(integer)),
        Err(_) => Number::from_f64(value).ok_or_else(|| format!("Invalid {name}: {value}")),
    }
}

impl FromStr for JsonLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected \"lat,lng\", got \"{s}\""))?;

        let location = JsonLocation([
            parse_coordinate(lat, "latitude")?,
            parse_coordinate(lng, "longitude")?,
        ]);

        if !(-90.0..=90.0).contains(&location.lat()) || !(-180.0..=180.0).contains(&location.lng()) {
            return Err(format!("Location {location} is out of range"));
        }

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_location() {
        let location: JsonLocation = "50.85, 4.35".parse().unwrap();
        assert_eq!(Some(location.clone()), JsonLocation::new(50.85, 4.35));
        assert_eq!(location.to_string(), "50.85,4.35");
    }

    #[test]
    fn test_parse_invalid_location() {
        assert!("50.85".parse::<JsonLocation>().is_err());
        assert!("abc,4.35".parse::<JsonLocation>().is_err());
        assert!("91,4.35".parse::<JsonLocation>().is_err());
        assert!("NaN,4.35".parse::<JsonLocation>().is_err());
    }

    #[test]
    fn test_location_is_an_array() {
        let location = JsonLocation::new(1.5, -2.0).unwrap();
        assert_eq!(serde_json::to_value(location).unwrap(), json!([1.5, -2.0]));
    }

    #[test]
    fn test_integer_coordinates_are_kept() {
        let location: JsonLocation = serde_json::from_value(json!([50, 4])).unwrap();

        assert_eq!(serde_json::to_string(&location).unwrap(), "[50,4]");
        assert_eq!(Some(location.clone()), JsonLocation::new(50.0, 4.0));
        assert_eq!(location.to_string(), "50,4");

        let parsed: JsonLocation = "50,4".parse().unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "[50,4]");
    }
}
