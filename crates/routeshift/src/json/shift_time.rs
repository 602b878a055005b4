use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::DateTime, tz::TimeZone};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de};

/// A shift boundary such as `minStartTime`, kept as written so that a
/// rewritten document carries the same offset. The text is validated when
/// read.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct JsonShiftTime(String);

impl JsonShiftTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The instant of this boundary. A time without an offset is read as UTC.
    pub fn timestamp(&self) -> Result<Timestamp, jiff::Error> {
        parse_instant(&self.0)
    }
}

fn parse_instant(input: &str) -> Result<Timestamp, jiff::Error> {
    input.parse::<Timestamp>().or_else(|err| {
        input
            .parse::<DateTime>()
            .and_then(|datetime| datetime.to_zoned(TimeZone::UTC))
            .map(|zoned| zoned.timestamp())
            .map_err(|_| err)
    })
}

impl From<Timestamp> for JsonShiftTime {
    fn from(timestamp: Timestamp) -> Self {
        JsonShiftTime(timestamp.to_string())
    }
}

impl FromStr for JsonShiftTime {
    type Err = jiff::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_instant(s)?;
        Ok(JsonShiftTime(s.to_owned()))
    }
}

impl fmt::Display for JsonShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for JsonShiftTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse()
            .map_err(|err| de::Error::custom(format!("Invalid shift time \"{text}\": {err}")))
    }
}
