//! Wall-clock timestamps in the `YYYY-MM-DD HH:MM:SS` form used by file
//! records.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serializer};

/// Display and persistence format of `File::add_time`.
pub const ADD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to whole seconds.
pub fn now_truncated() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Serialize a timestamp with [`ADD_TIME_FORMAT`].
pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(ADD_TIME_FORMAT))
}

/// Deserialize a timestamp written with [`ADD_TIME_FORMAT`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, ADD_TIME_FORMAT).map_err(serde::de::Error::custom)
}
