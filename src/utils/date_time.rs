//! Local date-time parsing and formatting.
//!
//! Dates cross the API boundary as `yyyy-MM-ddTHH:mm:ss` strings with no zone
//! offset and are stored as local timestamps, not instants.

use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, PrimitiveDateTime};

/// The only accepted wire pattern, e.g. `1965-07-31T08:30:00`.
pub const LOCAL_DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a local date-time (yyyy-MM-ddTHH:mm:ss)")]
pub struct InvalidDateFormat {
    pub value: String,
}

pub fn parse_local_date_time(value: &str) -> Result<PrimitiveDateTime, InvalidDateFormat> {
    PrimitiveDateTime::parse(value, LOCAL_DATE_TIME).map_err(|_| InvalidDateFormat {
        value: value.to_string(),
    })
}

pub fn format_local_date_time(value: PrimitiveDateTime) -> String {
    value
        .format(LOCAL_DATE_TIME)
        .unwrap_or_else(|_| value.to_string())
}

/// Serde adapter for optional local date-time fields.
pub mod option_local_date_time {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S>(value: &Option<PrimitiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&super::format_local_date_time(*value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_local_date_time(&raw).map_err(D::Error::custom))
            .transpose()
    }
}
