//! Serde adapters for the JSON wire format: binary columns travel as base64
//! strings, session timestamps as zone-less ISO date-times.

use chrono::{DateTime, NaiveDateTime, Utc};

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse the date-time shapes clients send for `fechaHora`.
pub fn parse_local_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    // Browsers send `toISOString()` output, which carries a zone
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).naive_utc())
}

pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                STANDARD
                    .decode(s.trim())
                    .map_err(<D::Error as serde::de::Error>::custom)
            })
            .transpose()
    }
}

pub mod base64_list {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Vec<Vec<u8>>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(docs) => docs
                .iter()
                .map(|d| STANDARD.encode(d))
                .collect::<Vec<_>>()
                .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<u8>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Vec<String>>::deserialize(deserializer)?
            .map(|docs| {
                docs.iter()
                    .map(|s| {
                        STANDARD
                            .decode(s.trim())
                            .map_err(<D::Error as serde::de::Error>::custom)
                    })
                    .collect::<Result<Vec<_>, D::Error>>()
            })
            .transpose()
    }
}

pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_local_datetime, DATETIME_FORMAT};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(DATETIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                parse_local_datetime(&s).ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(format!(
                        "Invalid date-time: '{s}'. Expected 'YYYY-MM-DDTHH:MM[:SS]'"
                    ))
                })
            })
            .transpose()
    }
}
