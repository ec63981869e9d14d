//! Round-trip ISO-8601 date/time encoding for binary payloads.
//!
//! MessagePack is not self-describing, and a numeric date/time encoding does
//! not survive a trip across runtimes with different epochs or precisions.
//! These `#[serde(with = ...)]` modules pin the four date/time shapes to
//! ISO-8601 text that round-trips to the exact instant, sub-second digits and
//! UTC offset included. They work with the JSON backend too.
//!
//! ```rust
//! use chrono::NaiveDateTime;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "codec_facade::datetime::naive_iso8601")]
//!     occurred_at: NaiveDateTime,
//!     #[serde(default, with = "codec_facade::datetime::naive_iso8601_opt")]
//!     resolved_at: Option<NaiveDateTime>,
//! }
//! ```
//!
//! Pair the `_opt` modules with `#[serde(default)]` so a member the JSON
//! backend omitted as null still decodes as `None`.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// `chrono::NaiveDateTime` as ISO-8601 text without an offset.
pub mod naive_iso8601 {
    use super::{NaiveDateTime, NAIVE_FORMAT};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes e.g. `2024-05-17T09:30:00.123456`.
    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(NAIVE_FORMAT).to_string())
    }

    /// Parses the text form back, any sub-second precision accepted.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&text, NAIVE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `Option<chrono::NaiveDateTime>`; `None` is encoded as nil/null.
pub mod naive_iso8601_opt {
    use super::{NaiveDateTime, NAIVE_FORMAT};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes the text form, or nil for `None`.
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_some(&dt.format(NAIVE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    /// Parses the text form back, mapping nil to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(text) => NaiveDateTime::parse_from_str(&text, NAIVE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// `chrono::DateTime<FixedOffset>` as RFC 3339 text, offset preserved.
pub mod offset_iso8601 {
    use super::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes e.g. `2024-05-17T09:30:00.123456+02:00`.
    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339())
    }

    /// Parses the text form back, offset and all.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let text = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&text).map_err(serde::de::Error::custom)
    }
}

/// `Option<chrono::DateTime<FixedOffset>>`; `None` is encoded as nil/null.
pub mod offset_iso8601_opt {
    use super::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes the RFC 3339 form, or nil for `None`.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<FixedOffset>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_some(&dt.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    /// Parses the RFC 3339 form back, mapping nil to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(text) => DateTime::parse_from_rfc3339(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
