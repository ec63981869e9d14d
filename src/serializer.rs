//! The common serializer contract both backends implement.
//!
//! Implement [`Serializer`] if you need a third format (CBOR, RON, etc.) —
//! anything that can move values to and from strings, byte buffers, and
//! readers fits.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Seek};

/// Moves values across three payload shapes: UTF-8 text, byte buffer, reader.
///
/// **Fail-soft boundary.** Every operation catches the underlying codec
/// failure, logs it once at error severity, and returns `None`. A `None`
/// result is therefore indistinguishable from a genuinely absent value —
/// that is a deliberate policy, not an accident. When you need to know *why*
/// something failed, use the `try_*` methods on the concrete adapter instead
/// ([`JsonSerializer`](crate::JsonSerializer),
/// [`MsgPackSerializer`](crate::MsgPackSerializer)); those return
/// [`Result`](crate::Result) and never log.
pub trait Serializer: Send + Sync {
    /// Encode `value` to the backend's textual form.
    fn serialize<T: Serialize>(&self, value: &T) -> Option<String>;

    /// Encode `value` to the backend's native byte form.
    fn serialize_to_bytes<T: Serialize>(&self, value: &T) -> Option<Vec<u8>>;

    /// Decode a value from the backend's textual form.
    fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Option<T>;

    /// Decode a value from the backend's native byte form.
    fn deserialize_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Option<T>;

    /// Decode a value from a reader, consuming it from its current position.
    ///
    /// The reader must already be positioned at the start of the payload.
    /// If you have something seekable, prefer [`deserialize_seek`](Self::deserialize_seek).
    fn deserialize_reader<T: DeserializeOwned, R: Read>(&self, reader: R) -> Option<T>;

    /// Decode a value from a seekable reader, rewinding to the start first.
    ///
    /// The reader may be positioned anywhere; it is rewound before reading.
    fn deserialize_seek<T: DeserializeOwned, R: Read + Seek>(&self, reader: R) -> Option<T>;
}

/// The fail-soft boundary: log the failure at error severity, swallow it,
/// hand back `None`. Logging is the only observable side effect of a failure.
pub(crate) fn fail_soft<T>(op: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::error!(error = %e, "{op} failed");
            None
        }
    }
}
