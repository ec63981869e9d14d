//! Unified serializer facade over JSON and MessagePack.
//!
//! One contract ([`Serializer`]), two interchangeable backends: UTF-8 JSON
//! text via serde_json, or LZ4-compressed MessagePack via rmp-serde with a
//! base64 text projection. Pick one at startup through the
//! [`SerializerRegistry`] and the rest of the process doesn't care which.
//!
//! ```rust
//! use codec_facade::{RegisterPolicy, Serializer, SerializerRegistry};
//!
//! let registry = SerializerRegistry::new();
//! registry.register_json(RegisterPolicy::Fail).unwrap();
//!
//! let ser = registry.current().unwrap();
//! let text = ser.serialize(&vec![1, 2, 3]).unwrap();
//! let back: Vec<i32> = ser.deserialize(&text).unwrap();
//! assert_eq!(back, vec![1, 2, 3]);
//! ```
//!
//! **The boundary never throws.** Contract operations swallow codec failures:
//! the error is logged once (via `tracing`, at error severity) and the caller
//! gets `None`. `None` is therefore ambiguous between "failed" and "absent" —
//! use the `try_*` methods on the concrete adapters when you need the error.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod datetime;
pub mod error;
pub mod json;
pub mod msgpack;
pub mod registry;
pub mod serializer;
#[cfg(feature = "async")]
pub mod stream;

pub use error::{Error, Result};
pub use json::{JsonOptions, JsonSerializer};
pub use msgpack::{Compression, MsgPackOptions, MsgPackSerializer};
pub use registry::{AnySerializer, Backend, RegisterPolicy, SerializerRegistry};
pub use serializer::Serializer;
