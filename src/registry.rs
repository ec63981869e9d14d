//! Backend registry: construct serializers once at startup, look them up
//! anywhere, swap them deliberately.
//!
//! The registry holds one adapter per backend plus a "current" slot that
//! answers "whichever is registered". Registration is governed by a
//! [`RegisterPolicy`] instead of separate add/try-add/replace entry points.

use crate::error::{Error, Result};
use crate::json::{JsonOptions, JsonSerializer};
use crate::msgpack::{MsgPackOptions, MsgPackSerializer};
use crate::serializer::Serializer;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Seek};
use std::sync::Arc;

/// Which backend a registration or lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// The JSON text backend.
    Json,
    /// The MessagePack binary backend.
    MsgPack,
}

/// What to do when a registration finds the current slot already occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterPolicy {
    /// Error out and change nothing.
    Fail,
    /// Keep the existing registration, silently.
    Skip,
    /// Overwrite the existing registration.
    Replace,
}

/// Either backend behind one concrete type.
///
/// The [`Serializer`] contract has generic methods and so cannot be boxed;
/// this enum is how "whichever serializer is currently registered" gets
/// dispatched at runtime.
#[derive(Debug, Clone)]
pub enum AnySerializer {
    /// A JSON text serializer.
    Json(JsonSerializer),
    /// A MessagePack binary serializer.
    MsgPack(MsgPackSerializer),
}

impl AnySerializer {
    /// The backend this serializer belongs to.
    #[must_use]
    pub fn backend(&self) -> Backend {
        match self {
            Self::Json(_) => Backend::Json,
            Self::MsgPack(_) => Backend::MsgPack,
        }
    }
}

impl Serializer for AnySerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Option<String> {
        match self {
            Self::Json(s) => s.serialize(value),
            Self::MsgPack(s) => s.serialize(value),
        }
    }

    fn serialize_to_bytes<T: Serialize>(&self, value: &T) -> Option<Vec<u8>> {
        match self {
            Self::Json(s) => s.serialize_to_bytes(value),
            Self::MsgPack(s) => s.serialize_to_bytes(value),
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Option<T> {
        match self {
            Self::Json(s) => s.deserialize(text),
            Self::MsgPack(s) => s.deserialize(text),
        }
    }

    fn deserialize_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Option<T> {
        match self {
            Self::Json(s) => s.deserialize_bytes(bytes),
            Self::MsgPack(s) => s.deserialize_bytes(bytes),
        }
    }

    fn deserialize_reader<T: DeserializeOwned, R: Read>(&self, reader: R) -> Option<T> {
        match self {
            Self::Json(s) => s.deserialize_reader(reader),
            Self::MsgPack(s) => s.deserialize_reader(reader),
        }
    }

    fn deserialize_seek<T: DeserializeOwned, R: Read + Seek>(&self, reader: R) -> Option<T> {
        match self {
            Self::Json(s) => s.deserialize_seek(reader),
            Self::MsgPack(s) => s.deserialize_seek(reader),
        }
    }
}

#[derive(Default)]
struct Slots {
    current: Option<Arc<AnySerializer>>,
    json: Option<Arc<AnySerializer>>,
    msgpack: Option<Arc<AnySerializer>>,
}

/// Holds the process's serializers. Register at startup, read everywhere.
///
/// Adapters are immutable once registered; the registry only ever swaps whole
/// `Arc`s, so lookups are a read-lock and a refcount bump.
///
/// ```rust
/// use codec_facade::{RegisterPolicy, Serializer, SerializerRegistry};
///
/// let registry = SerializerRegistry::new();
/// registry.register_json(RegisterPolicy::Fail).unwrap();
///
/// let json = registry.current().unwrap();
/// assert_eq!(json.serialize(&1u8).as_deref(), Some("1"));
/// ```
#[derive(Default)]
pub struct SerializerRegistry {
    slots: RwLock<Slots>,
}

static GLOBAL: Lazy<SerializerRegistry> = Lazy::new(SerializerRegistry::default);

impl SerializerRegistry {
    /// Fresh registry with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry. Created on first use, lives until shutdown.
    #[must_use]
    pub fn global() -> &'static SerializerRegistry {
        &GLOBAL
    }

    // ---- registration -----------------------------------------------------

    /// Register a JSON serializer with default options.
    pub fn register_json(&self, policy: RegisterPolicy) -> Result<()> {
        self.register_json_with(policy, |_| {})
    }

    /// Register a JSON serializer, mutating the default options first.
    ///
    /// The callback runs once, at registration time, against
    /// [`JsonOptions::default`].
    pub fn register_json_with<F>(&self, policy: RegisterPolicy, configure: F) -> Result<()>
    where
        F: FnOnce(&mut JsonOptions),
    {
        let mut options = JsonOptions::default();
        configure(&mut options);
        self.install(
            policy,
            AnySerializer::Json(JsonSerializer::with_options(options)),
        )
    }

    /// Register a MessagePack serializer with default options.
    pub fn register_msgpack(&self, policy: RegisterPolicy) -> Result<()> {
        self.register_msgpack_with(policy, |_| {})
    }

    /// Register a MessagePack serializer, mutating the default options first.
    ///
    /// The callback runs once, at registration time, against
    /// [`MsgPackOptions::default`].
    pub fn register_msgpack_with<F>(&self, policy: RegisterPolicy, configure: F) -> Result<()>
    where
        F: FnOnce(&mut MsgPackOptions),
    {
        let mut options = MsgPackOptions::default();
        configure(&mut options);
        self.install(
            policy,
            AnySerializer::MsgPack(MsgPackSerializer::with_options(options)),
        )
    }

    fn install(&self, policy: RegisterPolicy, serializer: AnySerializer) -> Result<()> {
        let mut slots = self.slots.write();
        if slots.current.is_some() {
            match policy {
                RegisterPolicy::Fail => {
                    return Err(Error::Config(
                        "a serializer is already registered (use RegisterPolicy::Replace to swap it)"
                            .to_string(),
                    ));
                }
                RegisterPolicy::Skip => return Ok(()),
                RegisterPolicy::Replace => {}
            }
        }
        let shared = Arc::new(serializer);
        match shared.backend() {
            Backend::Json => slots.json = Some(Arc::clone(&shared)),
            Backend::MsgPack => slots.msgpack = Some(Arc::clone(&shared)),
        }
        slots.current = Some(shared);
        Ok(())
    }

    // ---- lookup -----------------------------------------------------------

    /// Whichever serializer is currently registered, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<AnySerializer>> {
        self.slots.read().current.clone()
    }

    /// The serializer registered for a specific backend, if any.
    ///
    /// Backend slots survive a `Replace` by the other backend, so "the JSON
    /// one" stays reachable after MessagePack takes over as current.
    #[must_use]
    pub fn get(&self, backend: Backend) -> Option<Arc<AnySerializer>> {
        let slots = self.slots.read();
        match backend {
            Backend::Json => slots.json.clone(),
            Backend::MsgPack => slots.msgpack.clone(),
        }
    }

    /// Drop every registration.
    pub fn clear(&self) {
        let mut slots = self.slots.write();
        *slots = Slots::default();
    }
}

impl std::fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.read();
        f.debug_struct("SerializerRegistry")
            .field("current", &slots.current.as_ref().map(|s| s.backend()))
            .field("json", &slots.json.is_some())
            .field("msgpack", &slots.msgpack.is_some())
            .finish_non_exhaustive()
    }
}
