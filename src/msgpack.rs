//! MessagePack binary backend. Delegates to rmp-serde.
//!
//! Byte-shaped operations carry the native wire form: MessagePack in
//! named-field mode, wrapped in LZ4 block compression. String-shaped
//! operations carry the same payload base64-encoded, so the binary form
//! round-trips bit-exact through any text channel. For a human-readable
//! projection of a binary payload use [`MsgPackSerializer::to_json`].

use crate::error::{Error, Result};
use crate::serializer::{fail_soft, Serializer};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom};

/// Payload compression applied around the MessagePack encoding.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    /// Raw MessagePack bytes, no wrapper.
    None,
    /// LZ4 block compression with a length prefix.
    #[default]
    Lz4,
}

impl Compression {
    fn compress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(data),
        }
    }

    fn decompress(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::None => Ok(data.to_vec()),
            Self::Lz4 => Ok(lz4_flex::decompress_size_prepended(data)?),
        }
    }
}

/// Runtime policy for the MessagePack backend.
#[derive(Debug, Clone, Default)]
pub struct MsgPackOptions {
    /// Compression wrapper around the encoded payload. Default: LZ4.
    pub compression: Compression,
}

/// MessagePack serializer with a base64 text projection.
///
/// Values are encoded in named-field mode (map keys carried on the wire), so
/// schema-less object graphs round-trip without any contract between writer
/// and reader. Struct fields holding date/times should use the
/// [`datetime`](crate::datetime) modules to stay portable across the binary
/// encoding.
///
/// ```rust
/// use codec_facade::{MsgPackSerializer, Serializer};
///
/// let pack = MsgPackSerializer::new();
/// let text = pack.serialize(&("tick", 42)).unwrap();
/// let back: (String, u32) = pack.deserialize(&text).unwrap();
/// assert_eq!(back, ("tick".to_string(), 42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MsgPackSerializer {
    options: MsgPackOptions,
}

impl MsgPackSerializer {
    /// Serializer with default options (LZ4 compression).
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializer with explicit options.
    pub fn with_options(options: MsgPackOptions) -> Self {
        Self { options }
    }

    /// The options this serializer was built with.
    #[must_use]
    pub fn options(&self) -> &MsgPackOptions {
        &self.options
    }

    /// Render a binary payload produced by this serializer as JSON text.
    ///
    /// A display convenience, not part of the [`Serializer`] contract: the
    /// projection goes through MessagePack's JSON mapping and is not meant to
    /// be fed back into [`deserialize`](Serializer::deserialize). Fail-soft
    /// like the contract operations.
    pub fn to_json(&self, bytes: &[u8]) -> Option<String> {
        fail_soft("msgpack json projection", self.try_to_json(bytes))
    }

    // ---- strict API -------------------------------------------------------

    /// Encode to the base64 text projection of the binary payload.
    pub fn try_serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        let bytes = self.try_serialize_to_bytes(value)?;
        Ok(BASE64.encode(bytes))
    }

    /// Encode to the native wire form: named-field MessagePack, compressed.
    pub fn try_serialize_to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let encoded = rmp_serde::to_vec_named(value)?;
        Ok(self.options.compression.compress(&encoded))
    }

    /// Decode from the base64 text projection.
    pub fn try_deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let bytes = BASE64.decode(text.trim())?;
        self.try_deserialize_bytes(&bytes)
    }

    /// Decode from the native wire form.
    pub fn try_deserialize_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let encoded = self.options.compression.decompress(bytes)?;
        Ok(rmp_serde::from_slice(&encoded)?)
    }

    /// Decode the native wire form from a reader positioned at the start of
    /// the payload.
    pub fn try_deserialize_reader<T: DeserializeOwned, R: Read>(&self, mut reader: R) -> Result<T> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.try_deserialize_bytes(&bytes)
    }

    /// Decode the native wire form from a seekable reader, rewinding it first.
    pub fn try_deserialize_seek<T: DeserializeOwned, R: Read + Seek>(
        &self,
        mut reader: R,
    ) -> Result<T> {
        reader.seek(SeekFrom::Start(0))?;
        self.try_deserialize_reader(reader)
    }

    /// Strict form of [`to_json`](Self::to_json).
    pub fn try_to_json(&self, bytes: &[u8]) -> Result<String> {
        let encoded = self.options.compression.decompress(bytes)?;
        let tree: serde_json::Value = rmp_serde::from_slice(&encoded)?;
        serde_json::to_string(&tree).map_err(|e| Error::Encode(e.to_string()))
    }
}

impl Serializer for MsgPackSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Option<String> {
        fail_soft("msgpack serialize", self.try_serialize(value))
    }

    fn serialize_to_bytes<T: Serialize>(&self, value: &T) -> Option<Vec<u8>> {
        fail_soft("msgpack serialize to bytes", self.try_serialize_to_bytes(value))
    }

    fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Option<T> {
        fail_soft("msgpack deserialize", self.try_deserialize(text))
    }

    fn deserialize_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Option<T> {
        fail_soft("msgpack deserialize bytes", self.try_deserialize_bytes(bytes))
    }

    fn deserialize_reader<T: DeserializeOwned, R: Read>(&self, reader: R) -> Option<T> {
        fail_soft("msgpack deserialize reader", self.try_deserialize_reader(reader))
    }

    fn deserialize_seek<T: DeserializeOwned, R: Read + Seek>(&self, reader: R) -> Option<T> {
        fail_soft("msgpack deserialize seek", self.try_deserialize_seek(reader))
    }
}
