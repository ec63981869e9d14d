//! Async stream entry points, enabled by the `async` feature.
//!
//! The value-shaped operations on [`Serializer`](crate::Serializer) are pure
//! CPU work and stay synchronous; these methods cover the shapes where actual
//! I/O happens. Cancellation is the usual tokio contract: drop the returned
//! future and nothing more is read or written — the adapters keep no state of
//! their own between calls.

use crate::error::Result;
use crate::json::JsonSerializer;
use crate::msgpack::MsgPackSerializer;
use crate::registry::AnySerializer;
use crate::serializer::fail_soft;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

async fn slurp<R>(reader: &mut R) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

impl JsonSerializer {
    /// Encode `value` and write the UTF-8 JSON bytes into `writer`.
    ///
    /// Returns the number of bytes written, or `None` (logged) on failure.
    pub async fn serialize_to_writer<T, W>(&self, value: &T, writer: &mut W) -> Option<usize>
    where
        T: Serialize,
        W: AsyncWrite + Unpin + ?Sized,
    {
        fail_soft(
            "json serialize to writer",
            self.try_serialize_to_writer(value, writer).await,
        )
    }

    /// Strict form of [`serialize_to_writer`](Self::serialize_to_writer).
    pub async fn try_serialize_to_writer<T, W>(&self, value: &T, writer: &mut W) -> Result<usize>
    where
        T: Serialize,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let bytes = self.try_serialize_to_bytes(value)?;
        writer.write_all(&bytes).await?;
        Ok(bytes.len())
    }

    /// Decode a value from an async reader, consuming it from its current
    /// position.
    pub async fn deserialize_reader_async<T, R>(&self, reader: &mut R) -> Option<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + Unpin + ?Sized,
    {
        fail_soft(
            "json deserialize async reader",
            self.try_deserialize_reader_async(reader).await,
        )
    }

    /// Strict form of [`deserialize_reader_async`](Self::deserialize_reader_async).
    pub async fn try_deserialize_reader_async<T, R>(&self, reader: &mut R) -> Result<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + Unpin + ?Sized,
    {
        let bytes = slurp(reader).await?;
        self.try_deserialize_bytes(&bytes)
    }

    /// Decode a value from an async seekable reader, rewinding it first.
    pub async fn deserialize_seek_async<T, R>(&self, reader: &mut R) -> Option<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + AsyncSeek + Unpin + ?Sized,
    {
        fail_soft(
            "json deserialize async seek",
            self.try_deserialize_seek_async(reader).await,
        )
    }

    /// Strict form of [`deserialize_seek_async`](Self::deserialize_seek_async).
    pub async fn try_deserialize_seek_async<T, R>(&self, reader: &mut R) -> Result<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + AsyncSeek + Unpin + ?Sized,
    {
        reader.rewind().await?;
        self.try_deserialize_reader_async(reader).await
    }
}

impl MsgPackSerializer {
    /// Encode `value` and write the native wire form into `writer`.
    ///
    /// Returns the number of bytes written, or `None` (logged) on failure.
    pub async fn serialize_to_writer<T, W>(&self, value: &T, writer: &mut W) -> Option<usize>
    where
        T: Serialize,
        W: AsyncWrite + Unpin + ?Sized,
    {
        fail_soft(
            "msgpack serialize to writer",
            self.try_serialize_to_writer(value, writer).await,
        )
    }

    /// Strict form of [`serialize_to_writer`](Self::serialize_to_writer).
    pub async fn try_serialize_to_writer<T, W>(&self, value: &T, writer: &mut W) -> Result<usize>
    where
        T: Serialize,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let bytes = self.try_serialize_to_bytes(value)?;
        writer.write_all(&bytes).await?;
        Ok(bytes.len())
    }

    /// Decode the native wire form from an async reader, consuming it from
    /// its current position.
    pub async fn deserialize_reader_async<T, R>(&self, reader: &mut R) -> Option<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + Unpin + ?Sized,
    {
        fail_soft(
            "msgpack deserialize async reader",
            self.try_deserialize_reader_async(reader).await,
        )
    }

    /// Strict form of [`deserialize_reader_async`](Self::deserialize_reader_async).
    pub async fn try_deserialize_reader_async<T, R>(&self, reader: &mut R) -> Result<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + Unpin + ?Sized,
    {
        let bytes = slurp(reader).await?;
        self.try_deserialize_bytes(&bytes)
    }

    /// Decode the native wire form from an async seekable reader, rewinding
    /// it first.
    pub async fn deserialize_seek_async<T, R>(&self, reader: &mut R) -> Option<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + AsyncSeek + Unpin + ?Sized,
    {
        fail_soft(
            "msgpack deserialize async seek",
            self.try_deserialize_seek_async(reader).await,
        )
    }

    /// Strict form of [`deserialize_seek_async`](Self::deserialize_seek_async).
    pub async fn try_deserialize_seek_async<T, R>(&self, reader: &mut R) -> Result<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + AsyncSeek + Unpin + ?Sized,
    {
        reader.rewind().await?;
        self.try_deserialize_reader_async(reader).await
    }
}

impl AnySerializer {
    /// Encode `value` and write the backend's byte form into `writer`.
    pub async fn serialize_to_writer<T, W>(&self, value: &T, writer: &mut W) -> Option<usize>
    where
        T: Serialize,
        W: AsyncWrite + Unpin + ?Sized,
    {
        match self {
            Self::Json(s) => s.serialize_to_writer(value, writer).await,
            Self::MsgPack(s) => s.serialize_to_writer(value, writer).await,
        }
    }

    /// Decode a value from an async reader, consuming it from its current
    /// position.
    pub async fn deserialize_reader_async<T, R>(&self, reader: &mut R) -> Option<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + Unpin + ?Sized,
    {
        match self {
            Self::Json(s) => s.deserialize_reader_async(reader).await,
            Self::MsgPack(s) => s.deserialize_reader_async(reader).await,
        }
    }

    /// Decode a value from an async seekable reader, rewinding it first.
    pub async fn deserialize_seek_async<T, R>(&self, reader: &mut R) -> Option<T>
    where
        T: DeserializeOwned,
        R: AsyncRead + AsyncSeek + Unpin + ?Sized,
    {
        match self {
            Self::Json(s) => s.deserialize_seek_async(reader).await,
            Self::MsgPack(s) => s.deserialize_seek_async(reader).await,
        }
    }
}
