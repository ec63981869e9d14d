#![cfg(feature = "async")]

use codec_facade::{JsonSerializer, MsgPackSerializer, Serializer};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Job {
    job_id: u64,
    command: String,
}

fn sample() -> Job {
    Job {
        job_id: 42,
        command: "rebuild index".into(),
    }
}

// ---- writer -----------------------------------------------------------------

#[tokio::test]
async fn json_writes_into_an_async_sink() {
    let json = JsonSerializer::new();
    let mut sink: Vec<u8> = Vec::new();

    let written = json.serialize_to_writer(&sample(), &mut sink).await.unwrap();
    assert_eq!(written, sink.len());

    let back: Job = json.deserialize_bytes(&sink).unwrap();
    assert_eq!(back, sample());
}

#[tokio::test]
async fn msgpack_writes_into_an_async_sink() {
    let pack = MsgPackSerializer::new();
    let mut sink: Vec<u8> = Vec::new();

    let written = pack.serialize_to_writer(&sample(), &mut sink).await.unwrap();
    assert_eq!(written, sink.len());

    let back: Job = pack.deserialize_bytes(&sink).unwrap();
    assert_eq!(back, sample());
}

// ---- reader -----------------------------------------------------------------

#[tokio::test]
async fn reads_from_an_async_source() {
    let json = JsonSerializer::new();
    let pack = MsgPackSerializer::new();

    let source = json.serialize_to_bytes(&sample()).unwrap();
    let back: Job = json
        .deserialize_reader_async(&mut source.as_slice())
        .await
        .unwrap();
    assert_eq!(back, sample());

    let source = pack.serialize_to_bytes(&sample()).unwrap();
    let back: Job = pack
        .deserialize_reader_async(&mut source.as_slice())
        .await
        .unwrap();
    assert_eq!(back, sample());
}

#[tokio::test]
async fn seek_variant_rewinds_a_parked_cursor() {
    let json = JsonSerializer::new();
    let mut cursor = Cursor::new(json.serialize_to_bytes(&sample()).unwrap());
    cursor.set_position(7);

    let back: Job = json.deserialize_seek_async(&mut cursor).await.unwrap();
    assert_eq!(back, sample());
}

#[tokio::test]
async fn async_garbage_still_fails_soft() {
    let pack = MsgPackSerializer::new();
    let mut garbage: &[u8] = b"\x00\x01\x02\x03";
    assert_eq!(
        pack.deserialize_reader_async::<Job, _>(&mut garbage).await,
        None
    );
}

// ---- strict variants --------------------------------------------------------

#[tokio::test]
async fn strict_async_surfaces_errors() {
    let json = JsonSerializer::new();
    let mut garbage: &[u8] = b"{oops";
    let err = json
        .try_deserialize_reader_async::<Job, _>(&mut garbage)
        .await
        .unwrap_err();
    assert!(matches!(err, codec_facade::Error::Decode(_)));
}
