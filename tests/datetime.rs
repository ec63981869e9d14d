use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use codec_facade::{JsonSerializer, MsgPackSerializer, Serializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Audit {
    #[serde(with = "codec_facade::datetime::naive_iso8601")]
    created_at: NaiveDateTime,
    #[serde(default, with = "codec_facade::datetime::naive_iso8601_opt")]
    deleted_at: Option<NaiveDateTime>,
    #[serde(with = "codec_facade::datetime::offset_iso8601")]
    signed_at: DateTime<FixedOffset>,
    #[serde(default, with = "codec_facade::datetime::offset_iso8601_opt")]
    revoked_at: Option<DateTime<FixedOffset>>,
}

fn micros() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_micro_opt(9, 30, 0, 123_456)
        .unwrap()
}

fn signed() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-05-17T09:30:00.123456+02:00").unwrap()
}

fn sample() -> Audit {
    Audit {
        created_at: micros(),
        deleted_at: None,
        signed_at: signed(),
        revoked_at: Some(DateTime::parse_from_rfc3339("2031-01-01T00:00:00-05:30").unwrap()),
    }
}

// ---- binary round trip ------------------------------------------------------

#[test]
fn microseconds_survive_the_binary_encoding() {
    let pack = MsgPackSerializer::new();
    let bytes = pack.serialize_to_bytes(&sample()).unwrap();
    let back: Audit = pack.deserialize_bytes(&bytes).unwrap();

    assert_eq!(back, sample());
    assert_eq!(back.created_at.and_utc().timestamp_subsec_micros(), 123_456);
}

#[test]
fn offsets_survive_exactly() {
    let pack = MsgPackSerializer::new();
    let bytes = pack.serialize_to_bytes(&sample()).unwrap();
    let back: Audit = pack.deserialize_bytes(&bytes).unwrap();

    // same instant AND same offset, not just equal timestamps
    assert_eq!(back.signed_at.offset(), sample().signed_at.offset());
    assert_eq!(
        back.revoked_at.unwrap().offset(),
        sample().revoked_at.unwrap().offset()
    );
}

#[test]
fn absent_datetimes_round_trip_as_none() {
    let pack = MsgPackSerializer::new();
    let back: Audit = pack
        .deserialize_bytes(&pack.serialize_to_bytes(&sample()).unwrap())
        .unwrap();
    assert_eq!(back.deleted_at, None);
}

// ---- wire shape -------------------------------------------------------------

#[test]
fn datetimes_are_text_on_the_wire_not_numbers() {
    let pack = MsgPackSerializer::new();
    let bytes = pack.serialize_to_bytes(&sample()).unwrap();
    let projection = pack.to_json(&bytes).unwrap();
    let tree: serde_json::Value = serde_json::from_str(&projection).unwrap();

    assert_eq!(tree["created_at"], "2024-05-17T09:30:00.123456");
    assert_eq!(tree["signed_at"], "2024-05-17T09:30:00.123456+02:00");
}

// ---- works through the text backend too -------------------------------------

#[test]
fn same_fields_round_trip_through_json() {
    let json = JsonSerializer::new();
    let text = json.serialize(&sample()).unwrap();
    let back: Audit = json.deserialize(&text).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn whole_second_values_round_trip_too() {
    let pack = MsgPackSerializer::new();
    let audit = Audit {
        created_at: NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap(),
        deleted_at: Some(micros()),
        signed_at: DateTime::parse_from_rfc3339("2000-01-01T00:00:00+00:00").unwrap(),
        revoked_at: None,
    };
    let back: Audit = pack
        .deserialize_bytes(&pack.serialize_to_bytes(&audit).unwrap())
        .unwrap();
    assert_eq!(back, audit);
}
