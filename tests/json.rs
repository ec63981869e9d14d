use codec_facade::{JsonOptions, JsonSerializer, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    user_name: String,
    signup_count: u32,
    referral_code: Option<String>,
}

fn ada() -> Account {
    Account {
        user_name: "ada".into(),
        signup_count: 3,
        referral_code: None,
    }
}

// ---- key naming -------------------------------------------------------------

#[test]
fn writes_camel_case_keys() {
    let json = JsonSerializer::new();
    let text = json.serialize(&ada()).unwrap();
    // null member dropped, keys renamed; serde_json orders keys alphabetically
    assert_eq!(text, r#"{"signupCount":3,"userName":"ada"}"#);
}

#[test]
fn reads_keys_case_insensitively() {
    let json = JsonSerializer::new();
    for payload in [
        r#"{"userName":"ada","signupCount":3}"#,
        r#"{"UserName":"ada","SignupCount":3}"#,
        r#"{"USER_NAME":"ada","SIGNUP_COUNT":3}"#,
        r#"{"user_name":"ada","signup_count":3}"#,
    ] {
        let back: Account = json.deserialize(payload).unwrap();
        assert_eq!(back, ada(), "payload: {payload}");
    }
}

#[test]
fn renaming_can_be_turned_off() {
    let json = JsonSerializer::with_options(JsonOptions {
        camel_case_keys: false,
        ..JsonOptions::default()
    });
    let text = json.serialize(&ada()).unwrap();
    assert_eq!(text, r#"{"signup_count":3,"user_name":"ada"}"#);
}

// ---- null omission ----------------------------------------------------------

#[test]
fn null_members_are_omitted_and_come_back_as_none() {
    let json = JsonSerializer::new();
    let text = json.serialize(&json!({"a": 1, "b": null})).unwrap();
    assert_eq!(text, r#"{"a":1}"#);

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pair {
        a: i32,
        b: Option<i32>,
    }
    let back: Pair = json.deserialize(&text).unwrap();
    assert_eq!(back, Pair { a: 1, b: None });
}

#[test]
fn null_members_survive_when_omission_is_off() {
    let json = JsonSerializer::with_options(JsonOptions {
        omit_nulls: false,
        ..JsonOptions::default()
    });
    let text = json.serialize(&json!({"a": 1, "b": null})).unwrap();
    assert_eq!(text, r#"{"a":1,"b":null}"#);
}

// ---- lenient numbers --------------------------------------------------------

#[test]
fn quoted_numbers_decode_into_numeric_fields() {
    let json = JsonSerializer::new();
    let back: Account = json
        .deserialize(r#"{"userName":"ada","signupCount":"3"}"#)
        .unwrap();
    assert_eq!(back.signup_count, 3);
}

#[test]
fn leading_zero_strings_stay_strings() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Delivery {
        zip_code: String,
        box_count: u32,
    }
    let json = JsonSerializer::new();
    // box_count arrives quoted, so the lenient retry runs; the zip code must
    // not be turned into a number by it
    let back: Delivery = json
        .deserialize(r#"{"zipCode":"01234","boxCount":"5"}"#)
        .unwrap();
    assert_eq!(back.zip_code, "01234");
    assert_eq!(back.box_count, 5);
}

#[test]
fn quoted_numbers_fail_when_leniency_is_off() {
    let json = JsonSerializer::with_options(JsonOptions {
        lenient_numbers: false,
        ..JsonOptions::default()
    });
    assert_eq!(
        json.deserialize::<Account>(r#"{"userName":"ada","signupCount":"3"}"#),
        None
    );
}

// ---- depth guard ------------------------------------------------------------

fn depth_of(value: &Value) -> usize {
    match value {
        Value::Object(m) => 1 + m.values().map(depth_of).max().unwrap_or(0),
        Value::Array(a) => 1 + a.iter().map(depth_of).max().unwrap_or(0),
        _ => 0,
    }
}

#[test]
fn pathological_nesting_completes_and_gets_pruned() {
    let mut tree = json!({"leaf": true});
    for _ in 0..100 {
        tree = json!({"next": tree});
    }

    let json = JsonSerializer::new();
    let text = json.serialize(&tree).unwrap();
    let back: Value = serde_json::from_str(&text).unwrap();
    assert!(depth_of(&back) <= 65);
}

#[test]
fn subtree_past_the_limit_is_omitted_not_an_error() {
    let json = JsonSerializer::with_options(JsonOptions {
        max_depth: 2,
        camel_case_keys: false,
        ..JsonOptions::default()
    });
    let text = json.serialize(&json!({"a": {"b": {"c": 1}}})).unwrap();
    assert_eq!(text, r#"{"a":{"b":{}}}"#);
}

// ---- pretty -----------------------------------------------------------------

#[test]
fn pretty_output_is_indented() {
    let json = JsonSerializer::with_options(JsonOptions {
        pretty: true,
        ..JsonOptions::default()
    });
    let text = json.serialize(&ada()).unwrap();
    assert!(text.contains('\n'));
    assert!(text.contains("  "));
}

// ---- round trip -------------------------------------------------------------

#[test]
fn full_round_trip_with_defaults() {
    let json = JsonSerializer::new();
    let original = Account {
        user_name: "grace".into(),
        signup_count: 11,
        referral_code: Some("VAX".into()),
    };
    let back: Account = json.deserialize(&json.serialize(&original).unwrap()).unwrap();
    assert_eq!(back, original);
}
