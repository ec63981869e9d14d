use codec_facade::{JsonSerializer, MsgPackSerializer, Serializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Invoice {
    invoice_id: u64,
    customer_name: String,
    total_cents: i64,
    note: Option<String>,
}

fn main() -> Result<(), codec_facade::Error> {
    let invoice = Invoice {
        invoice_id: 1042,
        customer_name: "Ada Lovelace".into(),
        total_cents: 129_900,
        note: None,
    };

    // JSON backend: camelCase keys, nulls dropped
    let json = JsonSerializer::new();
    let text = json.try_serialize(&invoice)?;
    println!("json text      = {text}");

    let back: Invoice = json.try_deserialize(&text)?;
    println!("round-tripped  = {back:?}");

    // MessagePack backend: compressed binary, base64 text projection
    let pack = MsgPackSerializer::new();
    let bytes = pack.try_serialize_to_bytes(&invoice)?;
    let b64 = pack.try_serialize(&invoice)?;
    println!("binary bytes   = {}", bytes.len());
    println!("base64 text    = {b64}");

    // human-readable projection of the binary payload
    println!("json projection= {}", pack.try_to_json(&bytes)?);

    // the fail-soft contract: bad input logs and returns None, never panics
    let missing: Option<Invoice> = json.deserialize("{definitely not json");
    println!("bad input      = {missing:?}");

    Ok(())
}
