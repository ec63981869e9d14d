use codec_facade::{Backend, Compression, RegisterPolicy, Serializer, SerializerRegistry};

fn main() -> Result<(), codec_facade::Error> {
    let registry = SerializerRegistry::new();

    // startup wiring: JSON by default, tweaked through the callback
    registry.register_json_with(RegisterPolicy::Fail, |options| {
        options.pretty = true;
    })?;

    let ser = registry.current().expect("just registered");
    println!("current backend: {:?}", ser.backend());
    println!("{}", ser.serialize(&vec![("a", 1), ("b", 2)]).expect("serializable"));

    // a later stage decides the wire should be binary and swaps it
    registry.register_msgpack_with(RegisterPolicy::Replace, |options| {
        options.compression = Compression::Lz4;
    })?;
    println!("current backend: {:?}", registry.current().unwrap().backend());

    // the JSON one is still reachable by key
    let json = registry.get(Backend::Json).expect("keyed slot survives");
    println!("keyed lookup:    {:?}", json.backend());

    // a cautious third stage gets told no, politely
    registry.register_json(RegisterPolicy::Skip)?;
    println!("after skip:      {:?}", registry.current().unwrap().backend());

    println!("{registry:?}");
    Ok(())
}
