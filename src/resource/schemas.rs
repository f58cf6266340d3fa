//! Custom schema functions.
use schemars::{gen::SchemaGenerator, schema::Schema};
use serde_json::{from_value, json};

pub fn port(_: &mut SchemaGenerator) -> Schema {
    from_value(json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 65535,
    }))
    .unwrap()
}
