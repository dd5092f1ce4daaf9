//! Canonical JSON: objects with lexicographically sorted keys, arrays left
//! in caller-supplied order, compact output with no trailing newline.
//!
//! Used by `seedscan-report` to produce byte-stable JSON result records, and
//! by tests that want to compare two result documents without worrying
//! about serde_json's (insertion-order) map iteration.

use serde_json::Value;

pub fn canonicalize(v: &Value) -> Value {
    match v {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => v.clone(),
        Value::Array(a) => Value::Array(a.iter().map(canonicalize).collect()),
        Value::Object(m) => {
            let mut keys: Vec<&String> = m.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for k in keys {
                out.insert(k.clone(), canonicalize(&m[k]));
            }
            Value::Object(out)
        }
    }
}

pub fn to_canonical_bytes(v: &Value) -> Vec<u8> {
    let canon = canonicalize(v);
    serde_json::to_vec(&canon).expect("canonicalized Value always serializes")
}
