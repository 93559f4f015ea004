//! Query-string decoding shared by the API handlers.
//!
//! Fetchers take the same raw mapping shape as a JSON parameter bag, so the
//! incoming query string is decoded with scalar inference: integers, floats
//! and booleans become typed values, everything else stays a string, and
//! repeated keys aggregate into arrays.

use serde_json::{Map, Number, Value};

pub fn parse_raw_query(raw: Option<&str>) -> Map<String, Value> {
    let mut params = Map::new();
    let Some(raw) = raw else {
        return params;
    };

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();
    for (key, text) in pairs {
        let value = infer_scalar(&text);
        match params.get_mut(&key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                params.insert(key, value);
            }
        }
    }
    params
}

fn infer_scalar(text: &str) -> Value {
    if let Ok(int) = text.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = text.parse::<f64>() {
        // non-finite values stay strings
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}
