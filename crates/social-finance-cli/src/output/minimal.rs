use serde_json::Value;

use super::format_value;

/// Print just the key answer from the output.
///
/// For a contract solution that is the borrower's return; for threshold
/// output the crossing asset level; series outputs fall back to the point
/// count.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "borrower_return",
        "borrowers_reached",
        "regime",
        "a_cross",
        "m_cross",
    ];

    if let Value::Object(map) = result {
        for key in priority_keys {
            if let Some(v) = map.get(key) {
                println!("{}", format_value(v));
                return;
            }
        }
        if let Some(Value::Array(points)) = map.get("points") {
            println!("{} points", points.len());
            return;
        }
        if let Some((_, v)) = map.iter().next() {
            println!("{}", format_value(v));
            return;
        }
    }

    println!("{}", format_value(result));
}
