use serde_json::Value;
use std::io;

use super::format_value;

/// Write output as CSV to stdout. Series envelopes emit one row per grid
/// point; scalar envelopes emit field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            if let Some(Value::Array(points)) = result.get("points") {
                write_points_csv(&mut wtr, points);
            } else if let Value::Object(fields) = result {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_points_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_points_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, points: &[Value]) {
    if points.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = points.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for point in points {
            if let Value::Object(map) = point {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    }
}
