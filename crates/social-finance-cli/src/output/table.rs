use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_value;

/// Format output as tables using the tabled crate.
///
/// Series envelopes render as two tables: the regime thresholds as
/// field/value rows, then the grid points as one row per asset or
/// monitoring level. Scalar envelopes render as a single field/value table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_field_value_table(value);
            }
        }
        Value::Array(arr) => print_points_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            // Threshold block first, if present, so the bands frame the series.
            if let Some(thresholds) = res_map.get("thresholds") {
                println!("Regime thresholds:");
                print_field_value_table(thresholds);
            }

            if let Some(Value::Array(points)) = res_map.get("points") {
                println!("\nSeries ({} points):", points.len());
                print_points_table(points);
            } else {
                // Scalar result: print the remaining fields directly.
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in res_map {
                    if key != "thresholds" {
                        builder.push_record([key.as_str(), &format_value(val)]);
                    }
                }
                println!("{}", Table::from(builder));
            }
        }
        _ => print_field_value_table(result),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_value_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", format_value(value));
    }
}

fn print_points_table(points: &[Value]) {
    if points.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = points.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for point in points {
            if let Value::Object(map) = point {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for point in points {
            println!("{}", format_value(point));
        }
    }
}
