use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format;

/// Render the output as tables: the appraisal envelope becomes a
/// parameters table, the year-by-year schedule, and a metrics table;
/// anything else falls back to a generic field/value layout.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_appraisal_result(result);
                print_warnings(map);
                print_methodology(map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_appraisal_result(result: &Value) {
    let Some(res_map) = result.as_object() else {
        println!("{}", result);
        return;
    };

    if let Some(Value::Object(params)) = res_map.get("parameters") {
        println!("Parameters");
        print_two_column(params);
    }

    if let Some(rows) = result.pointer("/schedule/rows").and_then(Value::as_array) {
        println!("\nCash-flow schedule");
        print_array_table(rows);
    }

    if let Some(Value::Object(metrics)) = res_map.get("metrics") {
        println!("\nMetrics");
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        for (key, val) in metrics {
            builder.push_record([key.as_str(), &format_metric(key, val)]);
        }
        println!("{}", Table::from(builder));
    }

    if res_map.get("parameters").is_none()
        && res_map.get("metrics").is_none()
        && result.pointer("/schedule/rows").is_none()
    {
        print_two_column(res_map);
    }
}

fn format_metric(key: &str, value: &Value) -> String {
    match key {
        "irr" => format::irr_cell(value),
        "payback_period" | "discounted_payback_period" => format::payback_cell(value),
        _ => format::number_cell(value),
    }
}

fn print_warnings(envelope: &serde_json::Map<String, Value>) {
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
}

fn print_methodology(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        print_two_column(map);
    }
}

fn print_two_column(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format::number_cell(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format::number_cell).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format::number_cell(item));
        }
    }
}
