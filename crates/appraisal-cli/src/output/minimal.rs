use serde_json::Value;

use super::format;

/// Print just the headline answer from the output.
///
/// The appraisal envelope yields the summary metrics in priority order;
/// anything else prints its first field.
pub fn print_minimal(value: &Value) {
    // Prefer the metrics block inside the envelope, then the result
    // object, then the raw value.
    let target = value
        .pointer("/result/metrics")
        .or_else(|| value.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "npv",
        "irr",
        "payback_period",
        "discounted_payback_period",
    ];

    if let Value::Object(map) = target {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(key, val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(key, val));
            return;
        }
    }

    println!("{}", format::number_cell(target));
}

fn format_minimal(key: &str, value: &Value) -> String {
    match key {
        "irr" => format::irr_cell(value),
        "payback_period" | "discounted_payback_period" => format::payback_cell(value),
        _ => format::number_cell(value),
    }
}
