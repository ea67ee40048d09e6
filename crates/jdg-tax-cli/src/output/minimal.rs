use serde_json::Value;

use super::format_scalar;

/// Print just the key answer from the output: the best tax form for a
/// comparison, otherwise the first field of the result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["best_form", "rates"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}
