use serde_json::Value;

use super::scalar;

/// Key answers in priority order. Dotted paths descend into nested objects.
const PRIORITY_KEYS: [&str; 7] = [
    "health_score",
    "debt_to_income",
    "totals.avg_rate",
    "yearly_saving",
    "interest_approx",
    "risk_label",
    "view.health_score",
];

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in priority order, then falls back
/// to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(found) = PRIORITY_KEYS
        .iter()
        .filter_map(|k| lookup(result_obj, k))
        .find(|v| !v.is_null())
    {
        println!("{}", scalar(found));
        return;
    }

    match result_obj {
        Value::Object(map) => {
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar(val));
            }
        }
        Value::Array(arr) => println!("{}", arr.len()),
        other => println!("{}", scalar(other)),
    }
}
