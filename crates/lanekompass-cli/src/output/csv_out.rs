use serde_json::Value;
use std::io;

use super::{flatten, scalar};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(rows) = map
                .get("view")
                .and_then(|v| v.get("content"))
                .and_then(|c| c.get("loans"))
                .and_then(|l| l.get("rows"))
                .and_then(Value::as_array)
            {
                // Dashboard: export the visible loan table
                write_array_csv(&mut wtr, rows);
            } else {
                let target = map.get("result").unwrap_or(value);
                let mut rows = Vec::new();
                flatten("", target, &mut rows);
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in rows {
                    let _ = wtr.write_record([key, val]);
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([scalar(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if arr.iter().all(Value::is_object) {
        let flattened: Vec<Vec<(String, String)>> = arr
            .iter()
            .map(|item| {
                let mut rows = Vec::new();
                flatten("", item, &mut rows);
                rows
            })
            .collect();
        let headers: Vec<&str> = flattened[0].iter().map(|(k, _)| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for rows in &flattened {
            let record: Vec<&str> = headers
                .iter()
                .map(|h| {
                    rows.iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| v.as_str())
                        .unwrap_or_default()
                })
                .collect();
            let _ = wtr.write_record(&record);
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([scalar(item)]);
        }
    }
}
