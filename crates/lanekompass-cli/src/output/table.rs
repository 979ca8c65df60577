use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, scalar};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(view) = map.get("view") {
                print_dashboard(view);
            } else if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    print_flat_object(result);
    print_warnings(envelope.get("warnings"));

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    let mut rows = Vec::new();
    flatten("", value, &mut rows);
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in rows {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
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
        let headers: Vec<String> = flattened[0].iter().map(|(k, _)| k.clone()).collect();

        let mut builder = Builder::default();
        builder.push_record(headers.clone());
        for rows in &flattened {
            let record: Vec<String> = headers
                .iter()
                .map(|h| {
                    rows.iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(record);
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", scalar(item));
        }
    }
}

fn print_warnings(warnings: Option<&Value>) {
    if let Some(Value::Array(warnings)) = warnings {
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

fn pairs_table(header: [&str; 2], rows: impl IntoIterator<Item = (String, String)>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(header);
    for (k, v) in rows {
        builder.push_record([k, v]);
    }
    Table::from(builder)
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Render a dashboard view: KPIs, the active tab, then the details panel.
fn print_dashboard(view: &Value) {
    if let Some(Value::Array(kpis)) = view.get("kpis") {
        let rows = kpis
            .iter()
            .map(|k| (str_field(k, "label").to_string(), str_field(k, "value").to_string()));
        println!("{}", pairs_table(["KPI", "Value"], rows));
    }

    if let Some(content) = view.get("content") {
        match str_field(content, "tab") {
            "overview" => {
                if let Some(Value::Array(cards)) = content.get("categories") {
                    let mut builder = Builder::default();
                    builder.push_record(["Category", "Principal", "Monthly", "Loans"]);
                    for card in cards {
                        let empty = card.get("empty").and_then(Value::as_bool).unwrap_or(false);
                        if empty {
                            builder.push_record([
                                str_field(card, "label"),
                                "Inga aktiva lån",
                                "",
                                "0",
                            ]);
                        } else {
                            builder.push_record([
                                str_field(card, "label").to_string(),
                                str_field(card, "principal_display").to_string(),
                                str_field(card, "monthly_display").to_string(),
                                card.get("loan_count").map(scalar).unwrap_or_default(),
                            ]);
                        }
                    }
                    println!("\n{}", Table::from(builder));
                }
                print_loan_rows(content.get("loans"));
            }
            "loans" => print_loan_rows(content.get("loans")),
            "offers" => {
                if let Some(Value::String(msg)) = content.get("message") {
                    println!("\n{}", msg);
                } else {
                    let mut rows = Vec::new();
                    flatten("", content, &mut rows);
                    rows.retain(|(k, _)| k != "tab");
                    println!("\n{}", pairs_table(["Offer", "Value"], rows));
                }
            }
            "actions" => {
                if let Some(Value::Array(scenarios)) = content.get("scenarios") {
                    println!();
                    print_array_table(scenarios);
                }
            }
            _ => {}
        }
    }

    if let Some(detail) = view.get("detail") {
        match detail.get("fields") {
            Some(Value::Array(fields)) => {
                let rows = fields.iter().filter_map(|f| match f {
                    Value::Array(pair) if pair.len() == 2 => {
                        Some((scalar(&pair[0]), scalar(&pair[1])))
                    }
                    _ => None,
                });
                println!("\n{}", pairs_table(["Lånedetaljer", ""], rows));
            }
            _ => println!("\n{}", str_field(detail, "message")),
        }
    }

    print_warnings(view.get("warnings"));
}

fn print_loan_rows(table: Option<&Value>) {
    let Some(Value::Array(rows)) = table.and_then(|t| t.get("rows")) else {
        return;
    };
    if rows.is_empty() {
        println!("\n(no loans match)");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["", "Bank", "Typ", "Belopp kvar", "Ränta", "Månad"]);
    for row in rows {
        let marker = if row.get("selected").and_then(Value::as_bool).unwrap_or(false) {
            "›"
        } else {
            ""
        };
        builder.push_record([
            marker,
            str_field(row, "lender"),
            str_field(row, "category"),
            str_field(row, "principal"),
            str_field(row, "rate"),
            str_field(row, "monthly"),
        ]);
    }
    println!("\n{}", Table::from(builder));
}
