use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{comparison_report, format_scalar, FORM_KEYS};

const SUMMARY_COLUMNS: [(&str, &str); 7] = [
    ("Revenue", "revenue"),
    ("Costs", "costs"),
    ("Social", "social_contributions"),
    ("Health", "health_contributions"),
    ("Tax", "tax"),
    ("Burden", "total_burden"),
    ("Net income", "net_income"),
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", value);
        return;
    };

    if let Some(report) = comparison_report(value) {
        print_comparison(report);
    } else if let Some(Value::Object(result)) = envelope.get("result") {
        print_fields(result);
    } else {
        print_fields(envelope);
    }
    print_notes(envelope);
}

/// One row per tax form and summary period, then the verdict.
fn print_comparison(report: &Map<String, Value>) {
    let mut builder = Builder::default();
    let mut header = vec!["Tax form", "Period"];
    header.extend(SUMMARY_COLUMNS.iter().map(|(title, _)| *title));
    builder.push_record(header);

    for key in FORM_KEYS {
        let summaries = report
            .get(key)
            .and_then(|f| f.get("summaries"))
            .and_then(Value::as_array);
        for summary in summaries.into_iter().flatten() {
            let mut row = vec![
                key.to_string(),
                summary.get("label").map(format_scalar).unwrap_or_default(),
            ];
            row.extend(
                SUMMARY_COLUMNS
                    .iter()
                    .map(|(_, field)| summary.get(*field).map(format_scalar).unwrap_or_default()),
            );
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));

    if let Some(description) = report.get("best_form_description") {
        println!("\n{}", format_scalar(description));
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested = Vec::new();
    for (key, val) in map {
        match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                nested.push((key, items));
            }
            _ => builder.push_record([key.as_str(), &format_scalar(val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (key, items) in nested {
        println!("\n{}:", key);
        print_array_table(items);
    }
}

fn print_array_table(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        return;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(h.as_str()).map(format_scalar).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &Map<String, Value>) {
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
