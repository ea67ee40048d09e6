use serde_json::{Map, Value};
use std::io;

use super::{comparison_report, format_scalar, FORM_KEYS};

/// Monthly series of the comparison report, one CSV column each.
const SERIES: [(&str, &str); 9] = [
    ("month", "months"),
    ("stage", "stages"),
    ("revenue", "monthly_revenue"),
    ("costs", "monthly_costs"),
    ("income", "monthly_income"),
    ("social_contribution", "monthly_social_contribution"),
    ("health_contribution", "monthly_health_contribution"),
    ("tax", "monthly_tax"),
    ("net_income", "monthly_net_income"),
];

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(report) = comparison_report(value) {
        write_monthly_csv(&mut wtr, report);
    } else {
        let fields = match value.get("result") {
            Some(Value::Object(result)) => Some(result),
            _ => value.as_object(),
        };
        match fields {
            Some(map) => write_fields_csv(&mut wtr, map),
            None => {
                let _ = wtr.write_record([&format_scalar(value)]);
            }
        }
    }

    let _ = wtr.flush();
}

/// Long format: one row per tax form and month.
fn write_monthly_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, report: &Map<String, Value>) {
    let mut header = vec!["form"];
    header.extend(SERIES.iter().map(|(column, _)| *column));
    let _ = wtr.write_record(&header);

    for key in FORM_KEYS {
        let Some(form) = report.get(key) else {
            continue;
        };
        let months = form
            .get("months")
            .and_then(Value::as_array)
            .map_or(0, |m| m.len());
        for i in 0..months {
            let mut row = vec![key.to_string()];
            row.extend(SERIES.iter().map(|(_, series)| {
                form.get(*series)
                    .and_then(|s| s.get(i))
                    .map(format_scalar)
                    .unwrap_or_default()
            }));
            let _ = wtr.write_record(&row);
        }
    }
}

fn write_fields_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &Map<String, Value>) {
    if let Some(Value::Array(rows)) = map.values().find(|v| v.is_array()) {
        if let Some(Value::Object(first)) = rows.first() {
            let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
            let _ = wtr.write_record(&headers);
            for item in rows {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| item.get(*h).map(format_scalar).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
            return;
        }
    }

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
    }
}
