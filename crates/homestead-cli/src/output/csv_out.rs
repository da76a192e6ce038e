use serde_json::{Map, Value};
use std::io;

use super::{cell, flatten_scalars, result_of, row_series};

/// Write the result as CSV to stdout.
///
/// Row series win: a bare array, or the first schedule inside the result,
/// is written one record per row. Otherwise the scalar figures are written
/// as `field,value` pairs.
pub fn print_csv(value: &Value) {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());

    let written = match result_of(value) {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(result) => match row_series(result).first() {
            Some((_, rows)) => write_rows(&mut wtr, rows),
            None => write_fields(&mut wtr, result),
        },
        other => wtr.write_record([cell(other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {e}");
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten_scalars(result) {
        wtr.write_record([key, val])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            wtr.write_record([cell(row)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        wtr.write_record(headers.iter().map(|h| row.get(*h).map(cell).unwrap_or_default()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        f(&mut wtr).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_rows_use_first_row_headers() {
        let rows = vec![
            json!({ "month": 1, "balance": "100" }),
            json!({ "month": 2, "balance": "50" }),
        ];
        let out = render(|w| write_rows(w, &rows));
        assert_eq!(out, "balance,month\n100,1\n50,2\n");
    }

    #[test]
    fn test_fields_are_flattened() {
        let result = json!({ "base": "10", "winner": { "name": "Bank deposit" } });
        let out = render(|w| write_fields(w, result.as_object().unwrap()));
        assert_eq!(out, "field,value\nbase,10\nwinner.name,Bank deposit\n");
    }
}
