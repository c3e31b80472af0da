// CSV ingestion into a chart-definition data block.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::def::{ChartData, ColumnType, Row, Scalar};
use crate::prepare;

/// Load a data block from a CSV file.
pub fn read_csv_file(path: &Path) -> Result<ChartData> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file '{}'", path.display()))?;
    read_csv(file)
}

/// Load a data block from CSV text. The header row names the columns and
/// per-column types are inferred from the cells.
pub fn read_csv<R: Read>(reader: R) -> Result<ChartData> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("Failed to read CSV record")?;
        records.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }

    let mut columns = IndexMap::new();
    for (i, header) in headers.iter().enumerate() {
        let cells: Vec<&str> = records
            .iter()
            .filter_map(|r| r.get(i).map(String::as_str))
            .collect();
        columns.insert(header.clone(), infer_column_type(&cells));
    }

    let mut values = Vec::with_capacity(records.len());
    for record in &records {
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = record.get(i).map(String::as_str).unwrap_or("");
            row.insert(header.clone(), parse_cell(cell, columns[header.as_str()]));
        }
        values.push(row);
    }

    Ok(ChartData {
        column_order: headers,
        columns,
        values,
        index: None,
    })
}

/// Numbers win, then ISO dates; anything mixed is a category column. Empty
/// cells don't vote.
fn infer_column_type(cells: &[&str]) -> ColumnType {
    let populated: Vec<&str> = cells.iter().copied().filter(|c| !c.is_empty()).collect();
    if populated.is_empty() {
        return ColumnType::Text;
    }
    if populated.iter().all(|c| c.parse::<f64>().is_ok()) {
        ColumnType::Number
    } else if populated
        .iter()
        .all(|c| prepare::parse_iso_timestamp(c).is_ok())
    {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

/// Empty cells become nulls. Date cells stay as their raw ISO text; the
/// formatter's working copy inflates them.
fn parse_cell(cell: &str, column_type: ColumnType) -> Scalar {
    if cell.is_empty() {
        return Scalar::Null;
    }
    match column_type {
        ColumnType::Number => parse_number(cell),
        ColumnType::Date | ColumnType::Text => Scalar::Text(cell.to_string()),
    }
}

/// Keep the integer representation when the cell has one.
fn parse_number(cell: &str) -> Scalar {
    if let Ok(int) = cell.parse::<i64>() {
        return Scalar::Number(int.into());
    }
    match cell.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(number) => Scalar::Number(number),
        None => Scalar::Text(cell.to_string()),
    }
}
