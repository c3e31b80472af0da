// Working-data construction: index materialization and date coercion.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::def::{ChartData, ColumnType, Scalar};

/// Reserved column name for the materialized row index.
pub const INDEX_COLUMN: &str = "__index__";

/// Clone the data block, merge a non-empty index in as a pseudo-column, and
/// inflate ISO-8601 text in date-typed columns into timestamps.
///
/// The caller's data is never touched; all later stages read this copy.
pub fn build_working_data(data: &ChartData) -> Result<ChartData> {
    let mut working = data.clone();

    if let Some(index) = &data.index {
        if !index.values.is_empty() {
            working.column_order.push(INDEX_COLUMN.to_string());
            working.columns.insert(INDEX_COLUMN.to_string(), index.kind);
            for (i, row) in working.values.iter_mut().enumerate() {
                let value = index.values.get(i).cloned().unwrap_or(Scalar::Null);
                row.insert(INDEX_COLUMN.to_string(), value);
            }
        }
    }

    coerce_date_columns(&mut working)?;
    Ok(working)
}

/// Inflate raw ISO-8601 strings for every column declared `date`, whether or
/// not any series uses it. Cells that are already timestamps, or not text at
/// all, pass through.
fn coerce_date_columns(data: &mut ChartData) -> Result<()> {
    let date_columns: Vec<String> = data
        .columns
        .iter()
        .filter(|(_, kind)| **kind == ColumnType::Date)
        .map(|(name, _)| name.clone())
        .collect();

    for name in date_columns {
        for row in data.values.iter_mut() {
            if let Some(cell) = row.get_mut(&name) {
                if let Scalar::Text(raw) = cell {
                    let stamp = parse_iso_timestamp(raw)
                        .with_context(|| format!("bad date in column '{}'", name))?;
                    *cell = Scalar::Timestamp(stamp);
                }
            }
        }
    }

    Ok(())
}

/// Parse an ISO-8601 date or date/time string. Zoned inputs are normalized
/// to UTC; bare dates get a midnight time.
pub fn parse_iso_timestamp(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Ok(zoned.naive_utc());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp);
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN));
    }
    Err(anyhow!("'{}' is not an ISO-8601 date/time", raw))
}
