// Tick label templates: strftime for dates, a numeral-style subset for
// numbers.

use anyhow::{anyhow, Result};
use chrono::format::StrftimeItems;
use chrono::NaiveDateTime;
use std::fmt::Write;

use crate::def::{ChartData, ColumnType, Scalar};
use crate::prepare;

/// One formatted tick label per data row, or `None` for categorical series.
pub fn format_tick_values(
    data: &ChartData,
    series: &str,
    column_type: ColumnType,
    template: &str,
) -> Result<Option<Vec<String>>> {
    match column_type {
        ColumnType::Number => {
            let values = data
                .values
                .iter()
                .map(|row| format_number_cell(row.get(series), template))
                .collect();
            Ok(Some(values))
        }
        ColumnType::Date => {
            let mut values = Vec::with_capacity(data.values.len());
            for row in &data.values {
                values.push(format_date_cell(row.get(series), template)?);
            }
            Ok(Some(values))
        }
        ColumnType::Text => Ok(None),
    }
}

/// Cells that cannot be read as a number format to the empty string.
fn format_number_cell(cell: Option<&Scalar>, template: &str) -> String {
    let value = match cell {
        Some(Scalar::Number(n)) => n.as_f64(),
        Some(Scalar::Text(s)) => s.parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(v) => format_number(v, template),
        None => String::new(),
    }
}

fn format_date_cell(cell: Option<&Scalar>, template: &str) -> Result<String> {
    let stamp = match cell {
        Some(Scalar::Timestamp(ts)) => Some(*ts),
        Some(Scalar::Text(s)) => prepare::parse_iso_timestamp(s).ok(),
        _ => None,
    };
    match stamp {
        Some(ts) => format_date(ts, template),
        None => Ok(String::new()),
    }
}

/// Apply a strftime template to a timestamp. A template chrono cannot
/// interpret is an error rather than a panic.
pub fn format_date(stamp: NaiveDateTime, template: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", stamp.format_with_items(StrftimeItems::new(template)))
        .map_err(|_| anyhow!("invalid date format template '{}'", template))?;
    Ok(out)
}

/// Apply a numeral-style template to a number.
///
/// Supported template features: `0`s after a `.` fix the decimal places, a
/// `,` anywhere turns on thousands grouping, a trailing `%` scales by 100
/// and appends a percent sign.
pub fn format_number(value: f64, template: &str) -> String {
    let percent = template.ends_with('%');
    let scaled = if percent { value * 100.0 } else { value };
    let decimals = template
        .rsplit_once('.')
        .map(|(_, frac)| frac.chars().take_while(|c| *c == '0').count())
        .unwrap_or(0);

    let mut body = format!("{:.*}", decimals, scaled);
    if template.contains(',') {
        body = group_thousands(&body);
    }
    if percent {
        body.push('%');
    }
    body
}

/// Insert `,` separators into the integer digits of an already-formatted
/// number.
fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::from(sign);
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
