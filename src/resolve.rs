// X-axis resolution per y series and extraction of the emitted data columns.

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use std::collections::HashSet;

use crate::config::DataColumn;
use crate::def::{AxisMap, ChartData, Scalar, SeriesBinding};

/// Map each y series to the x series it is plotted against.
///
/// The first axis (`y` before `y2`) and the first binding within it win;
/// later bindings for the same series are no-ops. A binding-level `x`
/// override beats the axis map's default x binding.
pub fn resolve_x_bindings(axis_map: &AxisMap) -> IndexMap<String, String> {
    let mut xs = IndexMap::new();

    for binding in axis_map.y.iter().chain(axis_map.y2.iter()) {
        if xs.contains_key(&binding.series) {
            continue;
        }
        if let Some(x_series) = resolved_x_series(binding, axis_map) {
            xs.insert(binding.series.clone(), x_series.to_string());
        }
    }

    xs
}

/// The x series a y binding resolves to: its own override, else the axis
/// map's default x.
fn resolved_x_series<'a>(binding: &'a SeriesBinding, axis_map: &'a AxisMap) -> Option<&'a str> {
    binding
        .x
        .as_deref()
        .or(axis_map.x.as_ref())
        .map(|x| x.series.as_str())
}

/// Emit the value column for every y series plus every x column it needs.
///
/// Emission order is first-seen across `y` then `y2`, each series followed
/// immediately by its x column when newly introduced; a column referenced
/// more than once appears exactly once.
pub fn extract_columns(axis_map: &AxisMap, data: &ChartData) -> Result<Vec<DataColumn>> {
    let mut columns = Vec::new();
    let mut seen = HashSet::new();

    for binding in axis_map.y.iter().chain(axis_map.y2.iter()) {
        add_column(&binding.series, data, &mut columns, &mut seen)?;
        if let Some(x_series) = resolved_x_series(binding, axis_map) {
            add_column(x_series, data, &mut columns, &mut seen)?;
        }
    }

    Ok(columns)
}

/// Append a named column with its full value sequence, once. Cells missing
/// from a row come out as nulls.
fn add_column(
    name: &str,
    data: &ChartData,
    columns: &mut Vec<DataColumn>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    if seen.contains(name) {
        return Ok(());
    }

    if !data.columns.contains_key(name) {
        return Err(anyhow!("series '{}' references unknown column", name));
    }

    let values = data
        .values
        .iter()
        .map(|row| row.get(name).cloned().unwrap_or(Scalar::Null))
        .collect();

    seen.insert(name.to_string());
    columns.push(DataColumn {
        name: name.to_string(),
        values,
    });
    Ok(())
}
