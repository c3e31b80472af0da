// Axis display configuration and series naming.

use anyhow::{anyhow, Result};
use indexmap::IndexMap;

use crate::config::{AxisConfig, AxisDisplay, TickConfig, YAxis};
use crate::def::{
    AxisKind, AxisMap, AxisOptions, ChartData, ColumnType, PlotConfig, SeriesBinding,
};
use crate::tick;

/// Map each y series to the numeric axis it is drawn against. A series bound
/// on both axes ends up on `y2`.
pub fn series_axes(axis_map: &AxisMap) -> IndexMap<String, YAxis> {
    let mut axes = IndexMap::new();
    for binding in &axis_map.y {
        axes.insert(binding.series.clone(), YAxis::Y);
    }
    for binding in &axis_map.y2 {
        axes.insert(binding.series.clone(), YAxis::Y2);
    }
    axes
}

/// Display names for every binding that carries a non-empty label, across
/// all three axes. Unlabeled series are absent; the renderer falls back to
/// the column name.
pub fn series_names(axis_map: &AxisMap) -> IndexMap<String, String> {
    let mut names = IndexMap::new();
    let bindings = axis_map
        .x
        .iter()
        .chain(axis_map.y.iter())
        .chain(axis_map.y2.iter());
    for binding in bindings {
        if let Some(label) = &binding.label {
            if !label.is_empty() {
                names.insert(binding.series.clone(), label.clone());
            }
        }
    }
    names
}

/// Build the display state for all three axes.
///
/// The x axis is configured by its solitary binding; y/y2 iterate their
/// bindings, repeatedly refining one shared display object. Explicit bounds
/// from the plot options overlay afterwards.
pub fn configure_axis(
    axis_map: &AxisMap,
    plot: &PlotConfig,
    data: &ChartData,
) -> Result<AxisConfig> {
    let mut x = AxisDisplay::hidden();
    if let Some(binding) = &axis_map.x {
        apply_series(&mut x, binding, &plot.x, data)?;
    }

    let mut y = AxisDisplay::hidden();
    for binding in &axis_map.y {
        apply_series(&mut y, binding, &plot.y.options, data)?;
    }
    overlay_bounds(&mut y, plot.y.min, plot.y.max);

    let mut y2 = AxisDisplay::hidden();
    for binding in &axis_map.y2 {
        apply_series(&mut y2, binding, &plot.y2.options, data)?;
    }
    overlay_bounds(&mut y2, plot.y2.min, plot.y2.max);

    Ok(AxisConfig { x, y, y2 })
}

/// Explicitly provided bounds always land in the output, zero included.
fn overlay_bounds(axis: &mut AxisDisplay, min: Option<f64>, max: Option<f64>) {
    if min.is_some() {
        axis.min = min;
    }
    if max.is_some() {
        axis.max = max;
    }
}

/// Refine one axis's display state for a single series landing on it.
///
/// Bindings sharing an axis apply in order: the last format's tick values
/// win, while type and label come from the plot options on every pass.
fn apply_series(
    axis: &mut AxisDisplay,
    binding: &SeriesBinding,
    options: &AxisOptions,
    data: &ChartData,
) -> Result<()> {
    let column_type = *data
        .columns
        .get(&binding.series)
        .ok_or_else(|| anyhow!("series '{}' references unknown column", binding.series))?;

    axis.kind = Some(default_axis_kind(column_type));
    if let Some(kind) = options.axis_type.as_override() {
        axis.kind = Some(kind);
    }
    if let Some(label) = &options.label {
        axis.label = Some(label.clone());
    }
    axis.show = true;

    if let Some(template) = &binding.format {
        if let Some(values) =
            tick::format_tick_values(data, &binding.series, column_type, template)?
        {
            axis.tick = Some(TickConfig { values });
        }
    }

    Ok(())
}

/// Default display type for a series' declared data type.
fn default_axis_kind(column_type: ColumnType) -> AxisKind {
    match column_type {
        ColumnType::Number => AxisKind::Indexed,
        ColumnType::Date => AxisKind::Timeseries,
        ColumnType::Text => AxisKind::Category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{AxisTypeOption, YAxisOptions};
    use serde_json::json;

    fn make_data() -> ChartData {
        serde_json::from_value(json!({
            "columns": { "n": "number", "d": "date", "c": "string" },
            "values": [
                { "n": 1, "d": "2020-01-01", "c": "low" },
                { "n": 2, "d": "2020-02-01", "c": "high" },
            ],
        }))
        .unwrap()
    }

    fn binding(series: &str) -> SeriesBinding {
        SeriesBinding::new(series)
    }

    #[test]
    fn test_axes_assignment() {
        let axis_map = AxisMap {
            x: None,
            y: vec![binding("n")],
            y2: vec![binding("d")],
        };
        let axes = series_axes(&axis_map);
        assert_eq!(axes["n"], YAxis::Y);
        assert_eq!(axes["d"], YAxis::Y2);
    }

    #[test]
    fn test_inferred_axis_kinds() {
        let data = make_data();
        let axis_map = AxisMap {
            x: Some(binding("d")),
            y: vec![binding("n")],
            y2: vec![binding("c")],
        };
        let axis = configure_axis(&axis_map, &PlotConfig::default(), &data).unwrap();
        assert_eq!(axis.x.kind, Some(AxisKind::Timeseries));
        assert_eq!(axis.y.kind, Some(AxisKind::Indexed));
        assert_eq!(axis.y2.kind, Some(AxisKind::Category));
        assert!(axis.x.show && axis.y.show && axis.y2.show);
    }

    #[test]
    fn test_unbound_axes_stay_hidden() {
        let data = make_data();
        let axis = configure_axis(&AxisMap::default(), &PlotConfig::default(), &data).unwrap();
        assert_eq!(axis.x, AxisDisplay::hidden());
        assert_eq!(axis.y, AxisDisplay::hidden());
        assert_eq!(axis.y2, AxisDisplay::hidden());
    }

    #[test]
    fn test_manual_type_override() {
        let data = make_data();
        let axis_map = AxisMap {
            x: None,
            y: vec![binding("n")],
            y2: vec![],
        };
        let mut plot = PlotConfig::default();
        plot.y.options.axis_type = AxisTypeOption::Category;
        let axis = configure_axis(&axis_map, &plot, &data).unwrap();
        assert_eq!(axis.y.kind, Some(AxisKind::Category));
    }

    #[test]
    fn test_default_sentinel_keeps_inferred_type() {
        let data = make_data();
        let axis_map = AxisMap {
            x: None,
            y: vec![binding("n")],
            y2: vec![],
        };
        let mut plot = PlotConfig::default();
        plot.y.options.axis_type = AxisTypeOption::Default;
        let axis = configure_axis(&axis_map, &plot, &data).unwrap();
        assert_eq!(axis.y.kind, Some(AxisKind::Indexed));
    }

    #[test]
    fn test_axis_label_from_plot_options() {
        let data = make_data();
        let axis_map = AxisMap {
            x: Some(binding("d")),
            y: vec![binding("n")],
            y2: vec![],
        };
        let mut plot = PlotConfig::default();
        plot.x.label = Some("Date".to_string());
        plot.y.options.label = Some("Count".to_string());
        let axis = configure_axis(&axis_map, &plot, &data).unwrap();
        assert_eq!(axis.x.label.as_deref(), Some("Date"));
        assert_eq!(axis.y.label.as_deref(), Some("Count"));
        assert_eq!(axis.y2.label, None);
    }

    #[test]
    fn test_bounds_overlay_including_zero() {
        let data = make_data();
        let axis_map = AxisMap {
            x: None,
            y: vec![binding("n")],
            y2: vec![],
        };
        let mut plot = PlotConfig::default();
        plot.y = YAxisOptions {
            min: Some(0.0),
            max: Some(100.0),
            ..YAxisOptions::default()
        };
        plot.y2.min = Some(-5.0);
        let axis = configure_axis(&axis_map, &plot, &data).unwrap();
        assert_eq!(axis.y.min, Some(0.0));
        assert_eq!(axis.y.max, Some(100.0));
        // Bounds land even on an axis with no bindings.
        assert_eq!(axis.y2.min, Some(-5.0));
        assert!(!axis.y2.show);
    }

    #[test]
    fn test_last_format_wins_on_shared_axis() {
        let data = make_data();
        let first = SeriesBinding {
            format: Some("0".to_string()),
            ..binding("n")
        };
        let second = SeriesBinding {
            format: Some("0.0".to_string()),
            ..binding("n")
        };
        let axis_map = AxisMap {
            x: None,
            y: vec![first, second],
            y2: vec![],
        };
        let axis = configure_axis(&axis_map, &PlotConfig::default(), &data).unwrap();
        let tick = axis.y.tick.unwrap();
        assert_eq!(tick.values, vec!["1.0", "2.0"]);
    }

    #[test]
    fn test_categorical_format_produces_no_ticks() {
        let data = make_data();
        let axis_map = AxisMap {
            x: None,
            y: vec![SeriesBinding {
                format: Some("0".to_string()),
                ..binding("c")
            }],
            y2: vec![],
        };
        let axis = configure_axis(&axis_map, &PlotConfig::default(), &data).unwrap();
        assert!(axis.y.tick.is_none());
        assert_eq!(axis.y.kind, Some(AxisKind::Category));
    }

    #[test]
    fn test_unknown_series_is_an_error() {
        let data = make_data();
        let axis_map = AxisMap {
            x: None,
            y: vec![binding("missing")],
            y2: vec![],
        };
        assert!(configure_axis(&axis_map, &PlotConfig::default(), &data).is_err());
    }

    #[test]
    fn test_names_from_labels_across_axes() {
        let axis_map = AxisMap {
            x: Some(SeriesBinding {
                label: Some("Index".to_string()),
                ..binding("d")
            }),
            y: vec![
                SeriesBinding {
                    label: Some("Count".to_string()),
                    ..binding("n")
                },
                binding("c"),
            ],
            y2: vec![SeriesBinding {
                label: Some("".to_string()),
                ..binding("c")
            }],
        };
        let names = series_names(&axis_map);
        assert_eq!(names.len(), 2);
        assert_eq!(names["d"], "Index");
        assert_eq!(names["n"], "Count");
        assert!(!names.contains_key("c"));
    }
}
