// Top-level assembly of the renderer configuration.

use anyhow::Result;

use crate::axes;
use crate::config::{
    DataConfig, LegendConfig, PointConfig, RendererConfig, SizeConfig, TransitionConfig,
};
use crate::def::ChartDefinition;
use crate::prepare;
use crate::resolve;

/// Convert a chart definition into the configuration object the renderer
/// consumes.
///
/// Pure and deterministic: same definition in, same configuration out, and
/// the definition itself is left untouched. Fails when a binding references
/// a column the data block does not declare, or when a date-typed column
/// holds text that is not ISO-8601.
pub fn format_chart_def(def: &ChartDefinition) -> Result<RendererConfig> {
    let working = prepare::build_working_data(&def.data)?;

    let xs = resolve::resolve_x_bindings(&def.axis_map);
    let columns = resolve::extract_columns(&def.axis_map, &working)?;
    let axis = axes::configure_axis(&def.axis_map, &def.plot_config, &working)?;

    Ok(RendererConfig {
        size: SizeConfig {
            width: def.plot_config.width,
            height: def.plot_config.height,
        },
        data: DataConfig {
            xs,
            columns,
            chart_type: def.plot_config.chart_type,
            axes: axes::series_axes(&def.axis_map),
            names: axes::series_names(&def.axis_map),
        },
        axis,
        transition: TransitionConfig::default(),
        point: PointConfig::default(),
        legend: LegendConfig {
            show: def.plot_config.legend.show,
        },
    })
}
