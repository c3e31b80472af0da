//! Chart definition input model.
//!
//! A chart definition is the library-agnostic description of a chart: a
//! tabular data block, an axis map binding series to axes, and plot options.
//! All types deserialize from the camelCase JSON documents produced by the
//! definition source.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cell value in the tabular data block.
///
/// `Timestamp` never arrives from JSON; date coercion produces it from
/// ISO-8601 text, and it serializes back to an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// One data row: column name → cell value, in declaration order.
pub type Row = IndexMap<String, Scalar>;

/// Declared type of a data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Date,
    #[serde(rename = "string")]
    Text,
}

/// Synthetic row index carried alongside the data rows, aligned 1:1 with
/// `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexData {
    #[serde(rename = "type")]
    pub kind: ColumnType,
    #[serde(default)]
    pub values: Vec<Scalar>,
}

/// The tabular data block of a chart definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Column names in their original order. Informational only.
    #[serde(default)]
    pub column_order: Vec<String>,
    /// Declared type per column. Required.
    pub columns: IndexMap<String, ColumnType>,
    #[serde(default)]
    pub values: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexData>,
}

/// A reference from an axis to a named data column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBinding {
    pub series: String,
    /// Display name for the series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Tick template for the axis this series lands on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Per-series x-axis override; meaningful on y/y2 bindings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Box<SeriesBinding>>,
}

impl SeriesBinding {
    pub fn new(series: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            label: None,
            format: None,
            x: None,
        }
    }
}

/// Association between axis identifiers and the series rendered on them.
///
/// `x` carries at most one binding; `y` and `y2` carry binding lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<SeriesBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<SeriesBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y2: Vec<SeriesBinding>,
}

/// Chart geometry understood by the target renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartType {
    #[default]
    Line,
    Spline,
    Step,
    Area,
    AreaSpline,
    AreaStep,
    Bar,
    Scatter,
    Pie,
    Donut,
    Gauge,
}

/// Axis display type in the output configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Indexed,
    Timeseries,
    Category,
}

/// Manual display-type override; `Default` means "use the inferred type".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisTypeOption {
    #[default]
    Default,
    Indexed,
    Timeseries,
    Category,
}

impl AxisTypeOption {
    /// The override as a concrete display type, unless it is the sentinel.
    pub fn as_override(self) -> Option<AxisKind> {
        match self {
            AxisTypeOption::Default => None,
            AxisTypeOption::Indexed => Some(AxisKind::Indexed),
            AxisTypeOption::Timeseries => Some(AxisKind::Timeseries),
            AxisTypeOption::Category => Some(AxisKind::Category),
        }
    }
}

/// Display options for the x axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(default)]
    pub axis_type: AxisTypeOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Display options for a numeric axis: the shared options plus bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YAxisOptions {
    #[serde(flatten)]
    pub options: AxisOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    #[serde(default)]
    pub show: bool,
}

/// Plot-level options: chart type, sizing, per-axis display and legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub x: AxisOptions,
    #[serde(default)]
    pub y: YAxisOptions,
    #[serde(default)]
    pub y2: YAxisOptions,
    #[serde(default)]
    pub legend: LegendOptions,
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    600
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            width: default_width(),
            height: default_height(),
            x: AxisOptions::default(),
            y: YAxisOptions::default(),
            y2: YAxisOptions::default(),
            legend: LegendOptions::default(),
        }
    }
}

/// A complete chart definition: data, axis map and plot options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefinition {
    pub data: ChartData,
    #[serde(default)]
    pub axis_map: AxisMap,
    #[serde(default)]
    pub plot_config: PlotConfig,
}

impl ChartDefinition {
    /// Parse a definition from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid chart definition")
    }

    /// Parse a definition from an already-deserialized JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).context("invalid chart definition")
    }
}
