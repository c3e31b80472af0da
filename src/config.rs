//! Renderer configuration output model.
//!
//! The value object handed to the charting renderer: data columns, axis
//! bindings, axis display state, legend and sizing. Freshly allocated per
//! formatting call and owned by the caller.

use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::def::{AxisKind, ChartType, Scalar};

/// Overall chart pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeConfig {
    pub width: u32,
    pub height: u32,
}

/// One emitted data column: its name followed by every row value.
///
/// Serializes as `[name, v1, v2, ...]`, the shape the renderer expects.
#[derive(Debug, Clone, PartialEq)]
pub struct DataColumn {
    pub name: String,
    pub values: Vec<Scalar>,
}

impl Serialize for DataColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.values.len() + 1))?;
        seq.serialize_element(&self.name)?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

/// Which numeric axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    Y,
    Y2,
}

/// The data section: columns, per-series x bindings and display names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataConfig {
    pub xs: IndexMap<String, String>,
    pub columns: Vec<DataColumn>,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub axes: IndexMap<String, YAxis>,
    pub names: IndexMap<String, String>,
}

/// Precomputed tick labels for an axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickConfig {
    pub values: Vec<String>,
}

/// Display state for one axis, refined once per series that lands on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisDisplay {
    pub show: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AxisKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<TickConfig>,
}

impl AxisDisplay {
    /// A hidden axis with nothing configured.
    pub fn hidden() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    pub x: AxisDisplay,
    pub y: AxisDisplay,
    pub y2: AxisDisplay,
}

/// Animated transitions are disabled; the output targets static capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionConfig {
    pub duration: u32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { duration: 0 }
    }
}

/// Point markers are always suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointConfig {
    pub show: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendConfig {
    pub show: bool,
}

/// The fully assembled renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RendererConfig {
    pub size: SizeConfig,
    pub data: DataConfig,
    pub axis: AxisConfig,
    pub transition: TransitionConfig,
    pub point: PointConfig,
    pub legend: LegendConfig,
}
