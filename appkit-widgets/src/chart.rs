//! Chart wrapper - maps small data shapes to a renderer-ready
//! configuration object for six chart kinds.
//!
//! The wrapper does no drawing itself: it emits a configuration value (the
//! external charting renderer's input) and parks it on the chart's mount
//! element. Rendering internals are the renderer's concern.

use std::sync::{Arc, RwLock};

use appkit_dom::{Document, Element};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default color palette, cycled per dataset.
pub const PALETTE: [&str; 8] = [
    "#2563eb", // primary
    "#10b981", // success
    "#ef4444", // danger
    "#f59e0b", // warning
    "#3b82f6", // info
    "#8b5cf6", // purple
    "#ec4899", // pink
    "#6b7280", // gray
];

fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Convert a `#rrggbb` color to an `rgba()` string.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 {
        return format!("rgba(0, 0, 0, {alpha})");
    }
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Series kind within a mixed chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

/// One series of a line/bar/area/mixed chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub fill: bool,
    /// Series kind for mixed charts; ignored elsewhere.
    #[serde(default)]
    pub kind: Option<SeriesKind>,
}

impl Dataset {
    pub fn new(data: impl IntoIterator<Item = f64>) -> Self {
        Self {
            data: data.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn kind(mut self, kind: SeriesKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Labeled multi-series data for line/bar/area/mixed charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

/// Labeled single-series data for doughnut/pie charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SliceData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

/// A live chart: its mount point plus the current configuration.
///
/// The configuration is re-parked on the mount element after every
/// [`update`](Self::update), so the external renderer always reads the
/// latest state.
pub struct ChartHandle {
    document: Document,
    mount_id: String,
    config: Arc<RwLock<Value>>,
}

impl ChartHandle {
    /// The current configuration value.
    pub fn config(&self) -> Value {
        self.config
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(Value::Null)
    }

    /// The chart type string of the configuration.
    pub fn kind(&self) -> String {
        self.config()
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Replace labels and per-dataset data in place. Datasets beyond those
    /// already configured are ignored.
    pub fn update(&self, data: &SeriesData) {
        if let Ok(mut guard) = self.config.write() {
            if !data.labels.is_empty() {
                guard["data"]["labels"] = json!(data.labels);
            }
            if let Some(datasets) = guard["data"]["datasets"].as_array_mut() {
                for (slot, dataset) in datasets.iter_mut().zip(&data.datasets) {
                    if !dataset.data.is_empty() {
                        slot["data"] = json!(dataset.data);
                    }
                }
            }
        }
        self.render();
    }

    /// Remove the chart from its mount point.
    pub fn destroy(self) {
        self.document.update_mount(&self.mount_id, |el| {
            el.content = appkit_dom::Content::None;
            el.remove_class("chart");
        });
    }

    fn render(&self) {
        let serialized = self.config().to_string();
        let mount_id = self.mount_id.clone();
        self.document.update_mount(&self.mount_id, move |el| {
            *el = Element::box_()
                .id(mount_id)
                .class("chart")
                .data("config", serialized);
        });
    }
}

/// Chart factory bound to a document.
///
/// Every method returns `None` when the mount point does not resolve.
#[derive(Clone)]
pub struct Charts {
    document: Document,
}

impl Charts {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }

    /// Create a line chart.
    pub fn line(&self, mount_id: &str, data: &SeriesData, options: Value) -> Option<ChartHandle> {
        self.install(mount_id, line_config(data, options, false))
    }

    /// Create an area chart (a line chart with every dataset filled).
    pub fn area(&self, mount_id: &str, data: &SeriesData, options: Value) -> Option<ChartHandle> {
        self.install(mount_id, line_config(data, options, true))
    }

    /// Create a bar chart.
    pub fn bar(&self, mount_id: &str, data: &SeriesData, options: Value) -> Option<ChartHandle> {
        self.install(mount_id, bar_config(data, options, false))
    }

    /// Create a horizontal bar chart.
    pub fn horizontal_bar(
        &self,
        mount_id: &str,
        data: &SeriesData,
        options: Value,
    ) -> Option<ChartHandle> {
        self.install(mount_id, bar_config(data, options, true))
    }

    /// Create a doughnut chart.
    pub fn doughnut(&self, mount_id: &str, data: &SliceData, options: Value) -> Option<ChartHandle> {
        self.install(mount_id, slice_config(data, options, false))
    }

    /// Create a pie chart.
    pub fn pie(&self, mount_id: &str, data: &SliceData, options: Value) -> Option<ChartHandle> {
        self.install(mount_id, slice_config(data, options, true))
    }

    /// Create a mixed bar/line chart.
    pub fn mixed(&self, mount_id: &str, data: &SeriesData, options: Value) -> Option<ChartHandle> {
        self.install(mount_id, mixed_config(data, options))
    }

    fn install(&self, mount_id: &str, config: Value) -> Option<ChartHandle> {
        if !self.document.has_mount(mount_id) {
            return None;
        }
        let handle = ChartHandle {
            document: self.document.clone(),
            mount_id: mount_id.to_string(),
            config: Arc::new(RwLock::new(config)),
        };
        handle.render();
        Some(handle)
    }
}

fn default_options() -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": {
                "position": "bottom",
                "labels": {
                    "padding": 20,
                    "usePointStyle": true,
                    "font": { "size": 12 }
                }
            },
            "tooltip": {
                "backgroundColor": "#1f2937",
                "titleFont": { "size": 13 },
                "bodyFont": { "size": 12 },
                "padding": 12,
                "cornerRadius": 8
            }
        }
    })
}

fn xy_scales(horizontal: bool) -> Value {
    let value_axis = json!({
        "beginAtZero": true,
        "grid": { "color": "#e5e7eb" },
        "ticks": { "font": { "size": 11 } }
    });
    let label_axis = json!({
        "grid": { "display": false },
        "ticks": { "font": { "size": 11 } }
    });
    if horizontal {
        json!({ "x": value_axis, "y": label_axis })
    } else {
        json!({ "x": label_axis, "y": value_axis })
    }
}

/// Shallow-merge caller options over the built options object.
fn merge_options(config: &mut Value, extra: Value) {
    let (Some(options), Some(extra)) = (
        config.get_mut("options").and_then(Value::as_object_mut),
        extra.as_object(),
    ) else {
        return;
    };
    for (key, value) in extra {
        options.insert(key.clone(), value.clone());
    }
}

fn dataset_label(dataset: &Dataset, index: usize) -> String {
    dataset
        .label
        .clone()
        .unwrap_or_else(|| format!("Dataset {}", index + 1))
}

fn line_config(data: &SeriesData, options: Value, fill_all: bool) -> Value {
    let datasets: Vec<Value> = data
        .datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| {
            let color = ds.color.clone().unwrap_or_else(|| palette_color(i).to_string());
            let fill = fill_all || ds.fill;
            json!({
                "label": dataset_label(ds, i),
                "data": ds.data,
                "borderColor": color,
                "backgroundColor": if fill { hex_to_rgba(&color, 0.1) } else { "transparent".to_string() },
                "borderWidth": 2,
                "tension": 0.4,
                "fill": fill,
                "pointRadius": 4,
                "pointHoverRadius": 6
            })
        })
        .collect();

    let mut config = json!({
        "type": "line",
        "data": { "labels": data.labels, "datasets": datasets },
        "options": default_options()
    });
    config["options"]["scales"] = xy_scales(false);
    merge_options(&mut config, options);
    config
}

fn bar_config(data: &SeriesData, options: Value, horizontal: bool) -> Value {
    let datasets: Vec<Value> = data
        .datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| {
            let color = ds.color.clone().unwrap_or_else(|| palette_color(i).to_string());
            json!({
                "label": dataset_label(ds, i),
                "data": ds.data,
                "backgroundColor": color,
                "borderRadius": 6,
                "borderSkipped": false
            })
        })
        .collect();

    let mut config = json!({
        "type": "bar",
        "data": { "labels": data.labels, "datasets": datasets },
        "options": default_options()
    });
    config["options"]["scales"] = xy_scales(horizontal);
    if horizontal {
        config["options"]["indexAxis"] = json!("y");
    }
    merge_options(&mut config, options);
    config
}

fn slice_config(data: &SliceData, options: Value, pie: bool) -> Value {
    let colors: Vec<String> = data.colors.clone().unwrap_or_else(|| {
        (0..data.values.len().max(1))
            .map(|i| palette_color(i).to_string())
            .collect()
    });

    let mut config = json!({
        "type": if pie { "pie" } else { "doughnut" },
        "data": {
            "labels": data.labels,
            "datasets": [{
                "data": data.values,
                "backgroundColor": colors,
                "borderWidth": 0,
                "hoverOffset": 4
            }]
        },
        "options": default_options()
    });
    config["options"]["cutout"] = if pie { json!(0) } else { json!("70%") };
    merge_options(&mut config, options);
    config
}

fn mixed_config(data: &SeriesData, options: Value) -> Value {
    let datasets: Vec<Value> = data
        .datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| {
            let color = ds.color.clone().unwrap_or_else(|| palette_color(i).to_string());
            let is_line = ds.kind == Some(SeriesKind::Line);
            json!({
                "type": if is_line { "line" } else { "bar" },
                "label": dataset_label(ds, i),
                "data": ds.data,
                "backgroundColor": if is_line { "transparent".to_string() } else { color.clone() },
                "borderColor": color,
                "borderWidth": if is_line { 2 } else { 0 },
                "borderRadius": if is_line { 0 } else { 6 },
                "tension": 0.4
            })
        })
        .collect();

    let mut config = json!({
        "type": "bar",
        "data": { "labels": data.labels, "datasets": datasets },
        "options": default_options()
    });
    config["options"]["scales"] = xy_scales(false);
    merge_options(&mut config, options);
    config
}
