// Energy chart domain models
use super::record::Record;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

pub const ENERGY_LABEL: &str = "Energy (kWh)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Line,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeUnit {
    Minute,
}

impl TimeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Minute => "minute",
        }
    }

    /// `strftime` pattern matching the axis display format.
    pub fn strftime(self) -> &'static str {
        match self {
            TimeUnit::Minute => "%H:%M",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub unit: TimeUnit,
    pub tooltip_format: String,
    pub display_format: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearAxis {
    pub title: String,
}

/// Everything needed to construct one chart instance.
///
/// `labels` and `dataset.data` are parallel; a label is `None` when the
/// record's timestamp could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<Option<DateTime<Utc>>>,
    pub dataset: Dataset,
    pub x_axis: TimeAxis,
    pub y_axis: LinearAxis,
}

impl ChartConfig {
    /// Energy readings over time, in the order the records were received.
    pub fn energy_over_time(records: &[&Record]) -> Self {
        Self {
            kind: ChartKind::Line,
            labels: records.iter().map(|record| record.instant()).collect(),
            dataset: Dataset {
                label: ENERGY_LABEL.to_string(),
                border_color: "#3b82f6".to_string(),
                background_color: "rgba(59,130,246,0.2)".to_string(),
                fill: true,
                tension: 0.3,
                data: records.iter().map(|record| record.energy()).collect(),
            },
            x_axis: TimeAxis {
                unit: TimeUnit::Minute,
                tooltip_format: "HH:mm:ss".to_string(),
                display_format: "HH:mm".to_string(),
                title: "Time".to_string(),
            },
            y_axis: LinearAxis {
                title: ENERGY_LABEL.to_string(),
            },
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (Option<DateTime<Utc>>, f64)> + '_ {
        self.labels.iter().copied().zip(self.dataset.data.iter().copied())
    }

    /// Chart.js configuration equivalent to this chart.
    pub fn to_chartjs(&self) -> Value {
        let labels: Vec<Value> = self
            .labels
            .iter()
            .map(|label| label.map_or(Value::Null, |instant| json!(instant.timestamp_millis())))
            .collect();
        let mut display_formats = Map::new();
        display_formats.insert(
            self.x_axis.unit.as_str().to_string(),
            json!(self.x_axis.display_format),
        );

        json!({
            "type": self.kind.as_str(),
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": self.dataset.label,
                    "data": self.dataset.data,
                    "borderColor": self.dataset.border_color,
                    "backgroundColor": self.dataset.background_color,
                    "fill": self.dataset.fill,
                    "tension": self.dataset.tension,
                }],
            },
            "options": {
                "responsive": true,
                "scales": {
                    "x": {
                        "type": "time",
                        "time": {
                            "tooltipFormat": self.x_axis.tooltip_format,
                            "unit": self.x_axis.unit.as_str(),
                            "displayFormats": display_formats,
                        },
                        "title": { "display": true, "text": self.x_axis.title },
                    },
                    "y": {
                        "type": "linear",
                        "title": { "display": true, "text": self.y_axis.title },
                    },
                },
            },
        })
    }
}
