use super::{Chart, PlotKind};
use serde::Serialize;

/// A figure in the shape `Plotly.newPlot(target, data, layout)` accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub margin: Margin,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl From<&Chart> for Figure {
    fn from(chart: &Chart) -> Self {
        let style = Style {
            color: chart.color.clone(),
        };
        let data = chart
            .series
            .iter()
            .map(|y| match chart.kind {
                PlotKind::Line => Trace {
                    x: chart.x.clone(),
                    y: y.clone(),
                    trace_type: "scatter",
                    mode: Some("lines"),
                    line: Some(style.clone()),
                    marker: None,
                },
                PlotKind::Bar => Trace {
                    x: chart.x.clone(),
                    y: y.clone(),
                    trace_type: "bar",
                    mode: None,
                    line: None,
                    marker: Some(style.clone()),
                },
            })
            .collect();
        Figure {
            data,
            layout: Layout {
                margin: Margin { t: 0 },
                xaxis: Axis {
                    title: Title {
                        text: chart.x_title.clone(),
                    },
                },
                yaxis: Axis {
                    title: Title {
                        text: chart.y_title.clone(),
                    },
                },
            },
        }
    }
}
