pub mod dashboard;
pub use dashboard::Dashboard;

pub mod plotly;
pub use plotly::Figure;

pub mod renderer;
pub use renderer::RenderOutcome;
pub use renderer::ResponseRenderer;

use serde::Serialize;
use strum::{AsRefStr, Display};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, Serialize,
)]
pub enum ImageSlot {
    #[strum(serialize = "landcover_img")]
    #[serde(rename = "landcover_img")]
    Landcover,
    #[strum(serialize = "pop_graph_img")]
    #[serde(rename = "pop_graph_img")]
    PopulationGraph,
    #[strum(serialize = "built_graph_img")]
    #[serde(rename = "built_graph_img")]
    BuiltGraph,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, Serialize,
)]
pub enum ChartSlot {
    #[strum(serialize = "pop-graph")]
    #[serde(rename = "pop-graph")]
    Population,
    #[strum(serialize = "pop-change-graph")]
    #[serde(rename = "pop-change-graph")]
    PopulationChange,
    #[strum(serialize = "built-area-graph")]
    #[serde(rename = "built-area-graph")]
    BuiltArea,
    #[strum(serialize = "built-change-graph")]
    #[serde(rename = "built-change-graph")]
    BuiltAreaChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    Line,
    Bar,
}

/// Input of the charting capability: one category axis and one or more series over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: PlotKind,
    pub x: Vec<String>,
    pub series: Vec<Vec<Option<f64>>>,
    pub x_title: String,
    pub y_title: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayedImage {
    pub src: String,
    #[serde(skip)]
    pub inline: Option<InlineImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ServerReported,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: FailureKind,
    pub message: String,
}

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to communicate with the server. Check the console for details.";

impl Notification {
    pub fn server(error: &str) -> Notification {
        Notification {
            kind: FailureKind::ServerReported,
            message: format!("Error: {error}"),
        }
    }

    pub fn transport() -> Notification {
        Notification {
            kind: FailureKind::Transport,
            message: TRANSPORT_FAILURE_MESSAGE.into(),
        }
    }
}

pub trait ImageDisplay {
    fn show_image(&mut self, slot: ImageSlot, image: DisplayedImage);
}

pub trait ChartSurface {
    fn plot(&mut self, slot: ChartSlot, chart: &Chart);
}

pub trait FailureNotifier {
    fn notify_failure(&mut self, notification: Notification);
}
