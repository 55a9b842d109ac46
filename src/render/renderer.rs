use super::{
    Chart, ChartSlot, ChartSurface, DisplayedImage, FailureNotifier, ImageDisplay, ImageSlot,
    InlineImage, Notification, PlotKind,
};
use crate::{
    analysis::{
        model::{BUILT_AREA_DATA, POPULATION_DATA},
        AnalysisResponse, Field, ImageRef, Series,
    },
    Error,
};
use tracing::{error, info, warn};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered { updated: usize },
    ServerError(String),
}

struct SeriesTargets {
    name: &'static str,
    label: &'static str,
    line: ChartSlot,
    bar: ChartSlot,
    line_color: &'static str,
    bar_color: &'static str,
    y_title: &'static str,
}

const POPULATION: SeriesTargets = SeriesTargets {
    name: POPULATION_DATA,
    label: "population",
    line: ChartSlot::Population,
    bar: ChartSlot::PopulationChange,
    line_color: "#3B82F6",
    bar_color: "#10B981",
    y_title: "Population",
};

const BUILT_AREA: SeriesTargets = SeriesTargets {
    name: BUILT_AREA_DATA,
    label: "built area",
    line: ChartSlot::BuiltArea,
    bar: ChartSlot::BuiltAreaChange,
    line_color: "#EF4444",
    bar_color: "#F59E0B",
    y_title: "Built-up Area",
};

const DATE_TITLE: &str = "Date";
const CHANGE_TITLE: &str = "Change (%)";

/// Fans a backend response out to the image slots and charts.
pub struct ResponseRenderer<T> {
    targets: T,
    base_url: Url,
}

impl<T: ImageDisplay + ChartSurface + FailureNotifier> ResponseRenderer<T> {
    pub fn new(targets: T, base_url: Url) -> ResponseRenderer<T> {
        ResponseRenderer { targets, base_url }
    }

    pub fn targets(&self) -> &T {
        &self.targets
    }

    pub fn on_response(&mut self, res: &AnalysisResponse) -> RenderOutcome {
        if let Some(err) = &res.error {
            error!(err, "Server error");
            self.targets.notify_failure(Notification::server(err));
            return RenderOutcome::ServerError(err.clone());
        }

        let mut updated = 0;

        match &res.landcover {
            Field::Absent => warn!("No landcover image received"),
            landcover => updated += self.show_image(ImageSlot::Landcover, "landcover", landcover),
        }

        updated += self.plot_series(&POPULATION, &res.population_data);
        updated += self.plot_series(&BUILT_AREA, &res.built_area_data);

        // Pre-rendered graphs are only sent by legacy backends
        if !res.pop_graph.is_absent() {
            updated += self.show_image(ImageSlot::PopulationGraph, "pop_graph", &res.pop_graph);
        }
        if !res.built_graph.is_absent() {
            updated += self.show_image(ImageSlot::BuiltGraph, "built_graph", &res.built_graph);
        }

        info!(updated, "Rendered analysis response");
        RenderOutcome::Rendered { updated }
    }

    pub fn on_transport_failure(&mut self, err: &Error) {
        error!(%err, "Failed to communicate with the server");
        self.targets.notify_failure(Notification::transport());
    }

    fn show_image(&mut self, slot: ImageSlot, name: &str, field: &Field<ImageRef>) -> usize {
        let image = match field {
            Field::Present(ImageRef::Path(path)) => match resolve(&self.base_url, path) {
                Ok(url) => DisplayedImage {
                    src: url.to_string(),
                    inline: None,
                },
                Err(e) => {
                    warn!(name, path, %e, "Can't resolve image reference");
                    return 0;
                }
            },
            Field::Present(ImageRef::Inline { uri, mime, bytes }) => DisplayedImage {
                src: uri.clone(),
                inline: Some(InlineImage {
                    mime: mime.clone(),
                    bytes: bytes.clone(),
                }),
            },
            Field::Malformed(reason) => {
                warn!(name, reason, "Skipping malformed image");
                return 0;
            }
            Field::Absent => return 0,
        };
        self.targets.show_image(slot, image);
        1
    }

    fn plot_series(&mut self, targets: &SeriesTargets, field: &Field<Series>) -> usize {
        let series = match field {
            Field::Present(series) => series,
            Field::Absent => {
                warn!(name = targets.name, "No valid {} data received", targets.label);
                return 0;
            }
            Field::Malformed(reason) => {
                warn!(
                    name = targets.name,
                    reason, "No valid {} data received", targets.label
                );
                return 0;
            }
        };

        self.targets.plot(
            targets.line,
            &Chart {
                kind: PlotKind::Line,
                x: series.date.clone(),
                series: vec![series.values.clone()],
                x_title: DATE_TITLE.into(),
                y_title: targets.y_title.into(),
                color: targets.line_color.into(),
            },
        );

        match &series.change {
            Field::Present(change) => {
                self.targets.plot(
                    targets.bar,
                    &Chart {
                        kind: PlotKind::Bar,
                        x: series.date.clone(),
                        series: vec![change.clone()],
                        x_title: DATE_TITLE.into(),
                        y_title: CHANGE_TITLE.into(),
                        color: targets.bar_color.into(),
                    },
                );
                2
            }
            Field::Absent => {
                warn!(name = targets.name, "No change values, skipping bar chart");
                1
            }
            Field::Malformed(reason) => {
                warn!(
                    name = targets.name,
                    reason, "Malformed change values, skipping bar chart"
                );
                1
            }
        }
    }
}

/// Appends a backend-relative image path to the base address.
///
/// Absolute `http(s)` URLs are used as is. Anything else, including leading
/// slashes and colons, stays under the base path.
fn resolve(base_url: &Url, path: &str) -> Result<Url, url::ParseError> {
    if let Ok(url) = Url::parse(path) {
        if matches!(url.scheme(), "http" | "https") {
            return Ok(url);
        }
    }
    base_url.join(&format!("./{}", path.trim_start_matches('/')))
}
