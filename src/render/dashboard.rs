use super::{
    Chart, ChartSlot, ChartSurface, DisplayedImage, FailureNotifier, Figure, ImageDisplay,
    ImageSlot, Notification,
};
use crate::{conf::Conf, service::filesystem::output_file_path, Result};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};
use tracing::{info, warn};

const DEFAULT_CENTER: [f64; 2] = [20.5937, 78.9629];
const DEFAULT_ZOOM: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseMap {
    pub tile_url: String,
    pub attribution: String,
    pub center: [f64; 2],
    pub zoom: u8,
}

/// In-memory state of every rendering target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub basemap: BaseMap,
    pub images: BTreeMap<ImageSlot, DisplayedImage>,
    pub charts: BTreeMap<ChartSlot, Figure>,
    pub notifications: Vec<Notification>,
}

impl Dashboard {
    pub fn new(conf: &Conf) -> Dashboard {
        Dashboard {
            basemap: BaseMap {
                tile_url: conf.tile_url.clone(),
                attribution: conf.tile_attribution.clone(),
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
            images: BTreeMap::new(),
            charts: BTreeMap::new(),
            notifications: vec![],
        }
    }

    /// Writes `dashboard.json`, one Plotly figure per chart and decoded inline images.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = vec![];

        let path = output_file_path(dir, "dashboard.json")?;
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        written.push(path);

        for (slot, figure) in &self.charts {
            let path = output_file_path(dir, &format!("{slot}.json"))?;
            fs::write(&path, serde_json::to_string_pretty(figure)?)?;
            written.push(path);
        }

        for (slot, image) in &self.images {
            let Some(inline) = &image.inline else {
                continue;
            };
            let Some(ext) = extension(&inline.mime) else {
                warn!(%slot, mime = inline.mime, "Unexpected inline image type");
                continue;
            };
            let path = output_file_path(dir, &format!("{slot}.{ext}"))?;
            fs::write(&path, &inline.bytes)?;
            written.push(path);
        }

        info!(dir = %dir.display(), files = written.len(), "Saved dashboard");
        Ok(written)
    }
}

fn extension(mime: &str) -> Option<&str> {
    let subtype = mime.split(';').next()?.trim().strip_prefix("image/")?;
    match subtype {
        "" => None,
        "svg+xml" => Some("svg"),
        "jpeg" => Some("jpg"),
        other => Some(other),
    }
}

impl ImageDisplay for Dashboard {
    fn show_image(&mut self, slot: ImageSlot, image: DisplayedImage) {
        self.images.insert(slot, image);
    }
}

impl ChartSurface for Dashboard {
    fn plot(&mut self, slot: ChartSlot, chart: &Chart) {
        self.charts.insert(slot, Figure::from(chart));
    }
}

impl FailureNotifier for Dashboard {
    fn notify_failure(&mut self, notification: Notification) {
        eprintln!("{}", notification.message);
        self.notifications.push(notification);
    }
}
