use crate::{service::filesystem, Error, Result};
use std::{env, path::PathBuf, str::FromStr};
use strum::{Display, EnumString};
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/";
const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// What to do with a response whose submission is no longer the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum StalePolicy {
    Discard,
    Accept,
}

pub struct Conf {
    pub backend_url: Url,
    pub output_dir: PathBuf,
    pub tile_url: String,
    pub tile_attribution: String,
    pub stale_responses: StalePolicy,
}

impl Conf {
    pub fn from_env() -> Result<Conf> {
        Conf::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Conf> {
        let backend_url = lookup("ROI_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL.into());
        let backend_url = parse_base_url(&backend_url)?;
        let output_dir = match lookup("ROI_OUTPUT_DIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => filesystem::default_output_dir()?,
        };
        let stale_responses = match lookup("ROI_STALE_RESPONSES") {
            Some(policy) => StalePolicy::from_str(&policy).map_err(|_| {
                Error::InvalidInput(format!(
                    "ROI_STALE_RESPONSES should be discard or accept, got: {policy}"
                ))
            })?,
            None => StalePolicy::Discard,
        };
        Ok(Conf {
            backend_url,
            output_dir,
            tile_url: lookup("ROI_TILE_URL").unwrap_or(DEFAULT_TILE_URL.into()),
            tile_attribution: lookup("ROI_TILE_ATTRIBUTION")
                .unwrap_or(DEFAULT_TILE_ATTRIBUTION.into()),
            stale_responses,
        })
    }
}

// Url::join drops the last path segment unless the base ends with a slash
fn parse_base_url(url: &str) -> Result<Url> {
    let mut url = Url::parse(url)
        .map_err(|e| Error::InvalidInput(format!("Invalid backend URL {url}: {e}")))?;
    if url.cannot_be_a_base() {
        Err(Error::InvalidInput(format!(
            "Backend URL can't be used as a base: {url}"
        )))?
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
