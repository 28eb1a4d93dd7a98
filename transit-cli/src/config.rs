use std::path::Path;

use anyhow::Context;
use transit_core::RenderSettings;

const DEFAULT_RENDER_SETTINGS: &str = include_str!("../assets/render_settings.json");

pub(crate) const DEFAULT_BUS_WAIT_TIME: &str = "6";
pub(crate) const DEFAULT_BUS_VELOCITY: &str = "40";

pub(crate) fn load_render_settings(path: Option<&Path>) -> anyhow::Result<RenderSettings> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .with_context(|| format!("read render settings {:?}", p))?;
            serde_json::from_str(&raw).with_context(|| format!("parse render settings {:?}", p))
        }
        None => serde_json::from_str(DEFAULT_RENDER_SETTINGS).context("parse embedded render settings"),
    }
}
