#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static map rendering for validated encampment records.
//!
//! Produces a single self-contained Leaflet HTML page with one marker per
//! record, each carrying an HTML popup, plus a small `version.json` that
//! records when the page was generated.

pub mod bounds;
pub mod document;
pub mod metadata;
pub mod popup;

use std::path::{Path, PathBuf};

use encampment_map_source_models::EncampmentRecord;
use serde::Serialize;

pub use document::render_document;
pub use metadata::write_version;

/// Errors that can occur while rendering or writing output files.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An output file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Map data could not be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">\
                                OpenStreetMap</a> contributors &copy; \
                                <a href=\"https://carto.com/attributions\">CARTO</a>";

/// A raster tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    /// Leaflet URL template.
    pub url: String,
    /// Attribution HTML shown in the map corner.
    pub attribution: String,
}

/// Fixed visual configuration of the generated map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Page title.
    pub title: String,
    /// Initial view centre, `[lat, lng]`.
    pub center: [f64; 2],
    pub zoom_start: u8,
    pub max_zoom: u8,
    /// Degrees added on every side of the records' bounding box.
    pub bounds_padding: f64,
    pub tiles: TileLayer,
    /// Marker image for the encampment category.
    pub encampment_icon: String,
    /// Marker image for every other category.
    pub solidarity_icon: String,
    /// Marker edge length in pixels.
    pub icon_size: u32,
    pub popup_max_width: u32,
    /// Image URL template; `{id}` is replaced with the thumbnail reference.
    pub thumbnail_url_template: String,
    /// Thumbnail shown when a record has none.
    pub default_thumbnail_id: String,
    /// Name of the generated HTML document.
    pub output_filename: String,
    /// Name of the generation metadata file.
    pub metadata_filename: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Student Encampments Map".to_string(),
            // Geographic centre of the contiguous United States.
            center: [37.0902, -95.7129],
            zoom_start: 3,
            max_zoom: 12,
            bounds_padding: 10.0,
            tiles: TileLayer {
                url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
                attribution: TILE_ATTRIBUTION.to_string(),
            },
            encampment_icon: "images/tent.png".to_string(),
            solidarity_icon: "images/cap.png".to_string(),
            icon_size: 60,
            popup_max_width: 300,
            thumbnail_url_template: "https://drive.google.com/thumbnail?id={id}&sz=w320"
                .to_string(),
            default_thumbnail_id: "1y7nBpt24WcKlb5qD1vtb0N2i1JxKVhw9".to_string(),
            output_filename: "encampments_map.html".to_string(),
            metadata_filename: "version.json".to_string(),
        }
    }
}

/// Renders `records` and writes the HTML document into `dir`.
///
/// # Errors
///
/// Returns [`RenderError`] if rendering or the file write fails.
pub fn write_map(
    dir: &Path,
    records: &[EncampmentRecord],
    config: &MapConfig,
) -> Result<PathBuf, RenderError> {
    let html = render_document(records, config)?;
    let path = dir.join(&config.output_filename);
    std::fs::write(&path, html)?;
    log::info!("Wrote {} markers to {}", records.len(), path.display());
    Ok(path)
}
