//! Static Leaflet document.
//!
//! The page template is embedded at compile time. Everything the page needs
//! (view settings, icons, and one entry per marker) is serialised into a
//! single JSON block that the template's script reads on load.

use std::collections::BTreeMap;

use encampment_map_source_models::{EncampmentRecord, MarkerIcon};
use serde::Serialize;

use crate::bounds::BoundingBox;
use crate::popup::popup_html;
use crate::{MapConfig, RenderError, TileLayer};

const TEMPLATE: &str = include_str!("../templates/map.html");
const TITLE_PLACEHOLDER: &str = "__TITLE__";
const DATA_PLACEHOLDER: &str = "__MAP_DATA__";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IconStyle<'a> {
    url: &'a str,
    size: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerData {
    lat: f64,
    lng: f64,
    icon: MarkerIcon,
    /// Leaflet renders tooltip strings as HTML, so this is escaped text.
    tooltip: String,
    popup: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MapData<'a> {
    center: [f64; 2],
    zoom_start: u8,
    max_zoom: u8,
    max_bounds: Option<[[f64; 2]; 2]>,
    tiles: &'a TileLayer,
    icons: BTreeMap<MarkerIcon, IconStyle<'a>>,
    popup_max_width: u32,
    markers: Vec<MarkerData>,
}

/// Renders the complete HTML document for `records`.
///
/// The pan bounds cover every record plus `config.bounds_padding`. With no
/// records the map is left unbounded.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if the marker data cannot be serialised.
pub fn render_document(
    records: &[EncampmentRecord],
    config: &MapConfig,
) -> Result<String, RenderError> {
    let max_bounds = BoundingBox::covering(records)
        .map(|bbox| bbox.padded(config.bounds_padding).corners());

    let icons = BTreeMap::from([
        (
            MarkerIcon::Encampment,
            IconStyle {
                url: &config.encampment_icon,
                size: config.icon_size,
            },
        ),
        (
            MarkerIcon::Solidarity,
            IconStyle {
                url: &config.solidarity_icon,
                size: config.icon_size,
            },
        ),
    ]);

    let markers = records
        .iter()
        .map(|record| MarkerData {
            lat: record.latitude(),
            lng: record.longitude(),
            icon: record.marker_icon(),
            tooltip: html_escape::encode_text(record.name()).into_owned(),
            popup: popup_html(record, config),
        })
        .collect();

    let data = MapData {
        center: config.center,
        zoom_start: config.zoom_start,
        max_zoom: config.max_zoom,
        max_bounds,
        tiles: &config.tiles,
        icons,
        popup_max_width: config.popup_max_width,
        markers,
    };

    // `</` inside the JSON would close the surrounding <script> element.
    let json = serde_json::to_string(&data)?.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace(TITLE_PLACEHOLDER, &html_escape::encode_text(&config.title))
        .replace(DATA_PLACEHOLDER, &json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encampment_map_source_models::{Coordinates, SiteFields};

    fn record(name: &str, category: &str, lat: f64, lon: f64) -> EncampmentRecord {
        let fields = SiteFields {
            name: name.to_string(),
            city: "City".to_string(),
            state: "ST".to_string(),
            category: category.to_string(),
            ..SiteFields::default()
        };
        EncampmentRecord::new(fields, Coordinates::new(lat, lon).unwrap()).unwrap()
    }

    fn map_data(html: &str) -> serde_json::Value {
        let start = html.find(r#"id="map-data">"#).unwrap() + r#"id="map-data">"#.len();
        let end = start + html[start..].find("</script>").unwrap();
        serde_json::from_str(&html[start..end]).unwrap()
    }

    #[test]
    fn one_marker_per_record_without_dedup() {
        let records = vec![
            record("Site A", "Encampment", 40.7, -74.0),
            record("Site B", "Solidarity", 40.7, -74.0),
        ];
        let html = render_document(&records, &MapConfig::default()).unwrap();
        let data = map_data(&html);
        let markers = data["markers"].as_array().unwrap();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0]["tooltip"], "Site A");
        assert_eq!(markers[0]["icon"], "encampment");
        assert_eq!(markers[1]["icon"], "solidarity");
    }

    #[test]
    fn tooltip_is_escaped_text() {
        let records = vec![record("<img src=x onerror=alert(1)>", "Encampment", 40.0, -74.0)];
        let html = render_document(&records, &MapConfig::default()).unwrap();
        assert!(!html.contains("<img src=x"));
        assert_eq!(
            map_data(&html)["markers"][0]["tooltip"],
            "&lt;img src=x onerror=alert(1)&gt;"
        );
    }

    #[test]
    fn bounds_are_padded() {
        let records = vec![
            record("Site A", "Encampment", 40.0, -74.0),
            record("Site B", "Encampment", 30.0, -97.0),
        ];
        let html = render_document(&records, &MapConfig::default()).unwrap();
        let bounds = &map_data(&html)["maxBounds"];
        assert_eq!(bounds[0][0], 20.0);
        assert_eq!(bounds[0][1], -107.0);
        assert_eq!(bounds[1][0], 50.0);
        assert_eq!(bounds[1][1], -64.0);
    }

    #[test]
    fn empty_record_set_renders_unbounded_map() {
        let html = render_document(&[], &MapConfig::default()).unwrap();
        let data = map_data(&html);
        assert!(data["maxBounds"].is_null());
        assert!(data["markers"].as_array().unwrap().is_empty());
    }

    #[test]
    fn embedded_json_cannot_close_script() {
        let records = vec![record("</script><b>x</b>", "Encampment", 40.0, -74.0)];
        let html = render_document(&records, &MapConfig::default()).unwrap();
        let data_block = html.split(r#"id="map-data">"#).nth(1).unwrap();
        let first_close = data_block.find("</script>").unwrap();
        assert!(!data_block[..first_close].contains("</"));
        assert_eq!(
            map_data(&html)["markers"][0]["tooltip"],
            "&lt;/script&gt;&lt;b&gt;x&lt;/b&gt;"
        );
    }

    #[test]
    fn fills_title_and_icon_paths() {
        let html = render_document(&[], &MapConfig::default()).unwrap();
        assert!(!html.contains(TITLE_PLACEHOLDER));
        assert!(!html.contains(DATA_PLACEHOLDER));
        let data = map_data(&html);
        assert_eq!(data["icons"]["encampment"]["url"], "images/tent.png");
        assert_eq!(data["icons"]["solidarity"]["url"], "images/cap.png");
        assert_eq!(data["zoomStart"], 3);
        assert_eq!(data["maxZoom"], 12);
    }
}
