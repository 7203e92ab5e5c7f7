//! Marker popup HTML.
//!
//! A popup is a fixed header followed by an ordered list of sections:
//! labelled fields, the thumbnail image, then any video links. Every value
//! interpolated into the markup is HTML-escaped.

use std::fmt::Write as _;

use encampment_map_source_models::EncampmentRecord;

use crate::MapConfig;

/// Shown in place of an empty field.
const EMPTY_VALUE: &str = "N/A";

const HEADER_STYLE: &str = "font-family:Calibri;color:red;text-align:left";
const FIELD_STYLE: &str = "font-family:Calibri;color:green;text-align:left";
const IMAGE_STYLE: &str = "width:250px;height:200px;";

enum Section {
    Field {
        icon: &'static str,
        label: String,
        value: String,
    },
    Image {
        src: String,
        alt: String,
        fallback: Option<String>,
    },
    Link {
        label: String,
        url: String,
    },
}

/// Builds popup markup from a title and an ordered list of sections.
pub struct PopupBuilder {
    title: String,
    sections: Vec<Section>,
}

impl PopupBuilder {
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            sections: Vec::new(),
        }
    }

    /// Appends a labelled field. An empty `value` renders as `N/A`.
    #[must_use]
    pub fn field(mut self, icon: &'static str, label: &str, value: &str) -> Self {
        let value = if value.trim().is_empty() {
            EMPTY_VALUE
        } else {
            value
        };
        self.sections.push(Section::Field {
            icon,
            label: label.to_owned(),
            value: value.to_owned(),
        });
        self
    }

    /// Appends an image. If `fallback` is given and differs from `src`, the
    /// browser swaps to it when `src` fails to load.
    #[must_use]
    pub fn image(mut self, src: &str, alt: &str, fallback: Option<&str>) -> Self {
        self.sections.push(Section::Image {
            src: src.to_owned(),
            alt: alt.to_owned(),
            fallback: fallback.filter(|f| *f != src).map(str::to_owned),
        });
        self
    }

    /// Appends a video link. Links that are not `http(s)` URLs are skipped.
    #[must_use]
    pub fn link(mut self, label: &str, url: &str) -> Self {
        if is_web_url(url) {
            self.sections.push(Section::Link {
                label: label.to_owned(),
                url: url.to_owned(),
            });
        } else {
            log::debug!("Skipping non-web video link for {}: {url}", self.title);
        }
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        let mut html = String::new();

        write!(
            html,
            r#"<h4 style="{HEADER_STYLE}"><strong><u>{}</u></strong></h4>"#,
            html_escape::encode_text(&self.title)
        )
        .unwrap();

        for section in &self.sections {
            let written = match section {
                Section::Field { icon, label, value } => write!(
                    html,
                    r#"<h5 style="{FIELD_STYLE}"><strong><i class="{icon}"></i> {}:</strong> {}</h5>"#,
                    html_escape::encode_text(label),
                    html_escape::encode_text(value)
                ),
                Section::Image { src, alt, fallback } => write!(
                    html,
                    r#"<img src="{}" alt="{}" style="{IMAGE_STYLE}"{}>"#,
                    html_escape::encode_double_quoted_attribute(src),
                    html_escape::encode_double_quoted_attribute(alt),
                    fallback.as_deref().map_or_else(String::new, onerror_attribute)
                ),
                Section::Link { label, url } => write!(
                    html,
                    r#"<h6 style="{FIELD_STYLE}"><strong><i class="fa-solid fa-video"></i> Videos:</strong> <a href="{}" target="_blank" rel="noopener noreferrer">{}</a></h6>"#,
                    html_escape::encode_double_quoted_attribute(url),
                    html_escape::encode_text(label)
                ),
            };
            written.unwrap();
        }

        html
    }
}

/// `onerror` handler that replaces a broken image with `fallback` once.
fn onerror_attribute(fallback: &str) -> String {
    // A JSON string is a valid JS string literal.
    let literal = serde_json::Value::from(fallback).to_string();
    format!(
        r#" onerror="this.onerror=null;this.src={}""#,
        html_escape::encode_double_quoted_attribute(&literal)
    )
}

fn is_web_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Resolves a thumbnail reference to an image URL, falling back to the
/// configured default image.
#[must_use]
pub fn thumbnail_url(thumbnail_ref: Option<&str>, config: &MapConfig) -> String {
    let id = thumbnail_ref
        .filter(|id| !id.is_empty())
        .unwrap_or(&config.default_thumbnail_id);
    config.thumbnail_url_template.replace("{id}", id)
}

/// Builds the popup for one record.
#[must_use]
pub fn popup_html(record: &EncampmentRecord, config: &MapConfig) -> String {
    let arrests = record
        .num_arrests()
        .map_or_else(String::new, |n| n.to_string());

    let mut builder = PopupBuilder::new(record.name())
        .field("fa fa-map-marker", "Location", record.location())
        .field("fa-regular fa-calendar-days", "Start Date", record.start_date())
        .field("fa-solid fa-layer-group", "Status", record.status())
        .field("fa-solid fa-layer-group", "Category", record.category())
        .field(
            "fa-solid fa-handcuffs",
            "Police Violence Status",
            record.police_violence_status(),
        )
        .field("fa-solid fa-handcuffs", "Number of Arrests", &arrests)
        .image(
            &thumbnail_url(record.thumbnail_ref(), config),
            record.name(),
            Some(thumbnail_url(None, config).as_str()),
        );

    for video in record.video_links() {
        builder = builder.link(&video.label, &video.url);
    }

    builder.build()
}
