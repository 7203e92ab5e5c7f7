#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Validated encampment record types.
//!
//! Every row pulled from the encampment spreadsheet that survives
//! validation becomes an [`EncampmentRecord`]. Records can only be built
//! through [`EncampmentRecord::new`], which derives the display location and
//! enforces the invariants the map renderer relies on: a non-empty name and
//! finite, in-range [`Coordinates`].

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// The category value that marks a site as an active encampment.
pub const ENCAMPMENT_CATEGORY: &str = "Encampment";

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair. Returns `None` if either value is not
    /// finite or lies outside the valid latitude/longitude range.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A labelled link to a video attached to a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLink {
    /// Link text shown in the popup (e.g., "Solidarity Actions Video 1").
    pub label: String,
    /// Target URL, passed through as-is from the spreadsheet.
    pub url: String,
}

/// Which marker glyph a site is drawn with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerIcon {
    /// Tent glyph, used for sites in the encampment category.
    Encampment,
    /// Cap glyph, used for every other category.
    Solidarity,
}

impl MarkerIcon {
    /// Chooses the glyph for a raw category value.
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        if category.trim() == ENCAMPMENT_CATEGORY {
            Self::Encampment
        } else {
            Self::Solidarity
        }
    }
}

/// Descriptive fields of a site, as read from one spreadsheet row.
///
/// This is the unvalidated input to [`EncampmentRecord::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteFields {
    /// University or site name.
    pub name: String,
    /// City the site is in.
    pub city: String,
    /// State (or province/country) the site is in.
    pub state: String,
    /// Current status text (e.g., "Active", "Ended").
    pub status: String,
    /// Category text; see [`ENCAMPMENT_CATEGORY`].
    pub category: String,
    /// Free-form start date, never parsed.
    pub start_date: String,
    /// Police violence status text.
    pub police_violence_status: String,
    /// Number of arrests, if known.
    pub num_arrests: Option<u32>,
    /// Opaque thumbnail identifier, if one could be extracted.
    pub thumbnail_ref: Option<String>,
    /// Video links in column order.
    pub video_links: Vec<VideoLink>,
}

/// One validated encampment or protest site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncampmentRecord {
    name: String,
    city: String,
    state: String,
    location: String,
    coordinates: Coordinates,
    status: String,
    category: String,
    start_date: String,
    police_violence_status: String,
    num_arrests: Option<u32>,
    thumbnail_ref: Option<String>,
    video_links: Vec<VideoLink>,
}

impl EncampmentRecord {
    /// Builds a record from raw site fields and validated coordinates.
    ///
    /// Text fields are trimmed and `location` is derived as
    /// `"{city}, {state}"`. Returns `None` if the trimmed name is empty.
    #[must_use]
    pub fn new(fields: SiteFields, coordinates: Coordinates) -> Option<Self> {
        let name = fields.name.trim().to_owned();
        if name.is_empty() {
            return None;
        }

        let city = fields.city.trim().to_owned();
        let state = fields.state.trim().to_owned();
        let location = derive_location(&city, &state);

        Some(Self {
            name,
            city,
            state,
            location,
            coordinates,
            status: fields.status.trim().to_owned(),
            category: fields.category.trim().to_owned(),
            start_date: fields.start_date.trim().to_owned(),
            police_violence_status: fields.police_violence_status.trim().to_owned(),
            num_arrests: fields.num_arrests,
            thumbnail_ref: fields.thumbnail_ref,
            video_links: fields.video_links,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// `"{city}, {state}"`, derived at construction.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    #[must_use]
    pub fn police_violence_status(&self) -> &str {
        &self.police_violence_status
    }

    #[must_use]
    pub const fn num_arrests(&self) -> Option<u32> {
        self.num_arrests
    }

    #[must_use]
    pub fn thumbnail_ref(&self) -> Option<&str> {
        self.thumbnail_ref.as_deref()
    }

    #[must_use]
    pub fn video_links(&self) -> &[VideoLink] {
        &self.video_links
    }

    /// Marker glyph for this record's category.
    #[must_use]
    pub fn marker_icon(&self) -> MarkerIcon {
        MarkerIcon::for_category(&self.category)
    }
}

fn derive_location(city: &str, state: &str) -> String {
    format!("{city}, {state}")
}
