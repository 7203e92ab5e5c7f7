//! Config-driven spreadsheet definition.
//!
//! [`SourceDefinition`] names the download URL and the header of every
//! column the loader reads. The encampment sheet's definition is baked into
//! the binary at compile time via [`include_str!`], so changing a column
//! name in the spreadsheet only means editing `sources/encampments.toml`.

use serde::Deserialize;

/// The encampment spreadsheet definition, embedded at compile time.
const ENCAMPMENTS_TOML: &str = include_str!("../sources/encampments.toml");

/// A complete description of one tabular source.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDefinition {
    /// Unique identifier (e.g., `"encampments"`).
    pub id: String,
    /// Human-readable name used in log messages.
    pub name: String,
    /// URL of the CSV export.
    pub url: String,
    /// Header names for each record field.
    pub columns: ColumnMapping,
    /// Video columns, in the order their links appear in a popup.
    #[serde(default)]
    pub videos: Vec<VideoColumn>,
}

/// Header names of the columns that feed an encampment record.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    /// Site name column. Required.
    pub name: String,
    /// City column.
    pub city: String,
    /// State column.
    pub state: String,
    /// Latitude column. Required.
    pub latitude: String,
    /// Longitude column. Required.
    pub longitude: String,
    /// Thumbnail photo link column.
    pub thumbnail: String,
    /// Status column.
    pub status: String,
    /// Category column.
    pub category: String,
    /// Start date column.
    pub start_date: String,
    /// Police violence status column.
    pub police_violence_status: String,
    /// Number of arrests column.
    pub arrests: String,
}

/// A column holding an optional video link.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoColumn {
    /// Header name.
    pub column: String,
    /// Link text shown in the popup.
    pub label: String,
}

/// Parses a source definition from TOML.
///
/// # Errors
///
/// Returns [`toml::de::Error`] if the TOML is malformed or a required key
/// is missing.
pub fn parse_source_toml(toml_str: &str) -> Result<SourceDefinition, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns the embedded encampment spreadsheet definition.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (checked by tests, since the
/// config is compiled into the binary).
#[must_use]
pub fn default_source() -> SourceDefinition {
    parse_source_toml(ENCAMPMENTS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse encampments.toml: {e}"))
}
