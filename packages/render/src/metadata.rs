//! Generation metadata written next to the map.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::RenderError;

/// Contents of `version.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMetadata {
    /// When the map was last generated, `YYYY-MM-DD HH:MM:SS.ffffff`.
    pub last_updated: String,
}

impl VersionMetadata {
    #[must_use]
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            last_updated: now.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        }
    }
}

/// Writes `filename` in `dir` recording `now` as the generation time.
///
/// # Errors
///
/// Returns [`RenderError`] if serialisation or the file write fails.
pub fn write_version<Tz: TimeZone>(
    dir: &Path,
    filename: &str,
    now: &DateTime<Tz>,
) -> Result<PathBuf, RenderError>
where
    Tz::Offset: std::fmt::Display,
{
    let path = dir.join(filename);
    let json = serde_json::to_string(&VersionMetadata::at(now))?;
    std::fs::write(&path, json)?;
    log::info!("Wrote generation metadata to {}", path.display());
    Ok(path)
}
