#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Record loader for the encampment spreadsheet.
//!
//! [`load`] downloads the CSV export named by a [`SourceDefinition`],
//! coerces each row's cells, and returns the rows that validate as
//! [`EncampmentRecord`]s, in source order, together with a [`LoadReport`]
//! of what was dropped or substituted along the way.
//!
//! [`EncampmentRecord`]: encampment_map_source_models::EncampmentRecord

pub mod fetch;
pub mod loader;
pub mod parsing;
pub mod progress;
pub mod source_def;
pub mod thumbnail;

use std::sync::Arc;

pub use loader::{LoadReport, LoadedRecords, parse_rows};
pub use source_def::{SourceDefinition, default_source, parse_source_toml};

use crate::progress::ProgressCallback;

/// Errors that can occur while loading records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The spreadsheet could not be downloaded. Fatal for the run.
    #[error("source unavailable at {url}: {source}")]
    SourceUnavailable {
        /// URL that was requested.
        url: String,
        /// Underlying HTTP failure.
        #[source]
        source: reqwest::Error,
    },

    /// The CSV stream could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the loader cannot do without is absent from the header.
    #[error("required column '{column}' not found in source header")]
    MissingColumn {
        /// Configured header name that was not found.
        column: String,
    },
}

/// Downloads and validates every row of `source`.
///
/// # Errors
///
/// Returns [`SourceError::SourceUnavailable`] if the download fails, or any
/// error from [`parse_rows`].
pub async fn load(
    source: &SourceDefinition,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<LoadedRecords, SourceError> {
    log::info!("[{}] Downloading {}", source.id, source.url);
    let bytes = fetch::fetch_csv(&source.url).await?;

    let loaded = parse_rows(&bytes, source, progress)?;

    let report = &loaded.report;
    log::info!(
        "[{}] {} rows read, {} retained, {} dropped ({} without coordinates, {} without a name)",
        source.id,
        report.total_rows,
        loaded.records.len(),
        report.dropped(),
        report.missing_coordinates,
        report.missing_name,
    );
    if report.missing_thumbnails + report.unparsable_thumbnails > 0 {
        log::info!(
            "[{}] {} records use the default thumbnail ({} blank, {} unrecognised)",
            source.id,
            report.missing_thumbnails + report.unparsable_thumbnails,
            report.missing_thumbnails,
            report.unparsable_thumbnails,
        );
    }

    Ok(loaded)
}
