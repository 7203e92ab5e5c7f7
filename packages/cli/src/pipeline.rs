//! fetch -> validate -> render -> write, strictly in sequence.

use std::path::Path;
use std::time::Instant;

use encampment_map_cli_utils::{IndicatifProgress, MultiProgress};
use encampment_map_render::MapConfig;

/// Runs the whole pipeline, writing outputs into `out_dir`.
///
/// # Errors
///
/// Returns an error if the spreadsheet cannot be downloaded or parsed, or
/// if an output file cannot be written.
pub async fn run(multi: &MultiProgress, out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let source = encampment_map_source::default_source();
    let config = MapConfig::default();

    let progress = IndicatifProgress::rows_bar(multi, &format!("Loading {}", source.name));
    let loaded = encampment_map_source::load(&source, &progress).await?;

    if loaded.records.is_empty() {
        log::warn!("No rows had usable coordinates; the map will be empty");
    }

    let map_path = encampment_map_render::write_map(out_dir, &loaded.records, &config)?;
    encampment_map_render::write_version(
        out_dir,
        &config.metadata_filename,
        &chrono::Local::now(),
    )?;

    log::info!(
        "Map regenerated at {} in {:.1}s",
        map_path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
