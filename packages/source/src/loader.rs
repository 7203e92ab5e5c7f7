//! Row validation: turns raw CSV rows into [`EncampmentRecord`]s.
//!
//! Malformed cells never fail the run. Rows without usable coordinates or a
//! name are dropped and counted, and thumbnail links that cannot be parsed
//! are replaced by `None`. Only a broken header (a missing required column)
//! or an unreadable CSV stream is an error.

use std::sync::Arc;

use csv::StringRecord;
use encampment_map_source_models::{EncampmentRecord, SiteFields, VideoLink};

use crate::SourceError;
use crate::parsing::{parse_arrests, parse_lat_lng};
use crate::progress::ProgressCallback;
use crate::source_def::{SourceDefinition, VideoColumn};
use crate::thumbnail::extract_thumbnail_id;

/// Counts collected while validating rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read from the source (header excluded).
    pub total_rows: usize,
    /// Rows dropped for a missing or invalid latitude/longitude.
    pub missing_coordinates: usize,
    /// Rows dropped for an empty site name.
    pub missing_name: usize,
    /// Retained rows with a blank thumbnail cell.
    pub missing_thumbnails: usize,
    /// Retained rows whose thumbnail link held no identifier.
    pub unparsable_thumbnails: usize,
}

impl LoadReport {
    /// Total number of dropped rows.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.missing_coordinates + self.missing_name
    }

    /// Number of rows that made it into the record set.
    #[must_use]
    pub const fn retained(&self) -> usize {
        self.total_rows - self.dropped()
    }
}

/// The validated record set plus diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    /// Retained records in source row order.
    pub records: Vec<EncampmentRecord>,
    /// Drop and fallback counts.
    pub report: LoadReport,
}

/// Header positions of the configured columns.
struct ColumnLayout<'a> {
    name: usize,
    latitude: usize,
    longitude: usize,
    city: Option<usize>,
    state: Option<usize>,
    thumbnail: Option<usize>,
    status: Option<usize>,
    category: Option<usize>,
    start_date: Option<usize>,
    police_violence_status: Option<usize>,
    arrests: Option<usize>,
    videos: Vec<(&'a VideoColumn, Option<usize>)>,
}

impl<'a> ColumnLayout<'a> {
    fn resolve(headers: &[String], source: &'a SourceDefinition) -> Result<Self, SourceError> {
        let columns = &source.columns;

        let find = |column: &str| {
            let index = headers.iter().position(|h| h == column);
            if index.is_none() {
                log::warn!(
                    "[{}] Column '{column}' not found; treating it as empty",
                    source.id
                );
            }
            index
        };
        let require = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| SourceError::MissingColumn {
                    column: column.to_owned(),
                })
        };

        Ok(Self {
            name: require(&columns.name)?,
            latitude: require(&columns.latitude)?,
            longitude: require(&columns.longitude)?,
            city: find(&columns.city),
            state: find(&columns.state),
            thumbnail: find(&columns.thumbnail),
            status: find(&columns.status),
            category: find(&columns.category),
            start_date: find(&columns.start_date),
            police_violence_status: find(&columns.police_violence_status),
            arrests: find(&columns.arrests),
            videos: source
                .videos
                .iter()
                .map(|video| (video, find(&video.column)))
                .collect(),
        })
    }
}

/// Returns the trimmed cell at `index`, or `""` when the column or cell is
/// absent.
fn cell(row: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| row.get(i)).map_or("", str::trim)
}

/// Parses and validates the raw CSV bytes of a source.
///
/// # Errors
///
/// Returns [`SourceError::MissingColumn`] if the header lacks the name,
/// latitude, or longitude column, and [`SourceError::Csv`] if the header or
/// the CSV stream cannot be read. Invalid UTF-8 inside a data cell is not an
/// error; the offending bytes become U+FFFD.
pub fn parse_rows(
    bytes: &[u8],
    source: &SourceDefinition,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<LoadedRecords, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_owned())
        .collect();

    let layout = ColumnLayout::resolve(&headers, source)?;

    // Cells that are not valid UTF-8 are decoded lossily rather than
    // failing the row or the run.
    let rows = reader
        .byte_records()
        .map(|row| row.map(StringRecord::from_byte_record_lossy))
        .collect::<Result<Vec<_>, _>>()?;
    progress.set_total(rows.len() as u64);

    let mut loaded = LoadedRecords::default();

    for (i, row) in rows.iter().enumerate() {
        // Row 1 of the sheet is the header.
        let sheet_row = i + 2;
        loaded.report.total_rows += 1;
        progress.inc(1);

        let name = cell(row, Some(layout.name));

        let Some(coordinates) = parse_lat_lng(
            cell(row, Some(layout.latitude)),
            cell(row, Some(layout.longitude)),
        ) else {
            log::debug!(
                "[{}] Row {sheet_row} ({name}): no usable coordinates, dropped",
                source.id
            );
            loaded.report.missing_coordinates += 1;
            continue;
        };

        if name.is_empty() {
            log::debug!("[{}] Row {sheet_row}: empty name, dropped", source.id);
            loaded.report.missing_name += 1;
            continue;
        }

        let thumbnail_ref = resolve_thumbnail(
            cell(row, layout.thumbnail),
            name,
            &mut loaded.report,
        );

        let video_links = layout
            .videos
            .iter()
            .filter_map(|(video, index)| {
                let url = cell(row, *index);
                (!url.is_empty()).then(|| VideoLink {
                    label: video.label.clone(),
                    url: url.to_owned(),
                })
            })
            .collect();

        let fields = SiteFields {
            name: name.to_owned(),
            city: cell(row, layout.city).to_owned(),
            state: cell(row, layout.state).to_owned(),
            status: cell(row, layout.status).to_owned(),
            category: cell(row, layout.category).to_owned(),
            start_date: cell(row, layout.start_date).to_owned(),
            police_violence_status: cell(row, layout.police_violence_status).to_owned(),
            num_arrests: parse_arrests(cell(row, layout.arrests)),
            thumbnail_ref,
            video_links,
        };

        match EncampmentRecord::new(fields, coordinates) {
            Some(record) => loaded.records.push(record),
            None => loaded.report.missing_name += 1,
        }
    }

    progress.finish(format!(
        "{}: {} of {} rows retained",
        source.name,
        loaded.report.retained(),
        loaded.report.total_rows
    ));

    Ok(loaded)
}

fn resolve_thumbnail(link: &str, name: &str, report: &mut LoadReport) -> Option<String> {
    if link.is_empty() {
        log::debug!("No thumbnail for {name}, using default image");
        report.missing_thumbnails += 1;
        return None;
    }

    let id = extract_thumbnail_id(link);
    if id.is_none() {
        log::warn!("Unrecognised thumbnail link for {name}: {link}");
        report.unparsable_thumbnails += 1;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::null_progress;
    use crate::source_def::default_source;

    const HEADER: &str = "University Name,City,State,Latitude,Longitude,Thumbnail Photo,\
                          Status,Category,Encampment Start Date,Police Violence Status,\
                          Number of Arrests,Police Violence,Video_1,Video_2";

    fn parse(rows: &[&str]) -> LoadedRecords {
        let csv = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        parse_rows(csv.as_bytes(), &default_source(), &null_progress()).unwrap()
    }

    #[test]
    fn retains_valid_row() {
        let loaded = parse(&[
            "Site A,New York,NY,40.7,-74.0,,Active,Encampment,4/17/2024,None,0,,,",
        ]);
        assert_eq!(loaded.records.len(), 1);
        let record = &loaded.records[0];
        assert_eq!(record.location(), "New York, NY");
        assert!((record.latitude() - 40.7).abs() < f64::EPSILON);
        assert!((record.longitude() - -74.0).abs() < f64::EPSILON);
        assert_eq!(record.num_arrests(), Some(0));
    }

    #[test]
    fn drops_row_with_non_numeric_latitude() {
        let loaded = parse(&[
            "Site A,New York,NY,40.7,-74.0,,,,,,,,,",
            "Site B,Boston,MA,N/A,-71.0,,,,,,,,,",
        ]);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.report.missing_coordinates, 1);
        assert_eq!(loaded.report.total_rows, 2);
    }

    #[test]
    fn drops_row_with_empty_longitude() {
        let loaded = parse(&["Site A,New York,NY,40.7,,,,,,,,,,"]);
        assert!(loaded.records.is_empty());
        assert_eq!(loaded.report.dropped(), 1);
    }

    #[test]
    fn drops_row_with_empty_name() {
        let loaded = parse(&[" ,New York,NY,40.7,-74.0,,,,,,,,,"]);
        assert!(loaded.records.is_empty());
        assert_eq!(loaded.report.missing_name, 1);
    }

    #[test]
    fn preserves_row_order_and_duplicates() {
        let loaded = parse(&[
            "Site C,Austin,TX,30.28,-97.73,,,,,,,,,",
            "Site A,New York,NY,40.7,-74.0,,,,,,,,,",
            "Bad,Nowhere,XX,,,,,,,,,,,",
            "Site B,New York,NY,40.7,-74.0,,,,,,,,,",
        ]);
        let names: Vec<&str> = loaded.records.iter().map(EncampmentRecord::name).collect();
        assert_eq!(names, vec!["Site C", "Site A", "Site B"]);
        assert_eq!(
            loaded.records.len() + loaded.report.dropped(),
            loaded.report.total_rows
        );
    }

    #[test]
    fn trims_city_and_state_for_location() {
        let loaded = parse(&["Site A,  Chicago  , IL ,41.88,-87.63,,,,,,,,,"]);
        assert_eq!(loaded.records[0].location(), "Chicago, IL");
    }

    #[test]
    fn blank_thumbnail_yields_none() {
        let loaded = parse(&["Site A,New York,NY,40.7,-74.0,,,,,,,,,"]);
        assert!(loaded.records[0].thumbnail_ref().is_none());
        assert_eq!(loaded.report.missing_thumbnails, 1);
        assert_eq!(loaded.report.unparsable_thumbnails, 0);
    }

    #[test]
    fn extracts_thumbnail_identifier() {
        let loaded = parse(&[
            "Site A,New York,NY,40.7,-74.0,https://drive.google.com/file/d/abc123/view,,,,,,,,",
        ]);
        assert_eq!(loaded.records[0].thumbnail_ref(), Some("abc123"));
    }

    #[test]
    fn unparsable_thumbnail_is_counted_not_fatal() {
        let loaded = parse(&["Site A,New York,NY,40.7,-74.0,photo pending,,,,,,,,"]);
        assert_eq!(loaded.records.len(), 1);
        assert!(loaded.records[0].thumbnail_ref().is_none());
        assert_eq!(loaded.report.unparsable_thumbnails, 1);
    }

    #[test]
    fn collects_present_video_links_in_order() {
        let loaded = parse(&[
            "Site A,New York,NY,40.7,-74.0,,,,,,,https://v/pv,,https://v/2",
        ]);
        let links = loaded.records[0].video_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "Police Violence");
        assert_eq!(links[0].url, "https://v/pv");
        assert_eq!(links[1].label, "Solidarity Actions Video 2");
    }

    #[test]
    fn tolerates_short_rows_and_missing_optional_columns() {
        let csv = "University Name,Latitude,Longitude\nSite A,40.7,-74.0\nSite B,41.0";
        let loaded = parse_rows(csv.as_bytes(), &default_source(), &null_progress()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].location(), ", ");
        assert_eq!(loaded.report.missing_coordinates, 1);
    }

    #[test]
    fn missing_latitude_column_is_an_error() {
        let csv = "University Name,Longitude\nSite A,-74.0";
        let err = parse_rows(csv.as_bytes(), &default_source(), &null_progress()).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn { ref column } if column == "Latitude"));
    }

    #[test]
    fn invalid_utf8_cell_does_not_fail_the_load() {
        let mut csv = format!("{HEADER}\nSite A,New York,NY,40.7,-74.0,,Active,,,,,,,\n")
            .into_bytes();
        csv.extend_from_slice(b"Site B,Boston,MA,42.36,-71.06,,Act\xffive,,,,,,,");

        let loaded = parse_rows(&csv, &default_source(), &null_progress()).unwrap();

        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.report.dropped(), 0);
        assert_eq!(loaded.records[0].status(), "Active");
        assert_eq!(loaded.records[1].status(), "Act\u{fffd}ive");
    }

    #[test]
    fn handles_quoted_cells_with_commas() {
        let loaded = parse(&[
            "\"Columbia University, NYC\",New York,NY,40.8,-73.96,,Active,Encampment,,,\"1,024\",,,",
        ]);
        assert_eq!(loaded.records[0].name(), "Columbia University, NYC");
        assert_eq!(loaded.records[0].num_arrests(), Some(1024));
    }
}
