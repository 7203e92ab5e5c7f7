//! Thumbnail reference extraction.
//!
//! The spreadsheet stores thumbnails as Google Drive share links. The map
//! only needs the file identifier, which is the path segment following
//! `/d/` (`https://drive.google.com/file/d/<id>/view`). Older `open?id=<id>`
//! links are accepted as well.

use regex::Regex;
use std::sync::LazyLock;

/// Identifier following a `/d/` path segment.
static DRIVE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("valid regex"));

/// Identifier passed as an `id` query parameter.
static DRIVE_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("valid regex"));

/// Extracts the opaque file identifier from a thumbnail link.
///
/// When a link contains several `/d/` segments the last one wins. Returns
/// `None` if no identifier can be found.
#[must_use]
pub fn extract_thumbnail_id(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    DRIVE_PATH_RE
        .captures_iter(link)
        .last()
        .or_else(|| DRIVE_QUERY_RE.captures_iter(link).last())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_file_link() {
        assert_eq!(
            extract_thumbnail_id("https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing")
                .as_deref(),
            Some("1AbC_d-9")
        );
    }

    #[test]
    fn extracts_id_without_trailing_segment() {
        assert_eq!(
            extract_thumbnail_id("https://drive.google.com/file/d/XYZ123").as_deref(),
            Some("XYZ123")
        );
    }

    #[test]
    fn id_ending_in_d_is_not_split() {
        assert_eq!(
            extract_thumbnail_id("https://drive.google.com/file/d/abcd/view").as_deref(),
            Some("abcd")
        );
    }

    #[test]
    fn extracts_id_from_open_link() {
        assert_eq!(
            extract_thumbnail_id("https://drive.google.com/open?id=Q9w8").as_deref(),
            Some("Q9w8")
        );
    }

    #[test]
    fn rejects_links_without_identifier() {
        assert!(extract_thumbnail_id("https://example.com/photo.jpg").is_none());
        assert!(extract_thumbnail_id("see photo folder").is_none());
        assert!(extract_thumbnail_id("").is_none());
    }
}
