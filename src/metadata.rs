#![forbid(unsafe_code)]

//! Flat video rows and their CSV persistence.
//!
//! The column order of [`FIELDNAMES`] is the file format: consumers read the
//! CSV by header name, so the names and order never change between runs.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{FetchError, Result};

/// Header row, in column order.
pub const FIELDNAMES: [&str; 12] = [
    "video_id",
    "title",
    "published_at",
    "duration",
    "view_count",
    "like_count",
    "comment_count",
    "tags",
    "category_id",
    "description",
    "url",
    "thumbnail_url",
];

/// Joins tags into one column. Tags containing it are written as-is.
pub const TAG_DELIMITER: &str = "|";

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// One output row. Field order matches [`FIELDNAMES`].
///
/// Counters stay as the decimal strings the API returns, with `"0"` standing
/// in for counters the API left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub published_at: String,
    pub duration: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    pub tags: String,
    pub category_id: String,
    pub description: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// Canonical watch page for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

/// Writes the header followed by every record, replacing `path`.
pub fn write_records(path: &Path, records: &[VideoRecord]) -> Result<()> {
    let output_error = |source: csv::Error| FetchError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|err| output_error(err.into()))?;
    write_csv(file, records).map_err(output_error)
}

/// Serializes the header and rows to any writer.
pub fn write_csv<W: Write>(writer: W, records: &[VideoRecord]) -> csv::Result<()> {
    // Header is written by hand so an empty export still carries it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    writer.write_record(FIELDNAMES)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
