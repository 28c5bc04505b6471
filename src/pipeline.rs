#![forbid(unsafe_code)]

//! The export run: resolve the uploads playlist, collect ids, fetch details,
//! write the CSV. Each stage only starts once the previous one succeeded, and
//! the first error ends the run.

use std::path::{Path, PathBuf};

use crate::collector::{collect_video_ids, resolve_uploads_playlist};
use crate::details::fetch_video_records;
use crate::error::Result;
use crate::metadata::write_records;
use crate::youtube::VideoMetadataApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub uploads_playlist: String,
    pub discovered: usize,
    pub exported: usize,
    pub output_path: PathBuf,
}

pub fn export_channel(
    api: &dyn VideoMetadataApi,
    channel_id: &str,
    output_path: &Path,
) -> Result<ExportSummary> {
    println!("Fetching video IDs from channel…");
    let uploads_playlist = resolve_uploads_playlist(api, channel_id)?;
    let video_ids = collect_video_ids(api, &uploads_playlist)?;
    println!("Found {} videos.", video_ids.len());

    println!("Fetching video details…");
    let records = fetch_video_records(api, &video_ids)?;
    println!("Retrieved details for {} videos.", records.len());

    write_records(output_path, &records)?;
    println!("Saved to {}", output_path.display());

    Ok(ExportSummary {
        uploads_playlist,
        discovered: video_ids.len(),
        exported: records.len(),
        output_path: output_path.to_path_buf(),
    })
}
