#![forbid(unsafe_code)]

//! Batch detail lookup and flattening into [`VideoRecord`] rows.

use std::collections::HashMap;

use crate::error::Result;
use crate::metadata::{TAG_DELIMITER, VideoRecord, watch_url};
use crate::youtube::{MAX_VIDEO_BATCH, Video, VideoMetadataApi, VideoSnippet};

/// Thumbnail keys tried in order; the first with a non-empty URL wins.
const THUMBNAIL_PREFERENCE: [&str; 2] = ["hqdefault", "high"];
const MISSING_COUNT: &str = "0";

/// Fetches details for `video_ids` in batches of at most [`MAX_VIDEO_BATCH`]
/// and flattens them in the order the ids were given.
///
/// Each batch is reordered by request position, so rows never depend on the
/// order `videos.list` happens to answer in. Ids the API no longer returns
/// (deleted, private) produce no row, and items nobody asked for are ignored.
pub fn fetch_video_records(
    api: &dyn VideoMetadataApi,
    video_ids: &[String],
) -> Result<Vec<VideoRecord>> {
    let mut records = Vec::with_capacity(video_ids.len());
    for (index, batch) in video_ids.chunks(MAX_VIDEO_BATCH).enumerate() {
        let response = api.get_videos(batch)?;
        let mut by_id: HashMap<&str, &Video> = HashMap::with_capacity(response.items.len());
        for video in &response.items {
            by_id.entry(video.id.as_str()).or_insert(video);
        }
        let before = records.len();
        records.extend(
            batch
                .iter()
                .filter_map(|id| by_id.remove(id.as_str()))
                .map(flatten_video),
        );
        let returned = records.len() - before;
        if returned < batch.len() {
            tracing::debug!(
                batch = index,
                requested = batch.len(),
                returned,
                "some videos were unavailable"
            );
        }
    }
    Ok(records)
}

/// Projects one API video resource onto the fixed row schema.
pub fn flatten_video(video: &Video) -> VideoRecord {
    let snippet = video.snippet.as_ref();
    let stats = video.statistics.as_ref();
    let count = |value: Option<&String>| {
        value
            .cloned()
            .unwrap_or_else(|| MISSING_COUNT.to_string())
    };

    VideoRecord {
        video_id: video.id.clone(),
        title: snippet.and_then(|s| s.title.clone()).unwrap_or_default(),
        published_at: snippet.and_then(|s| s.published_at.clone()).unwrap_or_default(),
        duration: video
            .content_details
            .as_ref()
            .and_then(|details| details.duration.clone())
            .unwrap_or_default(),
        view_count: count(stats.and_then(|s| s.view_count.as_ref())),
        like_count: count(stats.and_then(|s| s.like_count.as_ref())),
        comment_count: count(stats.and_then(|s| s.comment_count.as_ref())),
        tags: snippet
            .and_then(|s| s.tags.as_ref())
            .map(|tags| tags.join(TAG_DELIMITER))
            .unwrap_or_default(),
        category_id: snippet.and_then(|s| s.category_id.clone()).unwrap_or_default(),
        description: snippet.and_then(|s| s.description.clone()).unwrap_or_default(),
        url: watch_url(&video.id),
        thumbnail_url: snippet.map(preferred_thumbnail).unwrap_or_default(),
    }
}

fn preferred_thumbnail(snippet: &VideoSnippet) -> String {
    THUMBNAIL_PREFERENCE
        .iter()
        .filter_map(|key| snippet.thumbnails.get(*key))
        .filter_map(|thumbnail| thumbnail.url.as_deref())
        .find(|url| !url.is_empty())
        .unwrap_or_default()
        .to_string()
}
