#![forbid(unsafe_code)]

//! Channel resolution and uploads-playlist pagination.

use std::collections::HashSet;

use crate::error::{FetchError, Result};
use crate::youtube::{MAX_PAGE_SIZE, VideoMetadataApi};

/// Returns the id of the playlist that lists every upload of `channel_id`.
pub fn resolve_uploads_playlist(api: &dyn VideoMetadataApi, channel_id: &str) -> Result<String> {
    let response = api.lookup_channel(channel_id)?;
    let channel = response
        .items
        .first()
        .ok_or_else(|| FetchError::ChannelNotFound(channel_id.to_string()))?;
    let uploads = channel
        .uploads_playlist()
        .ok_or_else(|| FetchError::UploadsPlaylistMissing(channel_id.to_string()))?;
    Ok(uploads.to_string())
}

/// Walks the playlist page by page until the API stops handing out a
/// continuation token. Ids keep the listing order; a repeated id is kept at
/// its first position only.
pub fn collect_video_ids(api: &dyn VideoMetadataApi, playlist_id: &str) -> Result<Vec<String>> {
    let mut video_ids = Vec::new();
    let mut seen = HashSet::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = api.list_playlist_page(playlist_id, MAX_PAGE_SIZE, page_token.as_deref())?;
        pages += 1;
        for item in page.items.iter() {
            let video_id = &item.content_details.video_id;
            if seen.insert(video_id.clone()) {
                video_ids.push(video_id.clone());
            } else {
                tracing::debug!(video_id = video_id.as_str(), "skipping repeated playlist entry");
            }
        }
        match page.next_page() {
            Some(token) => page_token = Some(token.to_string()),
            None => break,
        }
    }

    tracing::debug!(playlist_id, pages, videos = video_ids.len(), "collected playlist");
    Ok(video_ids)
}
