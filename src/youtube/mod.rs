#![forbid(unsafe_code)]

//! Boundary to the YouTube Data API v3.
//!
//! The export only needs three list calls, captured by [`VideoMetadataApi`].
//! [`YouTubeClient`] implements it over blocking HTTP; tests substitute
//! in-memory stubs.

pub mod client;
pub mod types;

pub use client::YouTubeClient;
pub use types::{
    Channel, ChannelListResponse, PlaylistItem, PlaylistItemListResponse, Thumbnail, Video,
    VideoListResponse, VideoSnippet, VideoStatistics,
};

use crate::error::ApiError;

/// Largest `maxResults` accepted by `playlistItems.list`.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Largest number of ids accepted by one `videos.list` call.
pub const MAX_VIDEO_BATCH: usize = 50;

pub trait VideoMetadataApi {
    /// `channels.list` with the `contentDetails` part for a single channel id.
    fn lookup_channel(&self, channel_id: &str) -> Result<ChannelListResponse, ApiError>;

    /// One page of `playlistItems.list`; `page_token` is `None` for the first page.
    fn list_playlist_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemListResponse, ApiError>;

    /// `videos.list` with the snippet, contentDetails and statistics parts.
    fn get_videos(&self, video_ids: &[String]) -> Result<VideoListResponse, ApiError>;
}
