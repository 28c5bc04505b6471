//! Wire types for the three YouTube Data API v3 list calls the export uses.
//!
//! Only the fields the export reads are modelled. Facets and fields the API is
//! allowed to omit are `Option` (or defaulted collections) so a sparse response
//! decodes instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: u32,
    pub results_per_page: u32,
}

/// Response of `channels.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Missing entirely when nothing matched the requested id.
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub content_details: Option<ChannelContentDetails>,
}

impl Channel {
    /// Id of the playlist holding every upload of this channel.
    pub fn uploads_playlist(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|details| details.related_playlists.uploads.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

/// Response of `playlistItems.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
    pub page_info: Option<PageInfo>,
}

impl PlaylistItemListResponse {
    /// Continuation token, treating an empty string as the last page.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: String,
}

/// Response of `videos.list`. Ids the API cannot return (deleted, private)
/// are simply absent from `items`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

/// A `video` resource with the `snippet`, `contentDetails` and `statistics`
/// parts.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub content_details: Option<VideoContentDetails>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    /// ISO 8601 timestamp, kept verbatim.
    pub published_at: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Keyed by resolution name (`default`, `medium`, `high`, ...).
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// ISO 8601 duration such as `PT1H2M3S`.
    pub duration: Option<String>,
}

/// Counters arrive as decimal strings. The API leaves a counter out when the
/// owner disabled it (comments off, likes hidden).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_response_without_items_decodes_empty() {
        let response: ChannelListResponse = serde_json::from_str(
            r#"{"kind":"youtube#channelListResponse","pageInfo":{"totalResults":0,"resultsPerPage":5}}"#,
        )
        .unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn channel_exposes_uploads_playlist() {
        let response: ChannelListResponse = serde_json::from_str(
            r#"{"items":[{"id":"UC1","contentDetails":{"relatedPlaylists":{"likes":"","uploads":"UU1"}}}]}"#,
        )
        .unwrap();
        assert_eq!(response.items[0].uploads_playlist(), Some("UU1"));

        let bare: Channel = serde_json::from_str(r#"{"id":"UC2"}"#).unwrap();
        assert_eq!(bare.uploads_playlist(), None);
    }

    #[test]
    fn playlist_page_reads_video_ids_and_token() {
        let page: PlaylistItemListResponse = serde_json::from_str(
            r#"{
                "nextPageToken": "CDIQAA",
                "pageInfo": {"totalResults": 3, "resultsPerPage": 2},
                "items": [
                    {"contentDetails": {"videoId": "a1", "videoPublishedAt": "2024-01-01T00:00:00Z"}},
                    {"contentDetails": {"videoId": "b2"}}
                ]
            }"#,
        )
        .unwrap();
        let ids: Vec<_> = page
            .items
            .iter()
            .map(|item| item.content_details.video_id.as_str())
            .collect();
        assert_eq!(ids, ["a1", "b2"]);
        assert_eq!(page.next_page(), Some("CDIQAA"));
        assert_eq!(page.page_info.unwrap().total_results, 3);
    }

    #[test]
    fn empty_page_token_ends_pagination() {
        let page: PlaylistItemListResponse =
            serde_json::from_str(r#"{"items":[],"nextPageToken":""}"#).unwrap();
        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn sparse_video_decodes() {
        let response: VideoListResponse = serde_json::from_str(
            r#"{"items":[{
                "id": "v1",
                "snippet": {
                    "publishedAt": "2024-03-04T05:06:07Z",
                    "title": "Title",
                    "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/v1/hqdefault.jpg", "width": 480, "height": 360}},
                    "categoryId": "25"
                },
                "contentDetails": {"duration": "PT52M1S", "dimension": "2d"}
            }]}"#,
        )
        .unwrap();
        let video = &response.items[0];
        assert!(video.statistics.is_none());
        let snippet = video.snippet.as_ref().unwrap();
        assert!(snippet.tags.is_none());
        assert!(snippet.description.is_none());
        assert_eq!(snippet.thumbnails["high"].width, Some(480));
        assert_eq!(
            video.content_details.as_ref().unwrap().duration.as_deref(),
            Some("PT52M1S")
        );
    }
}
