//! Blocking HTTP implementation of [`VideoMetadataApi`].

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::types::{ChannelListResponse, PlaylistItemListResponse, VideoListResponse};
use super::{MAX_VIDEO_BATCH, VideoMetadataApi};
use crate::config::{ApiKey, FetchSettings};
use crate::error::ApiError;

const CHANNELS_ENDPOINT: &str = "channels";
const PLAYLIST_ITEMS_ENDPOINT: &str = "playlistItems";
const VIDEOS_ENDPOINT: &str = "videos";

/// API-key authenticated client. Every call is a single GET with no retry.
pub struct YouTubeClient {
    agent: ureq::Agent,
    api_base: String,
    api_key: ApiKey,
}

impl YouTubeClient {
    pub fn new(settings: &FetchSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(settings.http_timeout)
            .timeout_read(settings.http_timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build();
        Self {
            agent,
            api_base: settings.api_base.clone(),
            api_key: settings.api_key.clone(),
        }
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self
            .agent
            .get(&format!("{}/{}", self.api_base, endpoint));
        for (name, value) in query {
            request = request.query(name, value);
        }
        let request = request.query("key", self.api_key.as_str());

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(ApiError::Status {
                    endpoint,
                    status,
                    message: error_message(response),
                });
            }
            Err(err) => {
                return Err(ApiError::Transport {
                    endpoint,
                    source: Box::new(err),
                });
            }
        };

        response
            .into_json::<T>()
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl VideoMetadataApi for YouTubeClient {
    fn lookup_channel(&self, channel_id: &str) -> Result<ChannelListResponse, ApiError> {
        let response: ChannelListResponse =
            self.get(CHANNELS_ENDPOINT, &channel_query(channel_id))?;
        tracing::debug!(
            channel_id,
            returned_items = response.items.len(),
            "looked up channel"
        );
        Ok(response)
    }

    fn list_playlist_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemListResponse, ApiError> {
        let response: PlaylistItemListResponse = self.get(
            PLAYLIST_ITEMS_ENDPOINT,
            &playlist_query(playlist_id, page_size, page_token),
        )?;
        tracing::debug!(
            playlist_id,
            page_token,
            returned_items = response.items.len(),
            has_next = response.next_page().is_some(),
            "fetched playlist page"
        );
        Ok(response)
    }

    fn get_videos(&self, video_ids: &[String]) -> Result<VideoListResponse, ApiError> {
        debug_assert!(video_ids.len() <= MAX_VIDEO_BATCH);
        let response: VideoListResponse = self.get(VIDEOS_ENDPOINT, &videos_query(video_ids))?;
        tracing::debug!(
            requested = video_ids.len(),
            returned_items = response.items.len(),
            "fetched video details"
        );
        Ok(response)
    }
}

fn channel_query(channel_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("part", "contentDetails".to_string()),
        ("id", channel_id.to_string()),
    ]
}

fn playlist_query(
    playlist_id: &str,
    page_size: u32,
    page_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("part", "contentDetails".to_string()),
        ("playlistId", playlist_id.to_string()),
        ("maxResults", page_size.to_string()),
    ];
    if let Some(token) = page_token {
        query.push(("pageToken", token.to_string()));
    }
    query
}

fn videos_query(video_ids: &[String]) -> Vec<(&'static str, String)> {
    vec![
        ("part", "snippet,contentDetails,statistics".to_string()),
        ("id", video_ids.join(",")),
    ]
}

/// Google wraps failures as `{"error": {"code": 403, "message": "..."}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn error_message(response: ureq::Response) -> String {
    let status_text = response.status_text().to_string();
    let body = response.into_string().unwrap_or_default();
    parse_error_body(&body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            status_text
        } else {
            body.to_string()
        }
    })
}

fn parse_error_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
}
