#![forbid(unsafe_code)]

//! Error types shared by every stage of the export.
//!
//! Library code returns [`FetchError`]; the binary is the only place that turns
//! one into a message and an exit status.

use std::path::PathBuf;

use thiserror::Error;

/// Failure talking to the metadata API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("could not decode {endpoint} response")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(
        "{var} environment variable is not set.\nExport it or add it to {env_file} (KEY=value per line)."
    )]
    MissingCredential { var: &'static str, env_file: String },

    #[error("channel '{0}' not found or API key has no access")]
    ChannelNotFound(String),

    #[error("channel '{0}' does not expose an uploads playlist")]
    UploadsPlaylistMissing(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("writing {}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl FetchError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            FetchError::MissingCredential { .. } => 2,
            FetchError::ChannelNotFound(_) | FetchError::UploadsPlaylistMissing(_) => 3,
            FetchError::Api(_) => 4,
            FetchError::Output { .. } => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_failure_class() {
        let missing = FetchError::MissingCredential {
            var: "YOUTUBE_API_KEY",
            env_file: ".env".into(),
        };
        let channel = FetchError::ChannelNotFound("UC123".into());
        let api = FetchError::Api(ApiError::Status {
            endpoint: "videos",
            status: 403,
            message: "quota exceeded".into(),
        });
        let output = FetchError::Output {
            path: PathBuf::from("/nope/out.csv"),
            source: csv::Error::from(std::io::Error::other("denied")),
        };

        let codes = [
            missing.exit_code(),
            channel.exit_code(),
            api.exit_code(),
            output.exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 5]);
        assert!(codes.iter().all(|code| *code != 0));
    }

    #[test]
    fn messages_name_the_offending_input() {
        let err = FetchError::ChannelNotFound("UCabc".into());
        assert_eq!(
            err.to_string(),
            "channel 'UCabc' not found or API key has no access"
        );

        let err = FetchError::MissingCredential {
            var: "YOUTUBE_API_KEY",
            env_file: "/srv/.env".into(),
        };
        let message = err.to_string();
        assert!(message.starts_with("YOUTUBE_API_KEY environment variable is not set."));
        assert!(message.contains("/srv/.env"));

        let err = FetchError::from(ApiError::Status {
            endpoint: "playlistItems",
            status: 404,
            message: "playlist not found".into(),
        });
        assert_eq!(
            err.to_string(),
            "playlistItems returned HTTP 404: playlist not found"
        );
    }
}
