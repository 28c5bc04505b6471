#![forbid(unsafe_code)]

//! Fetches metadata for every upload of the configured channel and writes it
//! to a CSV file.
//!
//! Requires `YOUTUBE_API_KEY` in the environment or in `.env` in the working
//! directory. With no arguments the default channel is exported to
//! `cdanslair_videos.csv` in the working directory.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use channel_video_export::FetchError;
use channel_video_export::config::{SettingsOverrides, resolve_settings};
use channel_video_export::export_channel;
use channel_video_export::youtube::YouTubeClient;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fetch_videos",
    about = "Export a YouTube channel's uploads to CSV",
    version
)]
struct FetchArgs {
    /// Channel to export (defaults to YOUTUBE_CHANNEL_ID or the built-in channel)
    #[arg(long)]
    channel_id: Option<String>,

    /// Destination CSV, replaced on every run
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Dotenv file consulted for values missing from the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Base URL of the YouTube Data API
    #[arg(long)]
    api_base: Option<String>,

    /// Connect/read timeout for each API request, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl FetchArgs {
    fn into_overrides(self) -> SettingsOverrides {
        SettingsOverrides {
            channel_id: self.channel_id,
            output_path: self.output,
            api_base: self.api_base,
            http_timeout_secs: self.timeout_secs,
            env_path: self.env_file,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let args = FetchArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: FetchArgs) -> Result<(), FetchError> {
    let settings = resolve_settings(args.into_overrides())?;
    tracing::debug!(
        channel_id = settings.channel_id.as_str(),
        api_base = settings.api_base.as_str(),
        output = %settings.output_path.display(),
        "resolved settings"
    );
    let client = YouTubeClient::new(&settings);
    export_channel(&client, &settings.channel_id, &settings.output_path)?;
    Ok(())
}

/// `Error: <message>` followed by one `caused by:` line per source.
fn render_error(err: &FetchError) -> String {
    let mut rendered = format!("Error: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        rendered.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    rendered
}
