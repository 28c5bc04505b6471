#![forbid(unsafe_code)]

//! Exports the upload list of one YouTube channel to a flat CSV file.
//!
//! The run is strictly sequential: resolve the channel's uploads playlist,
//! page through it for video ids, fetch details fifty ids at a time, flatten
//! every video into a [`metadata::VideoRecord`] and write the rows.

pub mod collector;
pub mod config;
pub mod details;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod youtube;

pub use error::{ApiError, FetchError};
pub use pipeline::{ExportSummary, export_channel};
