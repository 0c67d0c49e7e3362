//! Core library for discogs-tag: tag and rename audio files from Discogs releases.
pub mod api;
pub mod config;
pub mod error;
pub mod files;
pub mod merge;
pub mod models;
pub mod names;
pub mod options;
pub mod reader;
pub mod tags;
pub mod template;
pub mod tracklist;
pub mod workflow;

pub use error::{Error, Result};
