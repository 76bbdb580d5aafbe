// SPDX-License-Identifier: MIT

//! animesort: batch anime-character image classifier
//!
//! Classifies local anime-style images by recognized character and work via
//! the AnimeTrace API, then exports the sorted tree as a zip archive.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;

pub use config::AppConfig;
pub use error::{Result, SorterError};
