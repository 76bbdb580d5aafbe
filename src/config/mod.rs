// SPDX-License-Identifier: MIT

//! Configuration management for animesort

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::client::ModelId;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Recognition API settings
    pub api: ApiConfig,

    /// Suggestion history file
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Which sorted trees to build
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_true")]
    pub by_character: bool,
    #[serde(default = "default_true")]
    pub by_work: bool,
}

fn default_api_url() -> String { crate::client::DEFAULT_API_URL.to_string() }
fn default_timeout() -> u64 { 60 }
fn default_model() -> String { ModelId::default().as_str().to_string() }
fn default_history_path() -> String { "input_history.json".to_string() }
fn default_true() -> bool { true }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            history_path: default_history_path(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout(),
            model: default_model(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            by_character: true,
            by_work: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::SorterError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default model, validated
    pub fn model(&self) -> crate::Result<ModelId> {
        self.api.model.parse()
    }
}
