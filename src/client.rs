// SPDX-License-Identifier: MIT

//! AnimeTrace recognition API client

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::Result;

/// Default recognition endpoint
pub const DEFAULT_API_URL: &str = "https://api.animetrace.com/v1/search";

/// Client-assigned code for transport-level failures, outside the API's range
pub const TRANSPORT_ERROR_CODE: i64 = -1;

/// API codes that terminate an entire run: maintenance, session quota, overload
pub const FATAL_CODES: [i64; 3] = [17704, 17728, 17731];

/// Recognition models offered by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelId {
    /// Low-precision anime model
    Anime,
    /// High-precision anime model (doujin / key visuals)
    #[default]
    AnimeModelLovelive,
    /// High-precision anime model (general scenes)
    PreStable,
    /// High-precision galgame model
    FullGameModelKira,
}

impl ModelId {
    /// All selectable models, in menu order
    pub const ALL: [ModelId; 4] = [
        ModelId::Anime,
        ModelId::AnimeModelLovelive,
        ModelId::PreStable,
        ModelId::FullGameModelKira,
    ];

    /// Identifier sent to the API
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Anime => "anime",
            ModelId::AnimeModelLovelive => "anime_model_lovelive",
            ModelId::PreStable => "pre_stable",
            ModelId::FullGameModelKira => "full_game_model_kira",
        }
    }

    /// Human-readable description for menus
    pub fn label(&self) -> &'static str {
        match self {
            ModelId::Anime => "Low-precision anime model (cel / key art)",
            ModelId::AnimeModelLovelive => "High-precision anime model #1 (doujin, key art)",
            ModelId::PreStable => "High-precision anime model #2 (general scenes)",
            ModelId::FullGameModelKira => "High-precision galgame model",
        }
    }
}

impl std::str::FromStr for ModelId {
    type Err = crate::SorterError;

    fn from_str(s: &str) -> Result<Self> {
        ModelId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| crate::SorterError::UnknownModel(s.to_string()))
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One character/work match returned by the API, best match first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionCandidate {
    pub character: String,
    pub work: String,
}

/// Normalized result of one recognition call
#[derive(Debug, Clone)]
pub enum RecognitionOutcome {
    /// Candidates in API order, deduplicated by character name
    Success(Vec<RecognitionCandidate>),
    /// The call succeeded but no character was found
    Empty,
    /// Non-fatal failure; affects only the current image
    RecoverableError { code: i64, message: String },
    /// Maintenance / quota / overload; terminates the run
    FatalError { code: i64, message: String },
}

impl RecognitionOutcome {
    /// Candidate list, empty for every non-success variant
    pub fn candidates(&self) -> &[RecognitionCandidate] {
        match self {
            RecognitionOutcome::Success(c) => c,
            _ => &[],
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, RecognitionOutcome::FatalError { .. })
    }
}

/// Recognition seam; the engine only depends on this trait
#[async_trait]
pub trait Recognize: Send + Sync {
    /// Recognize one image with the given model
    async fn recognize(&self, image: &Path, model: ModelId) -> Result<RecognitionOutcome>;
}

#[derive(Serialize)]
struct SearchRequest {
    model: String,
    base64: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    code: i64,
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(default)]
    character: Vec<CharacterEntry>,
}

#[derive(Deserialize)]
struct CharacterEntry {
    #[serde(default)]
    character: Option<String>,
    #[serde(default)]
    work: Option<String>,
}

/// AnimeTrace API client
pub struct TraceClient {
    client: Client,
    api_url: String,
}

impl TraceClient {
    /// Create a new client with a fixed request timeout
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, image: &Path, model: ModelId) -> Result<RecognitionOutcome> {
        let data = std::fs::read(image)?;
        let request = SearchRequest {
            model: model.as_str().to_string(),
            base64: general_purpose::STANDARD.encode(&data),
        };

        debug!("Sending recognition request: model={} image={:?}", model, image);

        let response = match self.client.post(&self.api_url).json(&request).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Recognition request failed: {}", e);
                return Ok(RecognitionOutcome::RecoverableError {
                    code: TRANSPORT_ERROR_CODE,
                    message: format!("network error: {}", e),
                });
            }
        };

        let status = response.status();
        match response.json::<SearchResponse>().await {
            Ok(parsed) => Ok(outcome_from_response(parsed)),
            Err(e) => {
                warn!("Recognition response unreadable (status {}): {}", status, e);
                Ok(RecognitionOutcome::RecoverableError {
                    code: TRANSPORT_ERROR_CODE,
                    message: format!("API returned status {} without a valid body", status),
                })
            }
        }
    }
}

#[async_trait]
impl Recognize for TraceClient {
    async fn recognize(&self, image: &Path, model: ModelId) -> Result<RecognitionOutcome> {
        self.search(image, model).await
    }
}

/// Map the API envelope onto a `RecognitionOutcome`
fn outcome_from_response(response: SearchResponse) -> RecognitionOutcome {
    if response.code != 0 {
        let message = error_message(response.code);
        return if FATAL_CODES.contains(&response.code) {
            RecognitionOutcome::FatalError { code: response.code, message }
        } else {
            RecognitionOutcome::RecoverableError { code: response.code, message }
        };
    }

    // Only the first hit carries the character list
    let entries = match response.data.first() {
        Some(hit) if !hit.character.is_empty() => &hit.character,
        _ => return RecognitionOutcome::Empty,
    };

    let mut candidates: Vec<RecognitionCandidate> = Vec::new();
    for entry in entries {
        let character = match entry.character.as_deref() {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => continue,
        };
        if candidates.iter().any(|c| c.character == character) {
            continue;
        }
        candidates.push(RecognitionCandidate {
            character,
            work: entry.work.clone().unwrap_or_else(|| "unknown".to_string()),
        });
    }

    if candidates.is_empty() {
        RecognitionOutcome::Empty
    } else {
        RecognitionOutcome::Success(candidates)
    }
}

/// Distinct work names from a candidate list, preserving first occurrence
pub fn unique_works(candidates: &[RecognitionCandidate]) -> Vec<String> {
    let mut works: Vec<String> = Vec::new();
    for candidate in candidates {
        if !works.contains(&candidate.work) {
            works.push(candidate.work.clone());
        }
    }
    works
}

/// User-facing message for an API error code
pub fn error_message(code: i64) -> String {
    let message = match code {
        TRANSPORT_ERROR_CODE => "network error contacting the recognition API",
        17701 => "image too large (must be under 4MB)",
        17702 => "server busy, please retry",
        17703 => "invalid request parameters",
        17704 => "API is under maintenance",
        17705 => "unsupported image format",
        17706 => "recognition failed (internal error, please retry)",
        17707 => "internal error",
        17708 => "too many people in the image",
        17709 => "could not load statistics",
        17710 => "image captcha incorrect",
        17711 => "could not prepare recognition (please retry)",
        17712 => "image name required",
        17720 => "recognition succeeded",
        17721 => "server running normally",
        17722 => "image download failed",
        17723 => "Content-Length not specified",
        17724 => "not an image file, or none specified",
        17725 => "no image specified",
        17726 => "JSON requests cannot contain files",
        17727 => "malformed base64 payload",
        17728 => "usage limit reached for this session",
        17729 => "selected model not found",
        17730 => "AI image detection failed",
        17731 => "server overloaded, please try again",
        17732 => "detection has been rate limited",
        17733 => "feedback submitted",
        17734 => "feedback failed",
        17735 => "recognition feedback submitted",
        17736 => "captcha incorrect",
        _ => return format!("unknown error (code {})", code),
    };
    message.to_string()
}
