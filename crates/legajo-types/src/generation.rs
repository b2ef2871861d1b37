//! Generation request/response types for the downstream extraction call.
//!
//! An activated asset is embedded as a file-reference part next to the
//! prompt text; the provider implementation maps these onto its own wire
//! format.

use serde::{Deserialize, Serialize};

/// One part of a generation request's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentPart {
    /// Literal prompt text.
    Text(String),
    /// Reference to an activated remote asset.
    FileRef { uri: String, mime_type: String },
}

/// Request to a generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System/instruction text sent ahead of the content parts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub parts: Vec<ContentPart>,
}

impl GenerationRequest {
    /// Build a request pairing a prompt with one activated asset.
    pub fn for_asset(prompt: impl Into<String>, uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            parts: vec![
                ContentPart::Text(prompt.into()),
                ContentPart::FileRef {
                    uri: uri.into(),
                    mime_type: mime_type.into(),
                },
            ],
        }
    }
}

/// Response from a generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Concatenated candidate text.
    pub text: String,
    /// Model that actually served the request (may be the fallback).
    pub model: String,
}
