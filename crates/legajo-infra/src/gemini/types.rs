//! Gemini REST API types.
//!
//! Gemini-specific request/response structures for HTTP communication with
//! the Files and generateContent endpoints. They are NOT the generic types
//! from legajo-types -- those are provider-agnostic. The wire format is
//! camelCase JSON.

use serde::{Deserialize, Serialize};

use legajo_types::asset::FileState;

/// Body of the session-start request:
/// `{"file": {"displayName": …, "mimeType": …}}`.
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionBody {
    pub file: FileMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub display_name: String,
    pub mime_type: String,
}

/// Response body of the finalize step: `{"file": {…}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEnvelope {
    pub file: WireFile,
}

/// A file resource as the Files API reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFile {
    /// Resource name, e.g. `files/abc123`. Polled under this name.
    pub name: String,
    /// Stable URI embedded in generation requests.
    pub uri: String,
    pub state: FileState,
}

/// Response body of a status read. Only `state` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct FileStatus {
    pub state: FileState,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<WireContent>,
    pub contents: Vec<WireContent>,
    pub generation_config: WireGenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireContent {
    pub parts: Vec<WirePart>,
}

/// One content part: either prompt text or a file reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<WireFileData>,
}

impl WirePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file_data: None,
        }
    }

    pub fn file(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            text: None,
            file_data: Some(WireFileData {
                file_uri: uri.into(),
                mime_type: mime_type.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFileData {
    pub file_uri: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

/// The four harm categories blocked at MEDIUM and above, matching what the
/// upstream proxy always sends.
pub fn default_safety_settings() -> Vec<SafetySetting> {
    const CATEGORIES: [&str; 4] = [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ];
    CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect()
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<WireContent>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any content came back.
    pub fn first_candidate_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_session_body_shape() {
        let body = StartSessionBody {
            file: FileMetadata {
                display_name: "escritura.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["file"]["displayName"], "escritura.pdf");
        assert_eq!(json["file"]["mimeType"], "application/pdf");
    }

    #[test]
    fn test_file_envelope_deserialization() {
        let json = r#"{
            "file": {
                "name": "files/abc123",
                "uri": "https://generativelanguage.googleapis.com/v1beta/files/abc123",
                "state": "PROCESSING",
                "mimeType": "application/pdf"
            }
        }"#;
        let envelope: FileEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.file.name, "files/abc123");
        assert_eq!(envelope.file.state, FileState::Processing);
    }

    #[test]
    fn test_generate_request_part_shapes() {
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![WireContent {
                parts: vec![
                    WirePart::text("Extrae los campos"),
                    WirePart::file("https://service.example/files/abc", "application/pdf"),
                ],
            }],
            generation_config: WireGenerationConfig {
                temperature: 0.1,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 8192,
            },
            safety_settings: default_safety_settings(),
        };

        let json = serde_json::to_value(&request).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "Extrae los campos");
        assert!(parts[0].get("fileData").is_none());
        assert_eq!(parts[1]["fileData"]["fileUri"], "https://service.example/files/abc");
        assert_eq!(parts[1]["fileData"]["mimeType"], "application/pdf");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
        // systemInstruction should not appear when None
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_first_candidate_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"lote\":"}, {"text": "\"12\"}"}]}}
            ],
            "modelVersion": "gemini-2.5-pro"
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_candidate_text().as_deref(), Some("{\"lote\":\"12\"}"));
    }

    #[test]
    fn test_empty_candidates_yield_no_text() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.first_candidate_text().is_none());
    }
}
