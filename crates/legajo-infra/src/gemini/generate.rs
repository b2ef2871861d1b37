//! GeminiGenerator -- concrete [`GenerationBackend`] for the Gemini
//! `generateContent` endpoint.
//!
//! Non-streaming, one exchange per call against whatever model the caller
//! names. Model selection and fallback retry live in
//! [`legajo_core::generation::FallbackRouter`].

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use legajo_core::generation::GenerationBackend;
use legajo_types::config::GenerationConfig;
use legajo_types::error::GenerationError;
use legajo_types::generation::{ContentPart, GenerationRequest, GenerationResponse};

use super::types::{
    default_safety_settings, GenerateRequest, GenerateResponse, WireContent,
    WireGenerationConfig, WirePart,
};
use super::DEFAULT_BASE_URL;

/// Gemini extraction client.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    config: GenerationConfig,
}

// GeminiGenerator intentionally does NOT derive Debug so the API key can
// never be printed.

impl GeminiGenerator {
    pub fn new(api_key: SecretString, config: GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min timeout for long extractions
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            config,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    /// Convert a generic [`GenerationRequest`] into the wire shape.
    fn to_wire_request(&self, request: &GenerationRequest) -> GenerateRequest {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => WirePart::text(text.clone()),
                ContentPart::FileRef { uri, mime_type } => {
                    WirePart::file(uri.clone(), mime_type.clone())
                }
            })
            .collect();

        GenerateRequest {
            system_instruction: request.system_prompt.as_ref().map(|text| WireContent {
                parts: vec![WirePart::text(text.clone())],
            }),
            contents: vec![WireContent { parts }],
            generation_config: WireGenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
            safety_settings: default_safety_settings(),
        }
    }
}

impl GenerationBackend for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_with_model(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let body = self.to_wire_request(request);

        let response = self
            .client
            .post(self.url(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Deserialization(e.to_string()))?;

        let text = parsed
            .first_candidate_text()
            .ok_or(GenerationError::EmptyResponse)?;

        let model = parsed.model_version.unwrap_or_else(|| model.to_string());
        Ok(GenerationResponse { text, model })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_generator() -> GeminiGenerator {
        GeminiGenerator::new(
            SecretString::from("test-key-not-real"),
            GenerationConfig::default(),
        )
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(make_generator().name(), "gemini");
    }

    #[test]
    fn test_model_url() {
        let generator = make_generator().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            generator.url("gemini-2.5-pro"),
            "http://localhost:8080/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_to_wire_request_maps_parts() {
        let generator = make_generator();
        let request = GenerationRequest {
            system_prompt: Some("Eres un analista catastral.".to_string()),
            parts: vec![
                ContentPart::Text("Extrae los campos".to_string()),
                ContentPart::FileRef {
                    uri: "https://service.example/files/abc".to_string(),
                    mime_type: "application/pdf".to_string(),
                },
            ],
        };

        let wire = generator.to_wire_request(&request);
        assert!(wire.system_instruction.is_some());
        assert_eq!(wire.contents.len(), 1);
        assert_eq!(wire.contents[0].parts.len(), 2);
        assert_eq!(wire.generation_config.temperature, 0.1);
        assert_eq!(wire.safety_settings.len(), 4);
        let file_part = wire.contents[0].parts[1].file_data.as_ref().unwrap();
        assert_eq!(file_part.file_uri, "https://service.example/files/abc");
    }
}
