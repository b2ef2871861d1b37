//! GeminiFileTransport -- concrete [`AssetTransport`] implementation for the
//! Gemini Files API.
//!
//! Speaks the resumable-upload handshake: a session-start POST that answers
//! with a single-use transfer URL in the `X-Goog-Upload-URL` header, one
//! finalizing PUT of the raw payload, and status reads under the returned
//! resource name.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use legajo_core::ingest::transport::AssetTransport;
use legajo_types::asset::{AssetHandle, FileState, RemoteAsset, UploadSession};
use legajo_types::error::TransportError;

use super::types::{FileEnvelope, FileMetadata, FileStatus, StartSessionBody};
use super::DEFAULT_BASE_URL;

/// Display name declared at session start; the service echoes it back in
/// file listings but it plays no role in the protocol.
const UPLOAD_DISPLAY_NAME: &str = "legajo-upload";

/// Gemini Files API transport.
///
/// One round trip per trait method, no internal retries: retry policy
/// belongs to the ingestion driver.
pub struct GeminiFileTransport {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

// GeminiFileTransport intentionally does NOT derive Debug so the API key
// can never be printed.

impl GeminiFileTransport {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120)) // uploads of multi-MB scans take a while
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read the error body of a non-success response into a status error.
    async fn status_error(response: reqwest::Response) -> TransportError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        TransportError::Status { status, body }
    }
}

impl AssetTransport for GeminiFileTransport {
    async fn start_session(
        &self,
        mime_type: &str,
        byte_len: u64,
    ) -> Result<UploadSession, TransportError> {
        let body = StartSessionBody {
            file: FileMetadata {
                display_name: UPLOAD_DISPLAY_NAME.to_string(),
                mime_type: mime_type.to_string(),
            },
        };

        let response = self
            .client
            .post(self.url("/upload/v1beta/files"))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", byte_len)
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let transfer_url = response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(TransportError::MissingTransferUrl)?;

        Ok(UploadSession {
            transfer_url,
            mime_type: mime_type.to_string(),
            byte_len,
        })
    }

    async fn transfer(
        &self,
        session: UploadSession,
        payload: &[u8],
    ) -> Result<RemoteAsset, TransportError> {
        let response = self
            .client
            .put(&session.transfer_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(payload.to_vec())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let envelope: FileEnvelope = response
            .json()
            .await
            .map_err(|e| TransportError::Deserialization(e.to_string()))?;

        Ok(RemoteAsset {
            handle: AssetHandle(envelope.file.uri),
            name: envelope.file.name,
            state: envelope.file.state,
        })
    }

    async fn read_state(&self, name: &str) -> Result<FileState, TransportError> {
        let response = self
            .client
            .get(self.url(&format!("/v1beta/{name}")))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let status: FileStatus = response
            .json()
            .await
            .map_err(|e| TransportError::Deserialization(e.to_string()))?;

        Ok(status.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_transport() -> GeminiFileTransport {
        GeminiFileTransport::new(SecretString::from("test-key-not-real"))
    }

    #[test]
    fn test_default_base_url() {
        let transport = make_transport();
        assert_eq!(
            transport.url("/upload/v1beta/files"),
            "https://generativelanguage.googleapis.com/upload/v1beta/files"
        );
    }

    #[test]
    fn test_base_url_override() {
        let transport = make_transport().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            transport.url("/v1beta/files/abc123"),
            "http://localhost:8080/v1beta/files/abc123"
        );
    }
}
