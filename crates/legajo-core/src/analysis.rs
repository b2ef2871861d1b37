//! Document analysis service.
//!
//! Validates a payload, drives it through ingestion, then asks the
//! generation provider to extract structured fields from the activated
//! asset. The extraction prompt varies by [`DocumentKind`]; callers may
//! supply their own prompt instead.

use tokio_util::sync::CancellationToken;

use legajo_types::asset::AssetHandle;
use legajo_types::config::{LegajoConfig, LimitsConfig};
use legajo_types::document::{DocumentKind, ACCEPTED_MIME_TYPES};
use legajo_types::error::AnalysisError;
use legajo_types::generation::GenerationRequest;

use crate::generation::GenerationProvider;
use crate::ingest::transport::AssetTransport;
use crate::ingest::Ingestor;

/// Check a payload against the MIME allowlist and size limit.
///
/// Every path that feeds a payload into ingestion runs this first, so
/// nothing unsupported or oversized reaches the network.
pub fn validate_payload(
    payload: &[u8],
    mime_type: &str,
    limits: &LimitsConfig,
) -> Result<(), AnalysisError> {
    if !ACCEPTED_MIME_TYPES.contains(&mime_type) {
        return Err(AnalysisError::UnsupportedMime(mime_type.to_string()));
    }
    let size = payload.len() as u64;
    if size > limits.max_payload_bytes {
        return Err(AnalysisError::PayloadTooLarge {
            size,
            max: limits.max_payload_bytes,
        });
    }
    Ok(())
}

/// Result of analyzing one document.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub kind: DocumentKind,
    /// Handle of the ingested asset, reusable for follow-up questions.
    pub handle: AssetHandle,
    /// Model that served the extraction.
    pub model: String,
    /// Raw extraction text (the model is asked to answer with JSON).
    pub text: String,
}

/// Validates, ingests, and extracts. Stateless across calls.
pub struct DocumentAnalyzer<'a, T: AssetTransport, G: GenerationProvider> {
    transport: &'a T,
    provider: &'a G,
    config: &'a LegajoConfig,
    cancel: Option<CancellationToken>,
}

impl<'a, T: AssetTransport, G: GenerationProvider> DocumentAnalyzer<'a, T, G> {
    pub fn new(transport: &'a T, provider: &'a G, config: &'a LegajoConfig) -> Self {
        Self {
            transport,
            provider,
            config,
            cancel: None,
        }
    }

    /// Attach a cancellation token, forwarded to the ingestion driver.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Analyze one document payload.
    ///
    /// `prompt` overrides the default extraction prompt for `kind`.
    pub async fn analyze(
        &self,
        payload: &[u8],
        mime_type: &str,
        kind: DocumentKind,
        prompt: Option<&str>,
    ) -> Result<AnalysisReport, AnalysisError> {
        validate_payload(payload, mime_type, &self.config.limits)?;

        let mut ingestor = Ingestor::new(self.transport, self.config.ingest.clone());
        if let Some(token) = &self.cancel {
            ingestor = ingestor.with_cancellation(token.clone());
        }
        let handle = ingestor.ingest(payload, mime_type).await?;

        let prompt = prompt.unwrap_or_else(|| default_prompt(kind));
        let request = GenerationRequest::for_asset(prompt, handle.as_str(), mime_type);

        tracing::debug!(kind = %kind, handle = %handle, "Requesting extraction");
        let response = self.provider.generate(&request).await?;

        Ok(AnalysisReport {
            kind,
            handle,
            model: response.model,
            text: response.text,
        })
    }
}

/// Default extraction prompt per document kind. Deliberately thin: callers
/// with tuned prompts pass their own.
fn default_prompt(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Propiedad => {
            "Analiza este documento de propiedad (escritura o titulo) y extrae los \
             datos del predio, medidas y colindancias, titulares y acto juridico. \
             Responde unicamente con JSON; usa \"NO_CONSTA\" para campos ausentes."
        }
        DocumentKind::Gravamen => {
            "Analiza este certificado de gravamen y extrae los gravamenes, \
             afectaciones y datos registrales. Responde unicamente con JSON; usa \
             \"NO_CONSTA\" para campos ausentes."
        }
    }
}
