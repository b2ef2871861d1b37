//! Generation ports and model fallback routing.
//!
//! [`GenerationProvider`] is what the analysis service consumes;
//! [`GenerationBackend`] is the lower seam a concrete HTTP client
//! implements (one call against a caller-chosen model, no retry policy).
//! [`FallbackRouter`] sits between them: it sends a request to the primary
//! model and retries exactly once against the configured fallback when the
//! primary answers with a non-success status.

use legajo_types::config::GenerationConfig;
use legajo_types::error::GenerationError;
use legajo_types::generation::{GenerationRequest, GenerationResponse};

/// A non-streaming content-generation backend, as consumers see it.
pub trait GenerationProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Run one generation request and return the full response.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, GenerationError>> + Send;
}

/// One exchange against a specific model. Concrete implementation lives in
/// legajo-infra (`GeminiGenerator`); retry policy belongs to the router.
pub trait GenerationBackend: Send + Sync {
    fn name(&self) -> &str;

    fn generate_with_model(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, GenerationError>> + Send;
}

/// Routes generation requests to the primary model, with a single retry
/// against the fallback model (pro -> flash by default).
///
/// Only a completed exchange with a non-success status triggers the
/// fallback; transport and decode failures are final. When the fallback
/// also completes with a non-success status, the primary's error is the
/// one reported.
pub struct FallbackRouter<'a, B: GenerationBackend> {
    backend: &'a B,
    primary: String,
    fallback: Option<String>,
}

impl<'a, B: GenerationBackend> FallbackRouter<'a, B> {
    pub fn new(backend: &'a B, config: &GenerationConfig) -> Self {
        Self {
            backend,
            primary: config.model.clone(),
            fallback: config.fallback_model.clone(),
        }
    }
}

impl<'a, B: GenerationBackend> GenerationProvider for FallbackRouter<'a, B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        match self.backend.generate_with_model(&self.primary, request).await {
            Ok(response) => Ok(response),
            Err(primary_err @ GenerationError::Status { .. }) => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        model = %self.primary,
                        fallback = %fallback,
                        error = %primary_err,
                        "Primary model failed, retrying with fallback"
                    );
                    match self.backend.generate_with_model(fallback, request).await {
                        Ok(response) => Ok(response),
                        // The fallback was best-effort; report the primary failure
                        Err(GenerationError::Status { .. }) => Err(primary_err),
                        Err(other) => Err(other),
                    }
                }
                None => Err(primary_err),
            },
            Err(other) => Err(other),
        }
    }
}
