use thiserror::Error;

/// Errors from a single transport round trip against the remote service.
///
/// `Status` is a completed HTTP exchange with a non-success code; `Network`
/// is a request that never produced a response. The polling loop treats
/// both as transient when they occur on a status read.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("session-start response carried no transfer URL")]
    MissingTransferUrl,

    #[error("malformed response: {0}")]
    Deserialization(String),
}

/// Errors from one `ingest` call.
///
/// Each failure mode of the ingestion protocol is a distinct variant so the
/// caller can decide whether to retry the whole call, fall back to sending
/// content inline, or surface the error. Never collapsed into one message.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Payload or MIME type rejected before any network call.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The upload session could not be opened. No transfer was attempted.
    #[error("session start failed: {0}")]
    Start(#[source] TransportError),

    /// The payload transfer failed. The session is spent; no polling was
    /// attempted.
    #[error("payload transfer failed: {0}")]
    Transfer(#[source] TransportError),

    /// The remote service reported the asset as FAILED. Never retried.
    #[error("remote processing failed for '{name}'")]
    RemoteProcessing { name: String },

    /// The poll attempt ceiling was exhausted without a terminal state.
    #[error("asset not active after {attempts} poll attempts")]
    Timeout { attempts: u32 },

    /// The caller's cancellation token fired between steps.
    #[error("ingestion cancelled")]
    Cancelled,
}

/// Errors from the downstream generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Deserialization(String),

    /// The service answered 200 but produced no candidate content.
    #[error("no content generated")]
    EmptyResponse,
}

/// Errors from document analysis (validation + ingestion + generation).
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unsupported MIME type: '{0}'")]
    UnsupportedMime(String),

    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors sourcing configuration or credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("GEMINI_API_KEY is set to a placeholder value")]
    PlaceholderApiKey,

    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),
}
