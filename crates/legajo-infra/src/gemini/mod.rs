//! Gemini API clients.
//!
//! `GeminiFileTransport` speaks the Files API resumable-upload protocol
//! (the [`AssetTransport`](legajo_core::ingest::transport::AssetTransport)
//! port); `GeminiGenerator` runs extraction calls against `generateContent`
//! (the [`GenerationBackend`](legajo_core::generation::GenerationBackend)
//! port -- model fallback is routed in legajo-core).

pub mod files;
pub mod generate;
mod types;

pub use self::files::GeminiFileTransport;
pub use self::generate::GeminiGenerator;

/// Production API base URL.
pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
