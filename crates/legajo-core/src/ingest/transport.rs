//! AssetTransport trait definition.
//!
//! The port the ingestion driver speaks through. Uses native async fn in
//! traits (RPITIT, Rust 2024 edition); the concrete implementation lives in
//! legajo-infra (`GeminiFileTransport`), and tests drive the ingestion loop
//! with scripted fakes.

use legajo_types::asset::{FileState, RemoteAsset, UploadSession};
use legajo_types::error::TransportError;

/// One round trip each of the three protocol steps.
///
/// Implementations perform no retries: retry policy belongs to the driver,
/// which knows which step it is on.
pub trait AssetTransport: Send + Sync {
    /// Open an upload session, declaring the MIME type and byte length.
    ///
    /// The returned session carries a single-use transfer URL.
    fn start_session(
        &self,
        mime_type: &str,
        byte_len: u64,
    ) -> impl std::future::Future<Output = Result<UploadSession, TransportError>> + Send;

    /// Send the full payload to the session's transfer URL, marking the
    /// transfer final. Consumes the session: transfer URLs are single-use.
    fn transfer(
        &self,
        session: UploadSession,
        payload: &[u8],
    ) -> impl std::future::Future<Output = Result<RemoteAsset, TransportError>> + Send;

    /// Read the current processing state of an asset by resource name.
    fn read_state(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<FileState, TransportError>> + Send;
}
