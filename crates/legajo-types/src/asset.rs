//! Remote asset and upload session types.
//!
//! These model the two sides of the ingestion handshake: the local
//! [`UploadSession`] (created per ingestion call, consumed exactly once by
//! the transfer step) and the [`RemoteAsset`] the service creates from it.
//! The remote service owns the asset; locally we only hold its handle and
//! the last observed [`FileState`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing state of a remote asset, as reported by the service.
///
/// Wire values are the service's own: `PROCESSING | ACTIVE | FAILED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Processing,
    Active,
    Failed,
}

impl FileState {
    /// Terminal states require no further polling.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileState::Active | FileState::Failed)
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileState::Processing => write!(f, "PROCESSING"),
            FileState::Active => write!(f, "ACTIVE"),
            FileState::Failed => write!(f, "FAILED"),
        }
    }
}

impl FromStr for FileState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROCESSING" => Ok(FileState::Processing),
            "ACTIVE" => Ok(FileState::Active),
            "FAILED" => Ok(FileState::Failed),
            other => Err(format!("unknown file state: '{other}'")),
        }
    }
}

/// Opaque reference the remote service issues for uploaded content.
///
/// Stable once issued; embedded verbatim in downstream generation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHandle(pub String);

impl AssetHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A remote asset as last observed by this process.
///
/// `handle` is the URI downstream generation calls embed; `name` is the
/// resource name the status endpoint is polled under. The service reports
/// both from the finalize response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAsset {
    pub handle: AssetHandle,
    pub name: String,
    pub state: FileState,
}

/// One in-flight binary transfer.
///
/// Created when the service answers a session-start request; valid for
/// exactly one transfer. A failed transfer must restart ingestion from
/// scratch with a new session -- transfer URLs are single-use.
#[derive(Debug, Clone)]
pub struct UploadSession {
    /// Single-use transfer URL returned by the session-start response.
    pub transfer_url: String,
    /// MIME type declared at session start, forwarded verbatim.
    pub mime_type: String,
    /// Payload length declared at session start.
    pub byte_len: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_state_wire_values() {
        assert_eq!(
            serde_json::to_string(&FileState::Processing).unwrap(),
            "\"PROCESSING\""
        );
        assert_eq!(
            serde_json::from_str::<FileState>("\"ACTIVE\"").unwrap(),
            FileState::Active
        );
    }

    #[test]
    fn test_file_state_round_trip() {
        for state in [FileState::Processing, FileState::Active, FileState::Failed] {
            assert_eq!(state.to_string().parse::<FileState>().unwrap(), state);
        }
    }

    #[test]
    fn test_file_state_terminal() {
        assert!(!FileState::Processing.is_terminal());
        assert!(FileState::Active.is_terminal());
        assert!(FileState::Failed.is_terminal());
    }

    #[test]
    fn test_file_state_unknown_value() {
        assert!("DELETED".parse::<FileState>().is_err());
    }

    #[test]
    fn test_asset_handle_display() {
        let handle = AssetHandle("https://service.example/v1beta/files/abc123".to_string());
        assert_eq!(handle.to_string(), "https://service.example/v1beta/files/abc123");
    }
}
