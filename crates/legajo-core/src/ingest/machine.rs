//! Ingestion state machine.
//!
//! One ingestion call walks INIT -> SESSION_OPEN -> UPLOADED -> DONE, with
//! every failure routed to a terminal FAILED state carrying the specific
//! error. [`step`] is a pure function of (state, event), so each transition
//! is unit-testable without a transport.

use legajo_types::asset::{FileState, RemoteAsset, UploadSession};
use legajo_types::error::{IngestError, TransportError};

/// Current position of an ingestion call.
#[derive(Debug)]
pub enum IngestState {
    /// No network calls issued yet.
    Init,
    /// A session was opened; the payload has not been transferred.
    SessionOpen(UploadSession),
    /// The payload was transferred; awaiting activation. `attempts` counts
    /// completed status reads.
    Uploaded { asset: RemoteAsset, attempts: u32 },
    /// Terminal: the asset was observed ACTIVE.
    Done(RemoteAsset),
    /// Terminal: ingestion failed with a specific error.
    Failed(IngestError),
}

impl IngestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, IngestState::Done(_) | IngestState::Failed(_))
    }
}

/// Outcome of one transport round trip, fed into [`step`].
#[derive(Debug)]
pub enum IngestEvent {
    SessionStarted(UploadSession),
    SessionFailed(TransportError),
    TransferFinalized(RemoteAsset),
    TransferFailed(TransportError),
    /// A status read completed and reported this state.
    StateRead(FileState),
    /// A status read failed at the transport level (treated as transient).
    ReadFailed(TransportError),
}

/// Advance the state machine by one event.
///
/// `max_poll_attempts` is the status-read ceiling: the read that takes the
/// completed-attempt count to the ceiling without a terminal state ends the
/// call with [`IngestError::Timeout`]. Events that do not apply to the
/// current state leave it unchanged.
pub fn step(state: IngestState, event: IngestEvent, max_poll_attempts: u32) -> IngestState {
    match (state, event) {
        (IngestState::Init, IngestEvent::SessionStarted(session)) => {
            IngestState::SessionOpen(session)
        }
        (IngestState::Init, IngestEvent::SessionFailed(err)) => {
            IngestState::Failed(IngestError::Start(err))
        }

        (IngestState::SessionOpen(_), IngestEvent::TransferFinalized(asset)) => {
            IngestState::Uploaded { asset, attempts: 0 }
        }
        (IngestState::SessionOpen(_), IngestEvent::TransferFailed(err)) => {
            IngestState::Failed(IngestError::Transfer(err))
        }

        (IngestState::Uploaded { mut asset, .. }, IngestEvent::StateRead(FileState::Active)) => {
            asset.state = FileState::Active;
            IngestState::Done(asset)
        }
        (IngestState::Uploaded { asset, .. }, IngestEvent::StateRead(FileState::Failed)) => {
            IngestState::Failed(IngestError::RemoteProcessing { name: asset.name })
        }
        (
            IngestState::Uploaded { asset, attempts },
            IngestEvent::StateRead(FileState::Processing) | IngestEvent::ReadFailed(_),
        ) => {
            let attempts = attempts + 1;
            if attempts >= max_poll_attempts {
                IngestState::Failed(IngestError::Timeout { attempts })
            } else {
                IngestState::Uploaded { asset, attempts }
            }
        }

        // Undefined (state, event) pairs do not advance the machine.
        (state, _) => state,
    }
}
