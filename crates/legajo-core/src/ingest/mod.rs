//! Remote asset ingestion.
//!
//! Drives a binary payload through the remote upload-and-activate handshake:
//! session start, single-shot transfer, then bounded activation polling. The
//! caller gets back an activated asset handle or one of four distinct
//! failures (start, transfer, remote processing, timeout).
//!
//! Session start and transfer are each attempted exactly once per call;
//! only the polling step loops, and its two backoff schedules live in
//! [`backoff`]. The walk itself is the pure state machine in [`machine`].

pub mod backoff;
pub mod machine;
pub mod transport;

use tokio_util::sync::CancellationToken;

use legajo_types::asset::AssetHandle;
use legajo_types::config::IngestConfig;
use legajo_types::error::IngestError;

use self::backoff::PollSchedule;
use self::machine::{step, IngestEvent, IngestState};
use self::transport::AssetTransport;

/// Drives one or more ingestion calls over a transport.
///
/// Stateless between calls: each `ingest` owns its session and its polling
/// loop, so concurrent calls over the same `Ingestor` need no coordination.
pub struct Ingestor<'a, T: AssetTransport> {
    transport: &'a T,
    config: IngestConfig,
    cancel: Option<CancellationToken>,
}

impl<'a, T: AssetTransport> Ingestor<'a, T> {
    pub fn new(transport: &'a T, config: IngestConfig) -> Self {
        Self {
            transport,
            config,
            cancel: None,
        }
    }

    /// Attach a cancellation token, checked before each network call and
    /// before each backoff sleep.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Upload a payload and block until the remote asset is ACTIVE.
    ///
    /// Returns the asset handle only after a status read observed `ACTIVE`;
    /// a handle is never returned for an asset still `PROCESSING`.
    pub async fn ingest(
        &self,
        payload: &[u8],
        mime_type: &str,
    ) -> Result<AssetHandle, IngestError> {
        if payload.is_empty() {
            return Err(IngestError::InvalidPayload("empty payload".to_string()));
        }
        if mime_type.is_empty() {
            return Err(IngestError::InvalidPayload("empty MIME type".to_string()));
        }

        let schedule = PollSchedule::from_config(&self.config);
        let max_attempts = self.config.max_poll_attempts;
        let mut state = IngestState::Init;

        loop {
            state = match state {
                IngestState::Init => {
                    self.check_cancelled()?;
                    tracing::debug!(
                        mime_type,
                        byte_len = payload.len(),
                        "Opening upload session"
                    );
                    let event = match self
                        .transport
                        .start_session(mime_type, payload.len() as u64)
                        .await
                    {
                        Ok(session) => IngestEvent::SessionStarted(session),
                        Err(err) => IngestEvent::SessionFailed(err),
                    };
                    step(IngestState::Init, event, max_attempts)
                }

                IngestState::SessionOpen(session) => {
                    self.check_cancelled()?;
                    tracing::debug!(byte_len = session.byte_len, "Transferring payload");
                    let event = match self.transport.transfer(session.clone(), payload).await {
                        Ok(asset) => IngestEvent::TransferFinalized(asset),
                        Err(err) => IngestEvent::TransferFailed(err),
                    };
                    step(IngestState::SessionOpen(session), event, max_attempts)
                }

                IngestState::Uploaded { asset, attempts } => {
                    self.check_cancelled()?;
                    let (event, transient) = match self.transport.read_state(&asset.name).await {
                        Ok(observed) => (IngestEvent::StateRead(observed), false),
                        Err(err) => {
                            tracing::warn!(
                                name = %asset.name,
                                error = %err,
                                "Status read failed, will retry"
                            );
                            (IngestEvent::ReadFailed(err), true)
                        }
                    };
                    let next = step(IngestState::Uploaded { asset, attempts }, event, max_attempts);
                    if let IngestState::Uploaded { attempts, .. } = &next {
                        let delay = if transient {
                            schedule.transient_delay(*attempts)
                        } else {
                            schedule.processing_delay(*attempts)
                        };
                        tracing::debug!(
                            attempt = attempts,
                            delay_ms = delay.as_millis() as u64,
                            "Asset not active yet"
                        );
                        self.sleep(delay).await?;
                    }
                    next
                }

                IngestState::Done(asset) => {
                    tracing::info!(handle = %asset.handle, "Asset active");
                    return Ok(asset.handle);
                }

                IngestState::Failed(err) => return Err(err),
            };
        }
    }

    fn check_cancelled(&self) -> Result<(), IngestError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(IngestError::Cancelled),
            _ => Ok(()),
        }
    }

    async fn sleep(&self, delay: std::time::Duration) -> Result<(), IngestError> {
        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => Err(IngestError::Cancelled),
                    _ = tokio::time::sleep(delay) => Ok(()),
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }
}
