//! Ingestion protocol and analysis logic for Legajo.
//!
//! This crate defines the "ports" (transport and provider traits) that the
//! infrastructure layer implements, plus the drivers over them: the remote
//! asset ingestion state machine and the document analysis service. It
//! depends only on `legajo-types` -- never on `legajo-infra` or any HTTP
//! crate.

pub mod analysis;
pub mod generation;
pub mod ingest;
