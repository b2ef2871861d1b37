//! Shared domain types for Legajo.
//!
//! This crate contains the core domain types used across the Legajo pipeline:
//! remote assets, upload sessions, document kinds, generation requests, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod asset;
pub mod config;
pub mod document;
pub mod error;
pub mod generation;
