//! Infrastructure implementations for Legajo.
//!
//! Concrete HTTP clients for the Gemini Files and generateContent APIs,
//! plus env-var credential sourcing and config-file loading. Implements
//! the ports defined in `legajo-core`.

pub mod config;
pub mod gemini;
pub mod secret;
