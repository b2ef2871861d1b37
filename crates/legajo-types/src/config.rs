//! Global configuration types for Legajo.
//!
//! `LegajoConfig` represents the top-level `config.toml` that controls
//! polling limits, backoff caps, payload limits, and generation settings.
//! The poll ceiling and backoff caps carry the upstream defaults but are
//! deliberately configurable: they are not tuned for any service SLA.

use serde::{Deserialize, Serialize};

/// Ingestion protocol tuning.
///
/// Poll delays follow two schedules: linear for ordinary "still processing"
/// reads, exponential for transient status-read failures. The two are kept
/// distinct so "service is still working" and "service is unreachable" back
/// off differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum number of status reads before giving up with a timeout.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Base delay (ms) for the linear "still processing" schedule.
    #[serde(default = "default_poll_base_delay_ms")]
    pub poll_base_delay_ms: u64,

    /// Cap (ms) for the linear schedule.
    #[serde(default = "default_poll_max_delay_ms")]
    pub poll_max_delay_ms: u64,

    /// Cap (ms) for the exponential transient-error schedule.
    #[serde(default = "default_transient_max_delay_ms")]
    pub transient_max_delay_ms: u64,
}

fn default_max_poll_attempts() -> u32 {
    15
}

fn default_poll_base_delay_ms() -> u64 {
    1_000
}

fn default_poll_max_delay_ms() -> u64 {
    5_000
}

fn default_transient_max_delay_ms() -> u64 {
    10_000
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_poll_attempts: default_max_poll_attempts(),
            poll_base_delay_ms: default_poll_base_delay_ms(),
            poll_max_delay_ms: default_poll_max_delay_ms(),
            transient_max_delay_ms: default_transient_max_delay_ms(),
        }
    }
}

/// Generation call settings, forwarded to the model endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Primary model for extraction calls.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model to retry against once if the primary returns a non-success
    /// response. `None` disables the fallback.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_fallback_model() -> Option<String> {
    Some("gemini-2.5-flash".to_string())
}

fn default_temperature() -> f64 {
    0.1
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f64 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    8_192
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            fallback_model: default_fallback_model(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Payload acceptance limits, checked before any network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum single payload size in bytes.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: u64,
}

fn default_max_payload_bytes() -> u64 {
    50 * 1024 * 1024
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

/// Top-level configuration, loaded from `~/.legajo/config.toml`.
///
/// All sections and fields have defaults; an absent or empty file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegajoConfig {
    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_config_default_values() {
        let config = IngestConfig::default();
        assert_eq!(config.max_poll_attempts, 15);
        assert_eq!(config.poll_base_delay_ms, 1_000);
        assert_eq!(config.poll_max_delay_ms, 5_000);
        assert_eq!(config.transient_max_delay_ms, 10_000);
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: LegajoConfig = toml::from_str("").unwrap();
        assert_eq!(config.ingest.max_poll_attempts, 15);
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert_eq!(
            config.generation.fallback_model.as_deref(),
            Some("gemini-2.5-flash")
        );
        assert_eq!(config.limits.max_payload_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_config_deserialize_partial_section() {
        let toml_str = r#"
[ingest]
max_poll_attempts = 30

[generation]
model = "gemini-2.0-flash"
"#;
        let config: LegajoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ingest.max_poll_attempts, 30);
        // Untouched fields keep their defaults
        assert_eq!(config.ingest.poll_max_delay_ms, 5_000);
        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert_eq!(config.generation.max_output_tokens, 8_192);
    }

    #[test]
    fn test_generation_config_defaults_match_upstream() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.max_output_tokens, 8_192);
    }
}
