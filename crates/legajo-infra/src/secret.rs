//! API key sourcing.
//!
//! The Gemini key comes from the `GEMINI_API_KEY` environment variable and
//! is wrapped in [`SecretString`] at the boundary. A missing key and a key
//! still set to the sample placeholder are distinct errors, surfaced before
//! any network call.

use secrecy::SecretString;

use legajo_types::error::ConfigError;

/// Env var holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Placeholder value shipped in sample configs; treated as unset.
const PLACEHOLDER: &str = "your_actual_api_key_here";

/// Read and validate the API key from the environment.
pub fn api_key_from_env() -> Result<SecretString, ConfigError> {
    match std::env::var(API_KEY_VAR) {
        Ok(value) if value == PLACEHOLDER => Err(ConfigError::PlaceholderApiKey),
        Ok(value) if value.is_empty() => Err(ConfigError::MissingApiKey),
        Ok(value) => Ok(SecretString::from(value)),
        Err(_) => Err(ConfigError::MissingApiKey),
    }
}
