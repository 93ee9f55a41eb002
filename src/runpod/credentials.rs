//! API key resolution from multiple sources

use log::debug;

use crate::config::env;
use crate::error::{PodError, Result};

/// API key resolution with fallback logic
pub struct ApiKeyResolver;

impl ApiKeyResolver {
    /// Resolve the API key:
    /// 1. CLI argument (if provided)
    /// 2. RUNPOD_API_KEY environment variable
    pub fn resolve(cli_key: Option<&str>) -> Result<String> {
        if let Some(key) = cli_key.filter(|k| !k.is_empty()) {
            debug!("Using API key from CLI argument");
            return Ok(key.to_string());
        }

        match std::env::var(env::API_KEY) {
            Ok(key) if !key.is_empty() => {
                debug!("Using API key from {} environment variable", env::API_KEY);
                Ok(key)
            }
            _ => Err(PodError::ApiKeyNotFound(Self::not_found_message())),
        }
    }

    /// Generate helpful error message when no key is configured
    fn not_found_message() -> String {
        format!(
            "No RunPod API key found. Please provide one using one of:\n\
             \n\
             1. CLI argument:      pod --api-key <KEY> <command>\n\
             2. Environment var:   export {}=<KEY>\n\
             \n\
             Create a key at https://www.runpod.io/console/user/settings",
            env::API_KEY
        )
    }
}
