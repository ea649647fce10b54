// [apps/pprl-service/src/config.rs]
//! Runtime configuration, read from environment variables with documented
//! defaults. No cross-request shared state is derived from it; it only
//! governs how the socket is bound and how large a request body may be.

use std::net::SocketAddr;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Bind address and request body size limit for one running instance.
#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig {
    /// Socket address the Axum listener binds to. `PPRL_SERVICE_BIND_ADDRESS`,
    /// default `0.0.0.0:8000`.
    pub bind_address: SocketAddr,
    /// Maximum accepted request body size, in bytes.
    /// `PPRL_SERVICE_MAX_BODY_BYTES`, default 2 MiB.
    pub max_body_bytes: usize,
}

impl ServiceConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let bind_address = std::env::var("PPRL_SERVICE_BIND_ADDRESS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.parse().expect("default bind address is valid"));

        let max_body_bytes = std::env::var("PPRL_SERVICE_MAX_BODY_BYTES")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Self {
            bind_address,
            max_body_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_documented_defaults() {
        std::env::remove_var("PPRL_SERVICE_BIND_ADDRESS");
        std::env::remove_var("PPRL_SERVICE_MAX_BODY_BYTES");
        let config = ServiceConfig::from_env();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS.parse().unwrap());
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}
