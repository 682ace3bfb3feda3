//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;

/// User-Agent sent with every completion request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Initializes the HTTP client used for completion requests.
///
/// Creates a `reqwest::Client` with the crate's User-Agent and the Rustls
/// TLS backend. No request timeout is set: a lookup waits as long as the
/// transport allows.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client() -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("ip_intel/"));
    }

    #[test]
    fn test_init_client_succeeds() {
        assert!(init_client().is_ok());
    }
}
