// --- File: crates/docsautomator_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// A static HTTP client that can be reused across the application.
///
/// It carries no timeout of its own; requests run under reqwest's defaults
/// and whatever cancellation the caller applies.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Returns a client for the given timeout.
///
/// `None` hands back a clone of [`HTTP_CLIENT`] (clones share the connection
/// pool); `Some` builds a dedicated client.
pub fn create_client(timeout_secs: Option<u64>) -> Result<Client, ReqwestError> {
    match timeout_secs {
        None => Ok(HTTP_CLIENT.clone()),
        Some(secs) => Client::builder()
            .timeout(Duration::from_secs(secs))
            .build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_and_without_timeout() {
        assert!(create_client(None).is_ok());
        assert!(create_client(Some(5)).is_ok());
    }
}
