//! Wallet connection
//!
//! Attaching a wallet to an account goes through a connector that talks to
//! an external wallet provider. The ledger only ever sees the resulting
//! address string; the handshake itself is the connector's concern. The
//! production deployment plugs in a real provider, tests and the demo
//! binary use `SimulatedConnector`.

use crate::types::LedgerError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::timeout;

/// Length of the base64url body following the "UQ" prefix
const ADDRESS_BODY_LEN: usize = 46;

/// Check that an address has the expected user-friendly form
///
/// Addresses start with "UQ" followed by 46 base64url characters. This is
/// a shape check only; no checksum is verified.
pub fn is_valid_address(address: &str) -> bool {
    let Some(body) = address.strip_prefix("UQ") else {
        return false;
    };
    body.len() == ADDRESS_BODY_LEN
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// A source of wallet addresses
///
/// Implementations perform whatever handshake their provider requires and
/// resolve to the connected address.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Run the connection handshake and return the wallet address
    async fn connect(&self) -> Result<String, LedgerError>;
}

/// Connect with an upper bound on handshake time
///
/// # Errors
///
/// Returns `WalletTimeout` if the connector does not resolve within
/// `timeout_ms`, or the connector's own error if it fails sooner.
pub async fn connect_with_timeout(
    connector: &dyn WalletConnector,
    timeout_ms: u64,
) -> Result<String, LedgerError> {
    match timeout(Duration::from_millis(timeout_ms), connector.connect()).await {
        Ok(result) => result,
        Err(_) => Err(LedgerError::WalletTimeout { timeout_ms }),
    }
}

/// Deterministic in-process connector
///
/// Produces sequentially numbered, well-formed addresses after a fixed
/// simulated handshake delay.
pub struct SimulatedConnector {
    delay: Duration,
    counter: AtomicU64,
}

impl SimulatedConnector {
    /// Create a connector with the given simulated handshake delay
    pub fn new(delay: Duration) -> Self {
        SimulatedConnector {
            delay,
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SimulatedConnector {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl WalletConnector for SimulatedConnector {
    async fn connect(&self) -> Result<String, LedgerError> {
        tokio::time::sleep(self.delay).await;

        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let body = format!("{:0>width$}", seq, width = ADDRESS_BODY_LEN);
        Ok(format!("UQ{}", body))
    }
}
