//! The boundary between the front-end and the wallet layer.
//!
//! The wallet layer owns [`ConnectionState`]; everything above it only reads
//! that state through a [`tokio::sync::watch`] subscription and asks for
//! changes through [`WalletConnection::connect`] / [`WalletConnection::disconnect`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::adapter::WalletName;

/// Whether a wallet identity is currently linked to the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    pub connected: bool,
    pub public_key: Option<String>,
}

impl ConnectionState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(public_key: impl Into<String>) -> Self {
        Self {
            connected: true,
            public_key: Some(public_key.into()),
        }
    }
}

/// Errors the wallet layer reports back to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("no wallet selected")]
    NotSelected,

    #[error("unknown wallet: {0}")]
    UnknownWallet(String),

    #[error("wallet {0} is not ready")]
    NotReady(String),

    #[error("user rejected the request")]
    Rejected,

    #[error("wallet is not connected")]
    NotConnected,

    #[error("disconnect failed: {0}")]
    Disconnect(String),

    #[error("{0} is not implemented")]
    Unsupported(String),
}

/// Connection capability supplied by the wallet layer.
#[async_trait]
pub trait WalletConnection: Send + Sync {
    /// Subscribe to connection state changes. The receiver starts with the
    /// current state already marked as seen.
    fn subscribe(&self) -> watch::Receiver<ConnectionState>;

    /// Snapshot of the current connection state.
    fn state(&self) -> ConnectionState;

    /// Run the handshake with `wallet`.
    async fn connect(&self, wallet: &WalletName) -> Result<(), WalletError>;

    /// Unlink the current wallet identity.
    async fn disconnect(&self) -> Result<(), WalletError>;
}
