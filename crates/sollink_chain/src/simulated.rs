use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{Semaphore, watch};
use tracing::{debug, info, warn};

use crate::adapter::{WalletAdapterEntry, WalletName};
use crate::connection::{ConnectionState, WalletConnection, WalletError};

/// Sample identities handed out to simulated wallets, in adapter order.
const SAMPLE_KEYS: [&str; 8] = [
    "7EcDhSYGxXyscszYEp35KHN8vvw3svAuLKTzXwCFLtV",
    "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM",
    "HN7cABqLq46Es1jh92dQQisAq662SmxELLLsHHe4YWrH",
    "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T",
    "GgBaCs3NCBuZN12kCJgAW63ydqohFkHEdfdEXBPzLHq",
    "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1",
    "FoXRrD1mTwGbXLGzQLpxoYy2WwyRmGmUbtHJ5dPRxR5x",
    "8szGkuLTAux9XMgZ2vtY39jVSowEcpBfFfD8hXSEqdGC",
];

#[derive(Debug, Default)]
struct Knobs {
    reject_next_connect: bool,
    fail_next_disconnect: Option<String>,
}

/// In-process stand-in for the wallet layer.
///
/// Every installed wallet approves connections immediately with a fixed
/// identity. Failures and slow disconnects can be scripted.
pub struct SimulatedWallet {
    state_tx: watch::Sender<ConnectionState>,
    accounts: HashMap<WalletName, String>,
    knobs: Mutex<Knobs>,
    disconnect_gate: Option<Arc<Semaphore>>,
    disconnect_calls: AtomicUsize,
}

impl SimulatedWallet {
    /// A wallet layer with no installed wallets.
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::disconnected());
        Self {
            state_tx,
            accounts: HashMap::new(),
            knobs: Mutex::new(Knobs::default()),
            disconnect_gate: None,
            disconnect_calls: AtomicUsize::new(0),
        }
    }

    /// A wallet layer where every adapter in `adapters` is installed.
    pub fn for_adapters(adapters: &[WalletAdapterEntry]) -> Self {
        adapters
            .iter()
            .zip(SAMPLE_KEYS.iter().cycle())
            .fold(Self::new(), |wallet, (adapter, key)| {
                wallet.with_account(adapter.name.clone(), *key)
            })
    }

    /// Install a wallet that connects as `public_key`.
    pub fn with_account(mut self, wallet: WalletName, public_key: impl Into<String>) -> Self {
        self.accounts.insert(wallet, public_key.into());
        self
    }

    /// Hold every disconnect until [`release_disconnect`](Self::release_disconnect)
    /// is called once per pending request.
    pub fn with_held_disconnects(mut self) -> Self {
        self.disconnect_gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn release_disconnect(&self) {
        if let Some(gate) = &self.disconnect_gate {
            gate.add_permits(1);
        }
    }

    /// Make the next `connect` fail as if the user rejected the prompt.
    pub fn reject_next_connect(&self) {
        self.knobs.lock().reject_next_connect = true;
    }

    /// Make the next `disconnect` fail with `reason`.
    pub fn fail_next_disconnect(&self, reason: impl Into<String>) {
        self.knobs.lock().fail_next_disconnect = Some(reason.into());
    }

    /// Drop the session from the wallet side, as when the user revokes
    /// access inside the wallet itself.
    pub fn revoke(&self) {
        if self.state_tx.borrow().connected {
            info!("wallet revoked the session");
            self.state_tx.send_replace(ConnectionState::disconnected());
        }
    }

    /// Number of `disconnect` calls received so far.
    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletConnection for SimulatedWallet {
    fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    fn state(&self) -> ConnectionState {
        self.state_tx.borrow().clone()
    }

    async fn connect(&self, wallet: &WalletName) -> Result<(), WalletError> {
        let public_key = self
            .accounts
            .get(wallet)
            .cloned()
            .ok_or_else(|| WalletError::NotReady(wallet.to_string()))?;

        let rejected = std::mem::take(&mut self.knobs.lock().reject_next_connect);
        if rejected {
            warn!(%wallet, "connection request rejected");
            return Err(WalletError::Rejected);
        }

        info!(%wallet, %public_key, "wallet connected");
        self.state_tx.send_replace(ConnectionState::connected(public_key));
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.disconnect_gate {
            debug!("disconnect held");
            let permit = gate
                .acquire()
                .await
                .map_err(|e| WalletError::Disconnect(e.to_string()))?;
            permit.forget();
        }

        let scripted_failure = self.knobs.lock().fail_next_disconnect.take();
        if let Some(reason) = scripted_failure {
            warn!(%reason, "disconnect failed");
            return Err(WalletError::Disconnect(reason));
        }

        if self.state_tx.borrow().connected {
            info!("wallet disconnected");
            self.state_tx.send_replace(ConnectionState::disconnected());
        }
        Ok(())
    }
}
