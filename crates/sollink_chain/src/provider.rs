//! Provider chain: connection endpoint → wallet registry → wallet modal.
//!
//! [`ProviderStack`] is built once at startup and rebuilt only when the
//! network changes. Everything below it reads the endpoint, the adapter list
//! and the connection state through it.

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use sollink_core::config::SollinkConfig;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::adapter::{WalletAdapterEntry, WalletName, default_adapters};
use crate::connection::{ConnectionState, WalletConnection, WalletError};
use crate::endpoint::EndpointResolver;
use crate::network::Network;

/// One row of the wallet modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletOption {
    pub name: WalletName,
    pub icon: String,
    pub selected: bool,
}

/// Connection layer: network and resolved endpoint.
#[derive(Debug, Clone)]
struct ConnectionLayer {
    network: Network,
    endpoint: String,
}

pub struct ProviderStack {
    connection: RwLock<ConnectionLayer>,
    resolver: RwLock<EndpointResolver>,
    wallets: RwLock<Vec<WalletAdapterEntry>>,
    settings: SollinkConfig,
    selected: Mutex<Option<WalletName>>,
    backend: Arc<dyn WalletConnection>,
}

impl ProviderStack {
    /// Build the provider chain from config.
    ///
    /// Fails on an unknown network name or an invalid custom RPC URL.
    pub fn from_config(config: &SollinkConfig, backend: Arc<dyn WalletConnection>) -> Result<Self> {
        let network: Network = config.network.parse()?;
        let mut resolver = EndpointResolver::new();
        for (cluster, url) in &config.custom_rpc_urls {
            let cluster: Network = cluster
                .parse()
                .with_context(|| format!("custom_rpc_urls entry for {cluster}"))?;
            resolver.set_custom(cluster, url.clone())?;
        }
        Ok(Self::new(network, resolver, config, backend))
    }

    pub fn new(
        network: Network,
        resolver: EndpointResolver,
        config: &SollinkConfig,
        backend: Arc<dyn WalletConnection>,
    ) -> Self {
        for name in &config.enabled_wallets {
            let known = default_adapters(network)
                .iter()
                .any(|a| a.name.as_str().eq_ignore_ascii_case(name));
            if !known {
                warn!(wallet = %name, "ignoring unknown wallet in enabled_wallets");
            }
        }

        let connection = ConnectionLayer {
            network,
            endpoint: resolver.resolve(network),
        };
        let wallets = build_adapters(network, config);
        info!(
            %network,
            endpoint = %connection.endpoint,
            wallets = wallets.len(),
            auto_connect = config.auto_connect,
            "provider stack ready"
        );

        Self {
            connection: RwLock::new(connection),
            resolver: RwLock::new(resolver),
            wallets: RwLock::new(wallets),
            settings: config.clone(),
            selected: Mutex::new(None),
            backend,
        }
    }

    // -- Connection layer ---------------------------------------------------

    pub fn network(&self) -> Network {
        self.connection.read().network
    }

    pub fn endpoint(&self) -> String {
        self.connection.read().endpoint.clone()
    }

    /// Switch clusters, rebuilding the endpoint and the adapter list.
    ///
    /// Rejected while a wallet is connected.
    pub fn set_network(&self, network: Network) -> Result<()> {
        if self.backend.state().connected {
            anyhow::bail!("cannot change network while a wallet is connected");
        }
        let endpoint = self.resolver.read().resolve(network);
        let wallets = build_adapters(network, &self.settings);

        {
            let mut selected = self.selected.lock();
            let still_listed = selected
                .as_ref()
                .is_some_and(|name| wallets.iter().any(|w| &w.name == name));
            if !still_listed {
                *selected = None;
            }
        }
        *self.wallets.write() = wallets;
        *self.connection.write() = ConnectionLayer {
            network,
            endpoint: endpoint.clone(),
        };
        info!(%network, %endpoint, "network changed");
        Ok(())
    }

    /// Point the current network at a custom RPC endpoint.
    pub fn set_custom_endpoint(&self, url: &str) -> Result<()> {
        let network = self.network();
        let mut resolver = self.resolver.write();
        resolver.set_custom(network, url.to_string())?;
        self.connection.write().endpoint = resolver.resolve(network);
        Ok(())
    }

    /// Drop the current network's custom endpoint.
    pub fn reset_endpoint(&self) {
        let network = self.network();
        let mut resolver = self.resolver.write();
        resolver.reset_to_default(network);
        self.connection.write().endpoint = resolver.resolve(network);
    }

    /// Whether the current network uses a custom endpoint.
    pub fn endpoint_is_custom(&self) -> bool {
        self.resolver.read().is_custom(self.network())
    }

    // -- Wallet layer -------------------------------------------------------

    /// The adapter entries, in registration order.
    pub fn wallets(&self) -> Vec<WalletAdapterEntry> {
        self.wallets.read().clone()
    }

    pub fn auto_connect(&self) -> bool {
        self.settings.auto_connect
    }

    pub fn selected(&self) -> Option<WalletName> {
        self.selected.lock().clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.backend.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.backend.subscribe()
    }

    /// Record `name` as the chosen wallet and, with auto-connect, connect it.
    pub async fn select(&self, name: &WalletName) -> Result<(), WalletError> {
        let listed = self.wallets.read().iter().any(|w| &w.name == name);
        if !listed {
            return Err(WalletError::UnknownWallet(name.to_string()));
        }
        *self.selected.lock() = Some(name.clone());
        debug!(wallet = %name, "wallet selected");

        if self.settings.auto_connect {
            self.connect().await
        } else {
            Ok(())
        }
    }

    /// Connect the selected wallet.
    pub async fn connect(&self) -> Result<(), WalletError> {
        let wallet = self.selected().ok_or(WalletError::NotSelected)?;
        self.backend.connect(&wallet).await
    }

    pub async fn disconnect(&self) -> Result<(), WalletError> {
        self.backend.disconnect().await
    }

    // -- Modal layer --------------------------------------------------------

    /// Rows for the wallet modal.
    pub fn wallet_options(&self) -> Vec<WalletOption> {
        let selected = self.selected();
        self.wallets
            .read()
            .iter()
            .map(|w| WalletOption {
                name: w.name.clone(),
                icon: w.icon.clone(),
                selected: selected.as_ref() == Some(&w.name),
            })
            .collect()
    }
}

fn build_adapters(network: Network, config: &SollinkConfig) -> Vec<WalletAdapterEntry> {
    default_adapters(network)
        .into_iter()
        .filter(|a| config.wallet_enabled(a.name.as_str()))
        .collect()
}
