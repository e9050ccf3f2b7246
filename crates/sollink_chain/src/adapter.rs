use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Display name that identifies a wallet adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletName(String);

impl WalletName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How a wallet integration reaches the user's keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Extension,
    Hardware,
    Web,
}

/// Opaque descriptor for one supported wallet integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAdapterEntry {
    pub name: WalletName,
    pub icon: String,
    pub url: String,
    pub kind: AdapterKind,
    /// Set for adapters that are constructed for a specific cluster.
    pub network: Option<Network>,
}

impl WalletAdapterEntry {
    fn new(name: &str, icon: &str, url: &str, kind: AdapterKind) -> Self {
        Self {
            name: WalletName::new(name),
            icon: icon.to_string(),
            url: url.to_string(),
            kind,
            network: None,
        }
    }

    fn on_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }
}

/// The fixed, ordered adapter list for `network`.
pub fn default_adapters(network: Network) -> Vec<WalletAdapterEntry> {
    use AdapterKind::*;

    vec![
        WalletAdapterEntry::new("Ledger", "ledger.svg", "https://www.ledger.com", Hardware),
        WalletAdapterEntry::new("Phantom", "phantom.svg", "https://phantom.app", Extension),
        WalletAdapterEntry::new("Glow", "glow.svg", "https://glow.app", Extension),
        WalletAdapterEntry::new("Slope", "slope.svg", "https://slope.finance", Extension),
        WalletAdapterEntry::new(
            "Sollet (Extension)",
            "sollet.svg",
            "https://www.sollet.io",
            Extension,
        ),
        WalletAdapterEntry::new("Sollet", "sollet.svg", "https://www.sollet.io", Web),
        WalletAdapterEntry::new("Solflare", "solflare.svg", "https://solflare.com", Web)
            .on_network(network),
        WalletAdapterEntry::new("Torus", "torus.svg", "https://tor.us", Web),
    ]
}
