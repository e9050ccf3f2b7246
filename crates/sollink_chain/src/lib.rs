// Wallet-adapter layer: networks, adapters, connection boundary, providers.

pub mod adapter;
pub mod connection;
pub mod endpoint;
pub mod evm;
pub mod network;
pub mod provider;
pub mod simulated;

// Re-export primary types for convenient access.
pub use adapter::{AdapterKind, WalletAdapterEntry, WalletName, default_adapters};
pub use connection::{ConnectionState, WalletConnection, WalletError};
pub use endpoint::{EndpointResolver, validate_url};
pub use network::{Chain, Network, cluster_api_url};
pub use provider::{ProviderStack, WalletOption};
pub use simulated::SimulatedWallet;
