use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Solana clusters the front-end can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Devnet, Network::Testnet, Network::MainnetBeta];

    /// Cluster name as used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::MainnetBeta => "mainnet-beta",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Network::MainnetBeta),
            other => anyhow::bail!("unknown network: {other}"),
        }
    }
}

/// Default public RPC endpoint for a cluster.
pub fn cluster_api_url(network: Network) -> &'static str {
    match network {
        Network::Devnet => "https://api.devnet.solana.com",
        Network::Testnet => "https://api.testnet.solana.com",
        Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
    }
}

/// Chain families offered by the chain picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Solana,
    Evm,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Evm];

    pub fn label(&self) -> &'static str {
        match self {
            Chain::Solana => "Solana",
            Chain::Evm => "EVM",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_network_is_devnet() {
        assert_eq!(Network::default(), Network::Devnet);
    }

    #[test]
    fn cluster_urls() {
        assert_eq!(
            cluster_api_url(Network::Devnet),
            "https://api.devnet.solana.com"
        );
        assert_eq!(
            cluster_api_url(Network::Testnet),
            "https://api.testnet.solana.com"
        );
        assert_eq!(
            cluster_api_url(Network::MainnetBeta),
            "https://api.mainnet-beta.solana.com"
        );
    }

    #[test]
    fn parse_accepts_aliases_and_case() {
        assert_eq!("DevNet".parse::<Network>().unwrap(), Network::Devnet);
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::MainnetBeta);
        assert_eq!(
            " mainnet-beta ".parse::<Network>().unwrap(),
            Network::MainnetBeta
        );
        assert!("localnet".parse::<Network>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn network_serializes_kebab_case() {
        let json = serde_json::to_string(&Network::MainnetBeta).unwrap();
        assert_eq!(json, "\"mainnet-beta\"");
    }

    #[test]
    fn chain_labels() {
        assert_eq!(Chain::ALL, [Chain::Solana, Chain::Evm]);
        assert_eq!(Chain::Evm.to_string(), "EVM");
    }
}
