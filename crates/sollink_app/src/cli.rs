use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sollink_chain::Network;
use sollink_core::config::SollinkConfig;

/// Solana wallet connection demo
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Cluster to connect to (devnet, testnet, mainnet-beta)
    #[arg(long)]
    pub network: Option<String>,

    /// Custom RPC endpoint for the selected cluster (this run only)
    #[arg(long = "rpc-url")]
    pub rpc_url: Option<String>,

    /// Path to a config file (defaults to ~/.sollink/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only record the picked wallet; connect with the `connect-selected` command
    #[arg(long = "no-auto-connect", default_value_t = false)]
    pub no_auto_connect: bool,
}

impl CliArgs {
    /// Layer command line flags over the loaded config for this run only.
    pub fn apply(&self, config: &mut SollinkConfig) -> Result<()> {
        if let Some(network) = &self.network {
            let network: Network = network.parse()?;
            config.network = network.as_str().to_string();
        }
        if let Some(url) = &self.rpc_url {
            let network: Network = config.network.parse()?;
            config
                .custom_rpc_urls
                .insert(network.as_str().to_string(), url.clone());
        }
        if self.no_auto_connect {
            config.auto_connect = false;
        }
        Ok(())
    }
}
