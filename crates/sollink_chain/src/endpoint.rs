use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::network::{Network, cluster_api_url};

/// Resolves the RPC endpoint for a network, honouring per-network custom
/// overrides on top of [`cluster_api_url`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointResolver {
    overrides: HashMap<Network, String>,
}

impl EndpointResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint URL for `network`.
    pub fn resolve(&self, network: Network) -> String {
        self.overrides
            .get(&network)
            .cloned()
            .unwrap_or_else(|| cluster_api_url(network).to_string())
    }

    /// Whether `network` currently resolves to a custom endpoint.
    pub fn is_custom(&self, network: Network) -> bool {
        self.overrides.contains_key(&network)
    }

    /// Override the endpoint for a network.
    ///
    /// Returns `Err` if the URL fails validation.
    pub fn set_custom(&mut self, network: Network, url: String) -> anyhow::Result<()> {
        if !validate_url(&url) {
            anyhow::bail!("invalid RPC URL: {url}");
        }
        info!(%network, %url, "custom RPC endpoint set");
        self.overrides.insert(network, url);
        Ok(())
    }

    /// Drop a custom override, restoring the cluster default.
    pub fn reset_to_default(&mut self, network: Network) {
        if self.overrides.remove(&network).is_some() {
            info!(%network, "RPC endpoint reset to default");
        }
    }
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}
