use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

// ---------------------------------------------------------------------------
// SollinkConfig
// ---------------------------------------------------------------------------

/// Application configuration stored at `~/.sollink/config.json`.
///
/// Only front-end preferences live here. Connection state is owned by the
/// wallet layer and is never written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SollinkConfig {
    // Network
    /// Cluster name: `devnet`, `testnet` or `mainnet-beta`.
    pub network: String,
    /// Custom RPC endpoints keyed by cluster name. Each override applies
    /// only to its own cluster.
    pub custom_rpc_urls: HashMap<String, String>,

    // Wallets
    /// Connect as soon as a wallet is picked from the wallet modal.
    pub auto_connect: bool,
    /// Restricts the adapter list by name. Empty means every adapter.
    pub enabled_wallets: Vec<String>,

    // UI
    pub notifications_enabled: bool,
    pub max_notices: usize,

    // General
    /// Log filter directive. `None` uses the built-in per-crate filter;
    /// `RUST_LOG` always wins.
    pub log_level: Option<String>,
}

impl Default for SollinkConfig {
    fn default() -> Self {
        Self {
            network: "devnet".into(),
            custom_rpc_urls: HashMap::new(),
            auto_connect: true,
            enabled_wallets: Vec::new(),
            notifications_enabled: true,
            max_notices: 20,
            log_level: None,
        }
    }
}

impl SollinkConfig {
    /// Returns the base config directory: `~/.sollink/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".sollink"))
    }

    /// Returns the config file path: `~/.sollink/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.sollink/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Ensures all required directories exist.
    pub fn ensure_dirs() -> Result<()> {
        let dirs = [Self::base_dir()?, Self::logs_dir()?];
        for dir in &dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    /// Loads config from disk, or creates default if missing.
    pub fn load() -> Result<Self> {
        Self::ensure_dirs()?;
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load config from a specific file path. A missing file is created with
    /// default values.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// Save config to a specific file path, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Whether a wallet with this name is enabled by `enabled_wallets`.
    pub fn wallet_enabled(&self, name: &str) -> bool {
        self.enabled_wallets.is_empty()
            || self
                .enabled_wallets
                .iter()
                .any(|w| w.eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// ConfigManager
// ---------------------------------------------------------------------------

/// Thread-safe config holder bound to the file it was loaded from.
pub struct ConfigManager {
    config: Arc<RwLock<SollinkConfig>>,
    path: PathBuf,
}

impl ConfigManager {
    /// Load `~/.sollink/config.json`.
    pub fn new() -> Result<Self> {
        SollinkConfig::ensure_dirs()?;
        Self::from_path(SollinkConfig::config_path()?)
    }

    /// Load (or create) the config at an explicit path.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = SollinkConfig::load_from_path(&path)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            path,
        })
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> SollinkConfig {
        self.config.read().clone()
    }

    /// Mutate the config and persist it to the backing file.
    pub fn update(&self, f: impl FnOnce(&mut SollinkConfig)) -> Result<()> {
        let mut config = self.config.write();
        f(&mut config);
        config.save_to_path(&self.path)
    }

    /// The file this manager persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
