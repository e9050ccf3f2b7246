use tracing::warn;

use crate::connection::WalletError;

const EVM_CONNECT: &str = "EVM wallet connection";

/// Connect an EVM wallet.
///
/// This is a stub. The chain picker offers EVM, but only Solana wallets are
/// wired through the adapter layer.
pub async fn connect_evm_wallet() -> Result<String, WalletError> {
    warn!("{EVM_CONNECT} to be implemented");
    Err(WalletError::Unsupported(EVM_CONNECT.into()))
}
