use thiserror::Error;

/// Failures reported by an EOS kit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EosKitError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Asset not registered: {token}/{symbol}")]
    UnknownAsset { token: String, symbol: String },

    #[error("Insufficient balance")]
    InsufficientBalance,
}
