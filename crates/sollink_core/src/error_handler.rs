use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures the header reports to the user.
#[derive(Error, Debug)]
pub enum SollinkError {
    #[error("Disconnect failed: {0}")]
    Disconnect(String),

    #[error("Not implemented: {0}")]
    Unsupported(String),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Caused by a user choice (picking an unsupported chain).
    UserError,
    /// Reported by the wallet layer.
    WalletError,
}

impl SollinkError {
    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Disconnect(_) => ErrorCategory::WalletError,
            Self::Unsupported(_) => ErrorCategory::UserError,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::Disconnect(_) => "Could not disconnect the wallet. Please try again.".into(),
            Self::Unsupported(what) => format!("{what} is not supported yet."),
        }
    }
}

// ---------------------------------------------------------------------------
// Error classification for anyhow::Error (message-pattern based)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Non-critical, log only.
    Low,
    /// Show to user, recoverable.
    Medium,
    /// Operation failed.
    High,
    /// App may be unstable.
    Critical,
}

/// Fine-grained error category derived from message patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifiedCategory {
    Rejected,
    WalletUnavailable,
    Network,
    Unsupported,
    Configuration,
    Internal,
}

/// Classified error with context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub severity: ErrorSeverity,
    pub category: ClassifiedCategory,
    pub message: String,
    pub user_message: String,
    pub recoverable: bool,
}

/// Classify an `anyhow::Error` into severity, category, and a user-friendly
/// message by inspecting the error message for known patterns.
pub fn classify_error(error: &anyhow::Error) -> ClassifiedError {
    let msg = error.to_string().to_lowercase();

    let (category, severity, user_msg) = if msg.contains("rejected") || msg.contains("denied") {
        (
            ClassifiedCategory::Rejected,
            ErrorSeverity::Low,
            "The request was rejected in the wallet.",
        )
    } else if msg.contains("not installed")
        || msg.contains("not ready")
        || msg.contains("not selected")
        || msg.contains("unknown wallet")
    {
        (
            ClassifiedCategory::WalletUnavailable,
            ErrorSeverity::Medium,
            "That wallet is not available. Pick another one.",
        )
    } else if msg.contains("not implemented") || msg.contains("not supported") {
        (
            ClassifiedCategory::Unsupported,
            ErrorSeverity::Low,
            "This feature is not available yet.",
        )
    } else if msg.contains("timeout") || msg.contains("connection") || msg.contains("rpc") {
        (
            ClassifiedCategory::Network,
            ErrorSeverity::Medium,
            "Network error. Check your connection.",
        )
    } else if msg.contains("config") {
        (
            ClassifiedCategory::Configuration,
            ErrorSeverity::Medium,
            "Configuration error. Check settings.",
        )
    } else {
        (
            ClassifiedCategory::Internal,
            ErrorSeverity::Medium,
            "An unexpected error occurred.",
        )
    };

    ClassifiedError {
        severity,
        category,
        message: error.to_string(),
        user_message: user_msg.to_string(),
        recoverable: severity != ErrorSeverity::Critical,
    }
}
