pub mod config;
pub mod error_handler;
pub mod logging;
pub mod notifications;

pub use config::{ConfigManager, SollinkConfig};
pub use error_handler::{
    ClassifiedCategory, ClassifiedError, ErrorCategory, ErrorSeverity, SollinkError,
    classify_error,
};
pub use notifications::{Notice, NoticeBoard, NoticeKind};
