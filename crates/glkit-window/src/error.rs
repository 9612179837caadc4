use thiserror::Error;

/// Windowing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("windowing system initialization failed: {0}")]
    InitializationFailed(String),

    #[error("window creation failed: {0}")]
    CreationFailed(String),

    #[error("no monitor connected for {0} mode")]
    NoMonitor(&'static str),
}

pub type WindowResult<T> = Result<T, WindowError>;
