//! Error types for Triton-Lite controller operations.

use thiserror::Error;

/// Result type alias for Triton-Lite operations.
pub type Result<T> = std::result::Result<T, TritonError>;

/// Error types for vehicle communication.
#[derive(Error, Debug)]
pub enum TritonError {
    /// Serial port could not be opened (busy, missing, or permission denied)
    #[error("Connection error on {port}: {source}")]
    Connection {
        /// Port that failed to open
        port: String,
        /// Underlying serial port error
        #[source]
        source: serialport::Error,
    },

    /// An operation needed an open connection but there is none
    #[error("Not connected to the vehicle")]
    NotConnected,

    /// Write or read failed on an open connection
    #[error("Communication error: {0}")]
    Communication(#[from] std::io::Error),

    /// Port enumeration failed
    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),
}

impl TritonError {
    /// Short label shown as the title of an operator-facing error message
    pub fn title(&self) -> &'static str {
        match self {
            TritonError::Connection { .. } => "Connection error",
            TritonError::NotConnected => "Not connected",
            TritonError::Communication(_) => "Communication error",
            TritonError::SerialPort(_) => "Serial port error",
        }
    }
}
