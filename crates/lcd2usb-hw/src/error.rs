//! Error types for the LCD2USB hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No adapter with the LCD2USB VID:PID is attached.
    #[error("LCD2USB device not found (VID:PID 0403:C630)")]
    DeviceNotFound,

    /// A control transfer failed, timed out or came back short.
    #[error("USB request failed: {0}")]
    Transport(String),

    /// An echo round returned something other than what was sent.
    #[error("Echo mismatch: sent 0x{sent:04X}, received 0x{received:04X}")]
    EchoMismatch { sent: u16, received: u16 },

    /// Invalid fade direction name.
    #[error("Invalid fade direction: {0}")]
    InvalidFadeDirection(String),
}

impl From<rusb::Error> for Error {
    fn from(e: rusb::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl Error {
    /// Returns true for failures of the underlying control transfer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
