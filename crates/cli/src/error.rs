//! Error types for the client binary.

use std::fmt;

/// Represents an error raised by the transport or the terminal.
#[derive(Debug)]
pub enum ClientError {
    /// The server URL uses a scheme other than ws or wss.
    UnsupportedScheme(String),
    /// The WebSocket layer failed.
    Socket(tokio_tungstenite::tungstenite::Error),
    /// Terminal input or output failed.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::UnsupportedScheme(scheme) => {
                write!(f, "Unsupported URL scheme '{scheme}' (expected ws or wss)")
            }
            ClientError::Socket(err) => write!(f, "WebSocket error: {err}"),
            ClientError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Socket(err)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err)
    }
}
