//! WebSocket connection to the game controller.
//!
//! Frames are UTF-8 text either way; this layer moves them whole and leaves
//! parsing to the protocol module. Binary frames and pings are ignored.

use avalam_core::protocol::ClientMessage;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A live connection to the controller.
pub struct Connection {
    write: SplitSink<Socket, Message>,
    read: SplitStream<Socket>,
}

impl Connection {
    /// Opens a WebSocket connection to `server`.
    pub async fn connect(server: &Url) -> Result<Self, ClientError> {
        match server.scheme() {
            "ws" | "wss" => {}
            other => return Err(ClientError::UnsupportedScheme(other.to_string())),
        }

        let (socket, _response) = tokio_tungstenite::connect_async(server.as_str()).await?;
        let (write, read) = socket.split();
        debug!(server = %server, "connected");
        Ok(Connection { write, read })
    }

    /// Sends one outbound message as a text frame.
    pub async fn send(&mut self, message: &ClientMessage) -> Result<(), ClientError> {
        let frame = message.encode();
        debug!(frame = ?frame, "sending");
        self.write.send(Message::text(frame)).await?;
        Ok(())
    }

    /// Waits for the next inbound text frame.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(frame))` - A text frame arrived.
    /// * `Some(Err(err))` - The transport failed.
    /// * `None` - The server closed the connection.
    pub async fn next_frame(&mut self) -> Option<Result<String, ClientError>> {
        while let Some(message) = self.read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    debug!(frame = ?text, "received");
                    return Some(Ok(text));
                }
                Ok(Message::Close(_)) => return None,
                Ok(_) => continue,
                Err(err) => return Some(Err(err.into())),
            }
        }
        None
    }

    /// Closes the connection.
    pub async fn close(&mut self) -> Result<(), ClientError> {
        self.write.close().await?;
        Ok(())
    }
}
