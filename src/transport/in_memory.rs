use tokio::sync::mpsc;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::transport::Transport;

/// Client end of an in-process connection.
pub struct InMemoryTransport {
    outbound: mpsc::UnboundedSender<ClientMessage>,
    inbound: mpsc::UnboundedReceiver<ServerMessage>,
}

/// Server end of an in-process connection, driven by tests and demos.
///
/// Dropping it closes the connection from the client's point of view.
pub struct ServerEnd {
    outbound: mpsc::UnboundedSender<ServerMessage>,
    inbound: mpsc::UnboundedReceiver<ClientMessage>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, ServerEnd) {
        let (to_server, from_client) = mpsc::unbounded_channel();
        let (to_client, from_server) = mpsc::unbounded_channel();
        (
            Self {
                outbound: to_server,
                inbound: from_server,
            },
            ServerEnd {
                outbound: to_client,
                inbound: from_client,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: ClientMessage) -> anyhow::Result<()> {
        self.outbound
            .send(msg)
            .map_err(|_| anyhow::anyhow!("channel closed"))
    }

    async fn recv(&mut self) -> anyhow::Result<ServerMessage> {
        self.inbound
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("channel closed"))
    }
}

impl ServerEnd {
    pub fn send(&self, msg: ServerMessage) -> anyhow::Result<()> {
        self.outbound
            .send(msg)
            .map_err(|_| anyhow::anyhow!("channel closed"))
    }

    /// Next message from the client, or `None` once the client is gone.
    pub async fn recv(&mut self) -> Option<ClientMessage> {
        self.inbound.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ClientMessage> {
        self.inbound.try_recv().ok()
    }
}
