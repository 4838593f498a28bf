use std::fmt;
use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};

use crate::config::{ClientConfig, IO_TIMEOUT, MAX_FRAME_SIZE};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::transport::Transport;

/// Inbound frames buffered between the reader task and `recv`.
const INBOUND_CAPACITY: usize = 64;

/// Why a frame could not be read or written.
#[derive(Debug)]
pub enum FrameError {
    /// Peer closed the connection.
    Closed,
    Io(io::Error),
    /// Declared length exceeds the configured maximum.
    TooLarge { len: u32, max: u32 },
    /// Zero-length frame.
    Empty,
    /// Body did not decode into a known message. The stream is still in sync.
    Malformed(String),
    Timeout(Duration),
}

impl FrameError {
    /// Whether the connection can keep going after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FrameError::Malformed(_))
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Closed => write!(f, "connection closed by peer"),
            FrameError::Io(e) => write!(f, "i/o error: {e}"),
            FrameError::TooLarge { len, max } => {
                write!(f, "frame too large: {len} bytes (max: {max})")
            }
            FrameError::Empty => write!(f, "invalid frame length: 0"),
            FrameError::Malformed(e) => write!(f, "malformed frame: {e}"),
            FrameError::Timeout(d) => write!(f, "frame i/o timed out after {d:?}"),
        }
    }
}

impl std::error::Error for FrameError {}

fn map_io(e: io::Error) -> FrameError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted => FrameError::Closed,
        _ => FrameError::Io(e),
    }
}

/// Write one length-prefixed bincode frame.
pub async fn write_frame<W, T>(writer: &mut W, msg: &T, max: u32) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let data = bincode::serialize(msg).map_err(|e| FrameError::Malformed(e.to_string()))?;
    let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
    if len > max {
        return Err(FrameError::TooLarge { len, max });
    }
    writer.write_all(&len.to_be_bytes()).await.map_err(map_io)?;
    writer.write_all(&data).await.map_err(map_io)?;
    writer.flush().await.map_err(map_io)
}

/// Read one length-prefixed bincode frame.
///
/// Waits indefinitely for the length prefix; once it has arrived the body
/// must follow within `body_timeout`.
pub async fn read_frame<R, T>(reader: &mut R, max: u32, body_timeout: Duration) -> Result<T, FrameError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await.map_err(map_io)?;
    let len = u32::from_be_bytes(len_buf);
    if len == 0 {
        return Err(FrameError::Empty);
    }
    if len > max {
        return Err(FrameError::TooLarge { len, max });
    }
    let mut buf = vec![0u8; len as usize];
    timeout(body_timeout, reader.read_exact(&mut buf))
        .await
        .map_err(|_| FrameError::Timeout(body_timeout))?
        .map_err(map_io)?;
    bincode::deserialize(&buf).map_err(|e| FrameError::Malformed(e.to_string()))
}

/// Length-prefixed bincode over TCP.
///
/// Reading happens on a dedicated task so that [`Transport::recv`] only waits
/// on a channel and never drops half a frame when cancelled.
pub struct TcpTransport {
    writer: OwnedWriteHalf,
    inbound: mpsc::Receiver<Result<ServerMessage, FrameError>>,
    reader: JoinHandle<()>,
    timeout_duration: Duration,
    max_frame_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, IO_TIMEOUT, MAX_FRAME_SIZE)
    }

    pub fn with_config(stream: TcpStream, timeout_duration: Duration, max_frame_size: u32) -> Self {
        if let Err(e) = stream.set_nodelay(true) {
            log::debug!("could not set TCP_NODELAY: {}", e);
        }
        let (read_half, writer) = stream.into_split();
        let (tx, inbound) = mpsc::channel(INBOUND_CAPACITY);
        let reader = tokio::spawn(read_loop(read_half, tx, max_frame_size, timeout_duration));
        Self {
            writer,
            inbound,
            reader,
            timeout_duration,
            max_frame_size,
        }
    }

    /// Connect using the timeout and frame limit from `config`.
    pub async fn connect<A: ToSocketAddrs>(addr: A, config: &ClientConfig) -> anyhow::Result<Self> {
        let stream = timeout(config.io_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("connect timeout after {:?}", config.io_timeout))??;
        Ok(Self::with_config(stream, config.io_timeout, config.max_frame_size))
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn read_loop(
    mut read_half: OwnedReadHalf,
    tx: mpsc::Sender<Result<ServerMessage, FrameError>>,
    max: u32,
    body_timeout: Duration,
) {
    loop {
        match read_frame::<_, ServerMessage>(&mut read_half, max, body_timeout).await {
            Ok(msg) => {
                if tx.send(Ok(msg)).await.is_err() {
                    break;
                }
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("skipping inbound frame: {}", e);
            }
            Err(e) => {
                log::debug!("reader stopped: {}", e);
                let _ = tx.send(Err(e)).await;
                break;
            }
        }
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: ClientMessage) -> anyhow::Result<()> {
        timeout(
            self.timeout_duration,
            write_frame(&mut self.writer, &msg, self.max_frame_size),
        )
        .await
        .map_err(|_| anyhow::anyhow!("send timeout after {:?}", self.timeout_duration))?
        .map_err(anyhow::Error::from)
    }

    async fn recv(&mut self) -> anyhow::Result<ServerMessage> {
        match self.inbound.recv().await {
            Some(Ok(msg)) => Ok(msg),
            Some(Err(e)) => Err(e.into()),
            None => Err(FrameError::Closed.into()),
        }
    }
}
