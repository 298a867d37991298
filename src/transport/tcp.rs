use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::{Codec, Transport};

/// Default timeout for network operations (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum frame size (1 MB); a snapshot is a few hundred bytes.
pub const MAX_MESSAGE_SIZE: u32 = 1_000_000;

/// Length-prefixed frames over a TCP stream: a 4-byte big-endian length
/// followed by the encoded [`Message`].
pub struct TcpTransport {
    stream: TcpStream,
    codec: Codec,
    timeout_duration: Duration,
    max_message_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, Codec::default(), DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE)
    }

    pub fn with_config(
        stream: TcpStream,
        codec: Codec,
        timeout_duration: Duration,
        max_message_size: u32,
    ) -> Self {
        Self {
            stream,
            codec,
            timeout_duration,
            max_message_size,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    pub async fn connect_with<A: ToSocketAddrs>(addr: A, codec: Codec) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::with_config(stream, codec, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE))
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe
        || e.kind() == std::io::ErrorKind::ConnectionReset
    {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        anyhow::anyhow!("Connection closed by peer")
    } else if e.kind() == std::io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection reset by peer")
    } else {
        anyhow::anyhow!("Read error: {}", e)
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let data = self.codec.encode(&msg)?;

        if data.len() as u64 > self.max_message_size as u64 {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }

        let duration = self.timeout_duration;
        let send_op = async {
            let len = (data.len() as u32).to_be_bytes();
            self.stream.write_all(&len).await.map_err(write_error)?;
            self.stream.write_all(&data).await.map_err(write_error)?;
            anyhow::Ok(())
        };

        timeout(duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let max = self.max_message_size;
        let duration = self.timeout_duration;
        let recv_op = async {
            let mut len_buf = [0u8; 4];
            self.stream.read_exact(&mut len_buf).await.map_err(read_error)?;

            let len = u32::from_be_bytes(len_buf);

            // Bounded read length check to prevent excessive memory allocation
            if len > max {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    max
                ));
            }

            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }

            let mut buf = vec![0u8; len as usize];
            self.stream.read_exact(&mut buf).await.map_err(read_error)?;
            anyhow::Ok(buf)
        };

        let buf = timeout(duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", duration))??;

        self.codec.decode(&buf)
    }
}
