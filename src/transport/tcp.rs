use std::io::ErrorKind;
use std::string::String;
use std::vec::Vec;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::NetError;
use crate::transport::{LineBuffer, Transport};

/// Default timeout for a single write (30 seconds).
const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(30);

const READ_CHUNK: usize = 1024;

pub struct TcpTransport {
    stream: TcpStream,
    buffer: LineBuffer,
    send_timeout: Duration,
    closed: bool,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_SEND_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, send_timeout: Duration) -> Self {
        if let Err(e) = stream.set_nodelay(true) {
            log::debug!("could not disable Nagle: {}", e);
        }
        Self {
            stream,
            buffer: LineBuffer::new(),
            send_timeout,
            closed: false,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, NetError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| NetError::Resource(std::format!("connect: {}", e)))?;
        Ok(Self::new(stream))
    }

    pub async fn bind<A: ToSocketAddrs>(addr: A) -> Result<TcpListener, NetError> {
        TcpListener::bind(addr)
            .await
            .map_err(|e| NetError::Resource(std::format!("bind: {}", e)))
    }

    /// Wait for one peer on `listener`.
    pub async fn accept(listener: &TcpListener) -> Result<Self, NetError> {
        let (stream, addr) = listener
            .accept()
            .await
            .map_err(|e| NetError::Resource(std::format!("accept: {}", e)))?;
        log::info!("peer connected from {}", addr);
        Ok(Self::new(stream))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send_line(&mut self, line: &str) -> Result<(), NetError> {
        if self.closed {
            return Err(NetError::PeerDisconnected);
        }
        log::debug!("-> {}", line);
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');
        match timeout(self.send_timeout, self.stream.write_all(&data)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                log::warn!("send failed: {}", e);
                self.closed = true;
                Err(NetError::PeerDisconnected)
            }
            Err(_) => {
                log::warn!("send timed out after {:?}", self.send_timeout);
                self.closed = true;
                Err(NetError::PeerDisconnected)
            }
        }
    }

    fn poll_lines(&mut self) -> Result<Vec<String>, NetError> {
        if self.closed {
            return Err(NetError::PeerDisconnected);
        }
        let mut lines = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.stream.try_read(&mut chunk) {
                Ok(0) => {
                    self.closed = true;
                    break;
                }
                Ok(n) => lines.extend(self.buffer.push(&chunk[..n])),
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("read failed: {}", e);
                    self.closed = true;
                    break;
                }
            }
        }
        if self.closed && lines.is_empty() {
            return Err(NetError::PeerDisconnected);
        }
        Ok(lines)
    }

    async fn close(&mut self) {
        self.closed = true;
        if let Err(e) = self.stream.shutdown().await {
            log::debug!("shutdown: {}", e);
        }
    }
}
