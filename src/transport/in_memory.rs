use std::collections::VecDeque;
use std::string::String;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use crate::protocol::NetError;
use crate::transport::{LineBuffer, Transport};

type ByteQueue = Arc<Mutex<VecDeque<u8>>>;

/// One end of an in-process byte pipe. The other end is gone once this side
/// holds the only reference to a queue.
pub struct InMemoryTransport {
    recv_queue: ByteQueue,
    send_queue: ByteQueue,
    buffer: LineBuffer,
    closed: bool,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1: ByteQueue = Arc::new(Mutex::new(VecDeque::new()));
        let q2: ByteQueue = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self::from_queues(q1.clone(), q2.clone()),
            Self::from_queues(q2, q1),
        )
    }

    fn from_queues(recv_queue: ByteQueue, send_queue: ByteQueue) -> Self {
        Self {
            recv_queue,
            send_queue,
            buffer: LineBuffer::new(),
            closed: false,
        }
    }

    fn peer_gone(&self) -> bool {
        Arc::strong_count(&self.send_queue) == 1
    }

    /// Write bytes as they are, without framing. Lets tests deliver partial
    /// or malformed lines.
    pub fn send_raw(&mut self, bytes: &[u8]) -> Result<(), NetError> {
        if self.closed || self.peer_gone() {
            return Err(NetError::PeerDisconnected);
        }
        let mut queue = self.send_queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.extend(bytes.iter().copied());
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send_line(&mut self, line: &str) -> Result<(), NetError> {
        log::debug!("-> {}", line);
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.send_raw(&bytes)
    }

    fn poll_lines(&mut self) -> Result<Vec<String>, NetError> {
        if self.closed {
            return Err(NetError::PeerDisconnected);
        }
        let bytes: Vec<u8> = {
            let mut queue = self.recv_queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.drain(..).collect()
        };
        if bytes.is_empty() && Arc::strong_count(&self.recv_queue) == 1 {
            return Err(NetError::PeerDisconnected);
        }
        Ok(self.buffer.push(&bytes))
    }

    async fn close(&mut self) {
        self.closed = true;
        // Swap in private queues so the peer sees the last reference go away.
        self.send_queue = Arc::new(Mutex::new(VecDeque::new()));
        self.recv_queue = Arc::new(Mutex::new(VecDeque::new()));
    }
}
