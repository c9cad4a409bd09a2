use std::string::String;
use std::vec::Vec;

use crate::config::MAX_LINE_LEN;
use crate::protocol::NetError;

/// Line-oriented byte stream between two peers.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Write one line; the newline is appended here.
    async fn send_line(&mut self, line: &str) -> Result<(), NetError>;

    /// Complete lines received so far, without waiting. An empty vector means
    /// nothing new has arrived. A closed connection is reported once the
    /// lines received before the close have been handed out.
    fn poll_lines(&mut self) -> Result<Vec<String>, NetError>;

    /// Close the local end. The peer notices on its next read or write.
    async fn close(&mut self);
}

/// Newline framing over arbitrary byte chunks. Lines are trimmed, blank lines
/// skipped, and a line longer than [`MAX_LINE_LEN`] is dropped whole.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
    discarding: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed received bytes, returning every line they complete.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &b in bytes {
            if b == b'\n' {
                if self.discarding {
                    self.discarding = false;
                } else {
                    let line = String::from_utf8_lossy(&self.pending);
                    let line = line.trim();
                    if !line.is_empty() {
                        lines.push(line.to_owned());
                    }
                }
                self.pending.clear();
            } else if !self.discarding {
                self.pending.push(b);
                if self.pending.len() > MAX_LINE_LEN {
                    log::warn!("dropping line longer than {} bytes", MAX_LINE_LEN);
                    self.pending.clear();
                    self.discarding = true;
                }
            }
        }
        lines
    }

    /// Bytes held for an unfinished line.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

pub mod in_memory;
pub mod tcp;
