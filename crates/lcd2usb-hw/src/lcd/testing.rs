//! Recording transport for unit tests.

use crate::transport::Transport;
use crate::{Error, Result};
use std::collections::VecDeque;

/// One control transfer as seen by the fake device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transfer {
    Send { request: u8, value: u16, index: u16 },
    Receive { request: u8, value: u16, index: u16 },
}

/// How the fake device answers a control-receive.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    /// Return these bytes.
    Bytes(Vec<u8>),
    /// Return the request's `value` field, little-endian.
    Echo,
    /// Return this value instead of the echoed one.
    Corrupt(u16),
    /// Fail the transfer.
    Fail,
}

/// Fake transport that records every transfer.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub transfers: Vec<Transfer>,
    replies: VecDeque<Reply>,
    default_reply: Option<Reply>,
    failing_sends: Vec<usize>,
    sends: usize,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every receive that has no queued reply with `reply`.
    pub fn with_default_reply(mut self, reply: Reply) -> Self {
        self.default_reply = Some(reply);
        self
    }

    /// Queues a reply for the next unanswered receive.
    pub fn reply(mut self, reply: Reply) -> Self {
        self.replies.push_back(reply);
        self
    }

    /// Makes the `n`th send (zero-based) fail.
    pub fn fail_send(mut self, n: usize) -> Self {
        self.failing_sends.push(n);
        self
    }

    /// Sent transfers only, as `(request, value, index)`.
    pub fn sends(&self) -> Vec<(u8, u16, u16)> {
        self.transfers
            .iter()
            .filter_map(|t| match *t {
                Transfer::Send {
                    request,
                    value,
                    index,
                } => Some((request, value, index)),
                Transfer::Receive { .. } => None,
            })
            .collect()
    }

    pub fn receives(&self) -> usize {
        self.transfers
            .iter()
            .filter(|t| matches!(t, Transfer::Receive { .. }))
            .count()
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, request: u8, value: u16, index: u16) -> Result<()> {
        self.transfers.push(Transfer::Send {
            request,
            value,
            index,
        });
        let n = self.sends;
        self.sends += 1;

        if self.failing_sends.contains(&n) {
            return Err(Error::Transport("pipe error".into()));
        }
        Ok(())
    }

    fn receive(&mut self, request: u8, value: u16, index: u16, buf: &mut [u8]) -> Result<usize> {
        self.transfers.push(Transfer::Receive {
            request,
            value,
            index,
        });

        let reply = self
            .replies
            .pop_front()
            .or_else(|| self.default_reply.clone())
            .unwrap_or(Reply::Fail);

        let bytes = match reply {
            Reply::Bytes(bytes) => bytes,
            Reply::Echo => value.to_le_bytes().to_vec(),
            Reply::Corrupt(other) => other.to_le_bytes().to_vec(),
            Reply::Fail => return Err(Error::Transport("timeout".into())),
        };

        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }
}
