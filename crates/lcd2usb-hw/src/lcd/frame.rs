//! Command frames and the pending buffer that coalesces them.

use super::protocol::{CommandType, MAX_PAYLOAD};

/// One control transfer worth of cmd/data bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    command_type: CommandType,
    payload: [u8; MAX_PAYLOAD],
    len: usize,
}

impl Frame {
    /// Request byte: command type with the length field filled in.
    pub fn request(&self) -> u8 {
        self.command_type.bits() | (self.len as u8 - 1)
    }

    /// Setup `value` field, payload bytes 0 and 1.
    pub fn value(&self) -> u16 {
        u16::from(self.payload[0]) | (u16::from(self.payload[1]) << 8)
    }

    /// Setup `index` field, payload bytes 2 and 3.
    pub fn index(&self) -> u16 {
        u16::from(self.payload[2]) | (u16::from(self.payload[3]) << 8)
    }

    /// The buffered bytes, in enqueue order.
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.len]
    }
}

/// At most one frame under construction.
#[derive(Debug, Default)]
pub(crate) struct PendingBuffer {
    current: Option<CommandType>,
    payload: [u8; MAX_PAYLOAD],
    len: usize,
}

impl PendingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// True when the buffer holds bytes of a type other than `command_type`.
    pub fn holds_other(&self, command_type: CommandType) -> bool {
        matches!(self.current, Some(current) if current != command_type)
    }

    /// Appends a byte. Returns the completed frame once the buffer is full.
    ///
    /// Callers must close out a frame of another type first.
    pub fn push(&mut self, command_type: CommandType, byte: u8) -> Option<Frame> {
        debug_assert!(!self.holds_other(command_type));

        self.current = Some(command_type);
        self.payload[self.len] = byte;
        self.len += 1;

        if self.len == MAX_PAYLOAD {
            self.take()
        } else {
            None
        }
    }

    /// Empties the buffer, returning its contents as a frame.
    pub fn take(&mut self) -> Option<Frame> {
        let command_type = self.current.take()?;
        let mut payload = [0u8; MAX_PAYLOAD];
        payload[..self.len].copy_from_slice(&self.payload[..self.len]);
        let frame = Frame {
            command_type,
            payload,
            len: self.len,
        };

        self.payload = [0; MAX_PAYLOAD];
        self.len = 0;
        Some(frame)
    }
}
