//! LCD2USB session: command encoder over a transport.

use crate::transport::Transport;
use crate::Result;
use tracing::{debug, warn};

use super::frame::{Frame, PendingBuffer};
use super::protocol::{CommandType, Target, HD44780_CLEAR, HD44780_HOME};

/// One session with an LCD2USB adapter.
///
/// Command and data bytes of the same type are collected into frames of up
/// to four bytes before they go out, so a line of text costs a handful of
/// control transfers rather than one per character. Anything still pending
/// when the session is dropped is flushed.
pub struct Lcd2Usb<T: Transport> {
    transport: T,
    pending: PendingBuffer,
}

impl<T: Transport> Lcd2Usb<T> {
    /// Starts a session with an empty pending buffer.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pending: PendingBuffer::new(),
        }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Returns true if bytes are waiting for a flush.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Queues one byte under `command_type`.
    ///
    /// A frame of a different type is flushed first; a frame that reaches
    /// four bytes is flushed right away. If that first flush fails the byte
    /// is not queued.
    pub fn enqueue(&mut self, command_type: CommandType, byte: u8) -> Result<()> {
        if self.pending.holds_other(command_type) {
            self.flush()?;
        }

        match self.pending.push(command_type, byte) {
            Some(frame) => self.send_frame(&frame),
            None => Ok(()),
        }
    }

    /// Sends whatever is pending. Does nothing when the buffer is empty.
    ///
    /// The buffer is cleared before the transfer, so a frame that fails to
    /// send is dropped.
    pub fn flush(&mut self) -> Result<()> {
        match self.pending.take() {
            Some(frame) => self.send_frame(&frame),
            None => Ok(()),
        }
    }

    /// Flushes ahead of a register or echo transfer.
    ///
    /// A failed frame is already logged and dropped by `send_frame`; it must
    /// not cancel the transfer that follows.
    pub(crate) fn flush_before_exchange(&mut self) {
        if let Err(e) = self.flush() {
            debug!("Continuing after dropped frame: {}", e);
        }
    }

    fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        debug!(
            "Frame 0x{:02X}: {:02X?} (value=0x{:04X} index=0x{:04X})",
            frame.request(),
            frame.payload(),
            frame.value(),
            frame.index()
        );

        self.transport
            .send(frame.request(), frame.value(), frame.index())
            .inspect_err(|e| warn!("Dropped frame 0x{:02X}: {}", frame.request(), e))
    }

    /// Queues an HD44780 instruction for the given controller(s).
    pub fn write_command(&mut self, target: Target, command: u8) -> Result<()> {
        self.enqueue(CommandType::command(target), command)
    }

    /// Clears both controllers and returns the cursor home.
    pub fn clear(&mut self) -> Result<()> {
        self.write_command(Target::Both, HD44780_CLEAR)?;
        self.write_command(Target::Both, HD44780_HOME)
    }

    /// Returns the cursor home on both controllers.
    pub fn home(&mut self) -> Result<()> {
        self.write_command(Target::Both, HD44780_HOME)
    }

    /// Writes text to the first controller and flushes it.
    ///
    /// Bytes go out as-is; the display's character ROM decides what they
    /// look like.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        let data = CommandType::data(Target::Ctrl0);
        for byte in text.bytes() {
            self.enqueue(data, byte)?;
        }
        self.flush()
    }
}

impl<T: Transport> Drop for Lcd2Usb<T> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Failed to flush pending frame on close: {}", e);
        }
    }
}
