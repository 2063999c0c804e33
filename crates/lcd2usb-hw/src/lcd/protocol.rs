//! LCD2USB request codes.
//!
//! Request byte layout:
//! ```text
//! 7 6 5 4 3 2 1 0
//! C C C T T R L L
//! ```
//! - CCC: class (echo, cmd, data, set, get)
//! - TT: controller bitmap for cmd/data, register sub-code for set/get
//! - R: reserved, always 0
//! - LL: payload length - 1 (cmd/data only)

/// Maximum payload bytes per frame (two bits of length).
pub const MAX_PAYLOAD: usize = 4;

/// Bits of the request byte holding the payload length.
pub const LENGTH_MASK: u8 = 0x03;

/// Request classes (bits 7-5).
pub const CLASS_ECHO: u8 = 0 << 5;
pub const CLASS_CMD: u8 = 1 << 5;
pub const CLASS_DATA: u8 = 2 << 5;
pub const CLASS_SET: u8 = 3 << 5;
pub const CLASS_GET: u8 = 4 << 5;

/// HD44780 clear display instruction.
pub const HD44780_CLEAR: u8 = 0x01;

/// HD44780 return home instruction (bit 0 is don't-care).
pub const HD44780_HOME: u8 = 0x03;

/// Controller bitmap for cmd/data frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Target {
    /// First (or only) controller.
    Ctrl0 = 1 << 3,
    /// Second controller of a dual-controller display.
    Ctrl1 = 1 << 4,
    /// Both controllers at once.
    Both = (1 << 3) | (1 << 4),
}

/// Class plus target of a frame, without the length bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandType(u8);

impl CommandType {
    /// HD44780 instruction addressed to `target`.
    pub const fn command(target: Target) -> Self {
        Self(CLASS_CMD | target as u8)
    }

    /// Character data addressed to `target`.
    pub const fn data(target: Target) -> Self {
        Self(CLASS_DATA | target as u8)
    }

    /// Raw request bits with a zero length field.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Writable adapter registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SetRegister {
    Contrast = CLASS_SET | (0 << 3),
    Brightness = CLASS_SET | (1 << 3),
    Reserved0 = CLASS_SET | (2 << 3),
    Reserved1 = CLASS_SET | (3 << 3),
}

/// Readable adapter registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GetRegister {
    FirmwareVersion = CLASS_GET | (0 << 3),
    Keys = CLASS_GET | (1 << 3),
    ControllerMask = CLASS_GET | (2 << 3),
    Reserved1 = CLASS_GET | (3 << 3),
}

impl SetRegister {
    /// Request code sent on the wire.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl GetRegister {
    /// Request code sent on the wire.
    pub const fn code(self) -> u8 {
        self as u8
    }
}
