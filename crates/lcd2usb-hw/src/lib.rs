//! LCD2USB Hardware Library
//!
//! Drives HD44780 character displays attached through the LCD2USB adapter.
//! Everything goes over vendor-specific USB control requests: commands and
//! text are coalesced into 4-byte frames, registers are read and written
//! with single transfers.

pub mod error;
pub mod lcd;
pub mod status;
pub mod transport;

pub use error::{Error, Result};
pub use lcd::{
    CommandType, Delay, EchoReport, FadeDirection, GetRegister, Lcd2Usb, SetRegister, StdDelay,
    Target, DEFAULT_ECHO_ROUNDS,
};
pub use status::{ControllerMask, FirmwareVersion, KeyState};
pub use transport::{Transport, UsbTransport, DEFAULT_TIMEOUT};

/// USB VID:PID of the LCD2USB adapter.
pub const LCD2USB_VID: u16 = 0x0403;
pub const LCD2USB_PID: u16 = 0xC630;
