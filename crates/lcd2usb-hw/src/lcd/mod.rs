//! LCD module.
//!
//! Command encoding, register exchange and brightness fades for the HD44780
//! display behind an LCD2USB adapter.

mod device;
mod exchange;
mod fade;
mod frame;

pub mod protocol;

#[cfg(test)]
mod testing;

pub use device::Lcd2Usb;
pub use exchange::{EchoReport, DEFAULT_ECHO_ROUNDS};
pub use fade::{Delay, FadeDirection, StdDelay};
pub use protocol::{CommandType, GetRegister, SetRegister, Target};
