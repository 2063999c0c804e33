//! Register reads, register writes and the echo test.

use crate::status::{ControllerMask, FirmwareVersion, KeyState};
use crate::transport::Transport;
use crate::{Error, Result};
use rand::RngCore;
use tracing::{debug, warn};

use super::device::Lcd2Usb;
use super::protocol::{GetRegister, SetRegister, CLASS_ECHO};

/// Number of echo rounds used when the caller has no preference.
pub const DEFAULT_ECHO_ROUNDS: u32 = 100;

/// Outcome of an echo test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EchoReport {
    pub successes: u32,
    pub failures: u32,
}

impl EchoReport {
    pub fn rounds(&self) -> u32 {
        self.successes + self.failures
    }

    /// True if every round came back unchanged.
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

impl<T: Transport> Lcd2Usb<T> {
    /// Reads a 2-byte response for `request`, little-endian.
    fn read_word(&mut self, request: u8, value: u16) -> Result<u16> {
        // Keep frames queued before this exchange ahead of it on the wire.
        self.flush_before_exchange();

        let mut buf = [0u8; 2];
        let read = self.transport_mut().receive(request, value, 0, &mut buf)?;
        if read < buf.len() {
            return Err(Error::Transport(format!(
                "short response to request 0x{:02X}: {} of {} bytes",
                request,
                read,
                buf.len()
            )));
        }

        Ok(u16::from(buf[0]) + 256 * u16::from(buf[1]))
    }

    /// Reads a register.
    pub fn get_register(&mut self, register: GetRegister) -> Result<u16> {
        let value = self.read_word(register.code(), 0)?;
        debug!("Read {:?} = 0x{:04X}", register, value);
        Ok(value)
    }

    /// Writes a register.
    pub fn set_register(&mut self, register: SetRegister, value: u8) -> Result<()> {
        self.flush_before_exchange();

        self.transport_mut()
            .send(register.code(), u16::from(value), 0)
            .inspect_err(|e| warn!("Failed to set {:?} to {}: {}", register, value, e))?;
        debug!("Set {:?} = {}", register, value);
        Ok(())
    }

    /// Sends one value through the echo request.
    ///
    /// Returns [`Error::EchoMismatch`] if the device answers with anything else.
    pub fn echo(&mut self, value: u16) -> Result<()> {
        let received = self.read_word(CLASS_ECHO, value)?;
        if received != value {
            return Err(Error::EchoMismatch {
                sent: value,
                received,
            });
        }
        Ok(())
    }

    /// Runs `rounds` echo exchanges with random values.
    ///
    /// Mismatches are counted. A transport failure ends the test at once.
    pub fn echo_test<R: RngCore + ?Sized>(
        &mut self,
        rounds: u32,
        rng: &mut R,
    ) -> Result<EchoReport> {
        let mut report = EchoReport::default();

        for round in 0..rounds {
            let value = (rng.next_u32() & 0xFFFF) as u16;
            match self.echo(value) {
                Ok(()) => report.successes += 1,
                Err(e @ Error::EchoMismatch { .. }) => {
                    debug!("Echo round {}: {}", round, e);
                    report.failures += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            "Echo test: {} of {} rounds failed",
            report.failures,
            report.rounds()
        );
        Ok(report)
    }

    /// Reads the adapter firmware version.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion> {
        self.get_register(GetRegister::FirmwareVersion)
            .map(FirmwareVersion::from)
    }

    /// Reads which HD44780 controllers the adapter detected.
    pub fn controllers(&mut self) -> Result<ControllerMask> {
        self.get_register(GetRegister::ControllerMask)
            .map(ControllerMask::from)
    }

    /// Reads the state of the two optional buttons.
    pub fn keys(&mut self) -> Result<KeyState> {
        self.get_register(GetRegister::Keys).map(KeyState::from)
    }
}
