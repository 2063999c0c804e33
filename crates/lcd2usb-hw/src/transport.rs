//! Control-transfer transport.
//!
//! The adapter only understands vendor requests on endpoint 0. A transfer
//! either carries no data stage (send) or returns a short response (receive);
//! the 16-bit `value` and `index` setup fields carry the payload.

use crate::{Error, Result, LCD2USB_PID, LCD2USB_VID};
use rusb::{DeviceHandle, Direction, GlobalContext, Recipient, RequestType};
use std::time::Duration;
use tracing::{debug, info};

/// Timeout applied to every control transfer unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Synchronous vendor control transfers to a single device.
pub trait Transport {
    /// Sends a vendor request without a data stage.
    fn send(&mut self, request: u8, value: u16, index: u16) -> Result<()>;

    /// Sends a vendor request and reads the response into `buf`.
    ///
    /// Returns the number of bytes the device actually returned.
    fn receive(&mut self, request: u8, value: u16, index: u16, buf: &mut [u8]) -> Result<usize>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, request: u8, value: u16, index: u16) -> Result<()> {
        (**self).send(request, value, index)
    }

    fn receive(&mut self, request: u8, value: u16, index: u16, buf: &mut [u8]) -> Result<usize> {
        (**self).receive(request, value, index, buf)
    }
}

/// libusb-backed transport for a real adapter.
pub struct UsbTransport {
    handle: DeviceHandle<GlobalContext>,
    timeout: Duration,
}

impl UsbTransport {
    /// Opens the first attached device with the LCD2USB VID:PID.
    pub fn open(timeout: Duration) -> Result<Self> {
        for device in rusb::devices()?.iter() {
            let descriptor = match device.device_descriptor() {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    debug!("Skipping device without descriptor: {}", e);
                    continue;
                }
            };

            if descriptor.vendor_id() != LCD2USB_VID || descriptor.product_id() != LCD2USB_PID {
                continue;
            }

            info!(
                "Found LCD2USB device on bus {:03} device {:03}",
                device.bus_number(),
                device.address()
            );

            let handle = device.open()?;
            return Ok(Self::from_handle(handle, timeout));
        }

        Err(Error::DeviceNotFound)
    }

    /// Wraps an already opened handle.
    pub fn from_handle(handle: DeviceHandle<GlobalContext>, timeout: Duration) -> Self {
        Self { handle, timeout }
    }

    /// Returns the per-transfer timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for UsbTransport {
    fn send(&mut self, request: u8, value: u16, index: u16) -> Result<()> {
        let request_type = rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device);
        self.handle
            .write_control(request_type, request, value, index, &[], self.timeout)?;
        Ok(())
    }

    fn receive(&mut self, request: u8, value: u16, index: u16, buf: &mut [u8]) -> Result<usize> {
        let request_type = rusb::request_type(Direction::In, RequestType::Vendor, Recipient::Device);
        let read = self
            .handle
            .read_control(request_type, request, value, index, buf, self.timeout)?;
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hardware tests are skipped by default
    #[test]
    #[ignore]
    fn test_device_open() {
        let transport = UsbTransport::open(DEFAULT_TIMEOUT);
        assert!(transport.is_ok());
    }
}
