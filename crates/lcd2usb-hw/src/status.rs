//! Adapter state read back from the get registers.

/// Firmware version: major in the low byte, minor in the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl From<u16> for FirmwareVersion {
    fn from(raw: u16) -> Self {
        Self {
            major: (raw & 0xFF) as u8,
            minor: (raw >> 8) as u8,
        }
    }
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Installed HD44780 controllers.
///
/// 0 means no display was detected, 1 a single-controller display and 3 a
/// dual-controller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerMask(u16);

impl ControllerMask {
    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn ctrl0(&self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn ctrl1(&self) -> bool {
        self.0 & 0x02 != 0
    }

    /// True if the adapter found no controller at all.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for ControllerMask {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for ControllerMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.ctrl0(), self.ctrl1()) {
            (true, true) => write!(f, "CTRL0 CTRL1"),
            (true, false) => write!(f, "CTRL0"),
            (false, true) => write!(f, "CTRL1"),
            (false, false) => write!(f, "none"),
        }
    }
}

/// State of the two optional push buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyState(u16);

impl KeyState {
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Returns true while button `key` (0 or 1) is held down.
    pub fn pressed(&self, key: u8) -> bool {
        key < 2 && self.0 & (1 << key) != 0
    }
}

impl From<u16> for KeyState {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for KeyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = |key| if self.pressed(key) { "on" } else { "off" };
        write!(f, "0:{} 1:{}", label(0), label(1))
    }
}
