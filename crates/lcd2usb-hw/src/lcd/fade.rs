//! Brightness fades.

use crate::transport::Transport;
use crate::{Error, Result};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use super::device::Lcd2Usb;
use super::protocol::SetRegister;

/// Millisecond pause between fade steps.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Direction of a brightness ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// 0 up to 255.
    In,
    /// 255 down to 0.
    Out,
}

impl FadeDirection {
    /// Brightness values of the ramp, in order.
    pub fn steps(self) -> impl Iterator<Item = u8> {
        (0..=u8::MAX).map(move |i| match self {
            FadeDirection::In => i,
            FadeDirection::Out => u8::MAX - i,
        })
    }
}

impl FromStr for FadeDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "in" => Ok(FadeDirection::In),
            "out" => Ok(FadeDirection::Out),
            _ => Err(Error::InvalidFadeDirection(s.to_string())),
        }
    }
}

impl std::fmt::Display for FadeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FadeDirection::In => write!(f, "in"),
            FadeDirection::Out => write!(f, "out"),
        }
    }
}

impl<T: Transport> Lcd2Usb<T> {
    /// Ramps brightness across the full range, one step per `step_delay_ms`.
    ///
    /// Failed steps do not stop the ramp; it always covers all 256 levels.
    /// The first failure, if any, is returned once the ramp is done.
    pub fn fade<D: Delay + ?Sized>(
        &mut self,
        direction: FadeDirection,
        step_delay_ms: u32,
        delay: &mut D,
    ) -> Result<()> {
        debug!("Fading {} with {}ms steps", direction, step_delay_ms);

        let mut first_error = None;
        let mut failed = 0u32;
        for level in direction.steps() {
            if let Err(e) = self.set_register(SetRegister::Brightness, level) {
                failed += 1;
                first_error.get_or_insert(e);
            }
            delay.delay_ms(step_delay_ms);
        }

        match first_error {
            Some(e) => {
                warn!("Fade {}: {} of 256 steps failed", direction, failed);
                Err(e)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd::protocol::{CommandType, Target, HD44780_CLEAR};
    use crate::lcd::testing::RecordingTransport;

    #[derive(Default)]
    struct RecordingDelay(Vec<u32>);

    impl Delay for RecordingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms);
        }
    }

    fn brightness_levels(transport: &RecordingTransport) -> Vec<u16> {
        transport
            .sends()
            .into_iter()
            .map(|(request, value, index)| {
                assert_eq!(request, SetRegister::Brightness.code());
                assert_eq!(index, 0);
                value
            })
            .collect()
    }

    #[test]
    fn test_fade_out() {
        let mut transport = RecordingTransport::new();
        let mut delay = RecordingDelay::default();
        Lcd2Usb::new(&mut transport)
            .fade(FadeDirection::Out, 1, &mut delay)
            .unwrap();

        let expected: Vec<u16> = (0..=255).rev().collect();
        assert_eq!(brightness_levels(&transport), expected);
        assert_eq!(delay.0, vec![1; 256]);
    }

    #[test]
    fn test_fade_in() {
        let mut transport = RecordingTransport::new();
        let mut delay = RecordingDelay::default();
        Lcd2Usb::new(&mut transport)
            .fade(FadeDirection::In, 20, &mut delay)
            .unwrap();

        let expected: Vec<u16> = (0..=255).collect();
        assert_eq!(brightness_levels(&transport), expected);
        assert_eq!(delay.0.len(), 256);
        assert!(delay.0.iter().all(|&ms| ms == 20));
    }

    #[test]
    fn test_fade_completes_after_failures() {
        let mut transport = RecordingTransport::new().fail_send(3).fail_send(100);
        let mut delay = RecordingDelay::default();
        let result = Lcd2Usb::new(&mut transport).fade(FadeDirection::Out, 0, &mut delay);

        assert!(result.unwrap_err().is_transport());
        assert_eq!(transport.sends().len(), 256);
        assert_eq!(delay.0.len(), 256);
    }

    #[test]
    fn test_fade_after_failed_pending_frame() {
        let mut transport = RecordingTransport::new().fail_send(0);
        let mut delay = RecordingDelay::default();
        {
            let mut lcd = Lcd2Usb::new(&mut transport);
            lcd.write_command(Target::Both, HD44780_CLEAR).unwrap();
            lcd.fade(FadeDirection::Out, 0, &mut delay).unwrap();
        }

        let sends = transport.sends();
        assert_eq!(sends.len(), 257);
        assert_eq!(sends[0].0 & !0x03, CommandType::command(Target::Both).bits());

        let levels: Vec<u16> = sends[1..]
            .iter()
            .map(|&(request, value, _)| {
                assert_eq!(request, SetRegister::Brightness.code());
                value
            })
            .collect();
        let expected: Vec<u16> = (0..=255).rev().collect();
        assert_eq!(levels, expected);
        assert_eq!(delay.0.len(), 256);
    }

    #[test]
    fn test_fade_steps() {
        let out: Vec<u8> = FadeDirection::Out.steps().collect();
        assert_eq!(out.len(), 256);
        assert_eq!((out[0], out[255]), (255, 0));

        let fade_in: Vec<u8> = FadeDirection::In.steps().collect();
        assert_eq!((fade_in[0], fade_in[255]), (0, 255));
    }

    #[test]
    fn test_fade_direction_from_str() {
        assert_eq!("in".parse::<FadeDirection>().unwrap(), FadeDirection::In);
        assert_eq!("OUT".parse::<FadeDirection>().unwrap(), FadeDirection::Out);
        assert!("sideways".parse::<FadeDirection>().is_err());
        assert_eq!(FadeDirection::Out.to_string(), "out");
    }
}
