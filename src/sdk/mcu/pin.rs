use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin, PinState, StatefulOutputPin};

use crate::error::{Error, Result};
use crate::sdk::mcu::gpio::{Gpio, Logic, PinMask};
use crate::sdk::mcu::pin_config::PinConfig;
use crate::sdk::mcu::register::RegisterBank;

impl digital::Error for Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl From<PinState> for Logic {
    fn from(state: PinState) -> Self {
        match state {
            PinState::Low => Logic::Low,
            PinState::High => Logic::High,
        }
    }
}

/// A single pin borrowed from a [`Gpio`], usable with `embedded-hal` drivers.
pub struct GpioPin<'a, B> {
    gpio: &'a mut Gpio<B>,
    config: PinConfig,
}

impl<B: RegisterBank> Gpio<B> {
    /// Borrows one pin for use through the `embedded-hal` digital traits.
    ///
    /// The pin index is checked here; the direction is left as configured.
    pub fn pin(&mut self, config: PinConfig) -> Result<GpioPin<'_, B>> {
        PinMask::from_pin(config.pin)?;
        Ok(GpioPin { gpio: self, config })
    }
}

impl<B> GpioPin<'_, B> {
    pub fn config(&self) -> &PinConfig {
        &self.config
    }
}

impl<B> ErrorType for GpioPin<'_, B> {
    type Error = Error;
}

impl<B: RegisterBank> OutputPin for GpioPin<'_, B> {
    fn set_low(&mut self) -> Result<()> {
        self.gpio.pin_write_logic(&self.config, Logic::Low)
    }

    fn set_high(&mut self) -> Result<()> {
        self.gpio.pin_write_logic(&self.config, Logic::High)
    }

    fn set_state(&mut self, state: PinState) -> Result<()> {
        self.gpio.pin_write_logic(&self.config, state.into())
    }
}

// "Set" state is the latch, not the sampled level
impl<B: RegisterBank> StatefulOutputPin for GpioPin<'_, B> {
    fn is_set_high(&mut self) -> Result<bool> {
        Ok(self.gpio.pin_read_latch(&self.config)? == Logic::High)
    }

    fn is_set_low(&mut self) -> Result<bool> {
        Ok(self.gpio.pin_read_latch(&self.config)? == Logic::Low)
    }

    fn toggle(&mut self) -> Result<()> {
        self.gpio.pin_toggle_logic(&self.config)
    }
}

impl<B: RegisterBank> InputPin for GpioPin<'_, B> {
    fn is_high(&mut self) -> Result<bool> {
        Ok(self.gpio.pin_read_logic(&self.config)? == Logic::High)
    }

    fn is_low(&mut self) -> Result<bool> {
        Ok(self.gpio.pin_read_logic(&self.config)? == Logic::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::mcu::gpio::{Direction, Port};
    use crate::sdk::mcu::register::{RamBank, Register};

    fn blink<P: StatefulOutputPin>(led: &mut P) -> core::result::Result<(), P::Error> {
        led.set_high()?;
        led.toggle()?;
        led.toggle()
    }

    #[test]
    fn test_output_pin_drives_latch() {
        let mut gpio = Gpio::new(RamBank::new());
        let config = PinConfig::output(Port::B, 5, Logic::Low);
        gpio.pin_init(&config).unwrap();

        let mut led = gpio.pin(config).unwrap();
        blink(&mut led).unwrap();
        assert!(led.is_set_high().unwrap());
        assert!(led.is_high().unwrap());

        led.set_state(PinState::Low).unwrap();
        assert!(led.is_set_low().unwrap());
        assert!(led.is_low().unwrap());

        assert_eq!(gpio.bank().read(Port::B, Register::Lat), 0x00);
    }

    #[test]
    fn test_input_pin_reads_external_level() {
        let mut gpio = Gpio::new(RamBank::new());
        let config = PinConfig::input(Port::A, 4);
        gpio.pin_init(&config).unwrap();
        gpio.bank_mut().drive_input(Port::A, 0x10);

        let mut button = gpio.pin(config).unwrap();

        assert!(button.is_high().unwrap());
        assert_eq!(button.config().direction, Direction::Input);
    }

    #[test]
    fn test_pin_rejects_out_of_range_index() {
        let mut gpio = Gpio::new(RamBank::new());

        let err = gpio.pin(PinConfig::output(Port::A, 8, Logic::Low)).err();

        assert!(matches!(err, Some(Error::InvalidArgument(_))));
        assert_eq!(digital::Error::kind(&err.unwrap()), ErrorKind::Other);
    }
}
