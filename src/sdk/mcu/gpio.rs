use bitflags::bitflags;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use tracing::{debug, trace};

use crate::config::{PIN_TOGGLE_REGISTER, PORT_MAX_NUMBER, PORT_PIN_MAX_NUMBER, PORT_TOGGLE_MASK};
use crate::error::{Error, Result};
use crate::sdk::mcu::pin_config::{PinConfig, RawPinConfig};
use crate::sdk::mcu::register::{Register, RegisterBank};
use crate::{BIT, BM_CLR, BM_FLIP, BM_IS_SET, BM_SET};

/// GPIO port identifier.
///
/// The discriminant is the offset of the port's registers within each
/// register family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
}

impl Port {
    pub const ALL: [Port; PORT_MAX_NUMBER] = [Port::A, Port::B, Port::C, Port::D, Port::E];

    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Port {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Port::from_u8(value).ok_or(Error::InvalidArgument("port index out of range"))
    }
}

/// Pin direction, encoded as the TRIS bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum Direction {
    Output = 0,
    Input = 1,
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Direction::from_u8(value).ok_or(Error::UnrecognizedValue(value))
    }
}

/// Logic level, encoded as the LAT/PORT bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum Logic {
    Low = 0,
    High = 1,
}

impl TryFrom<u8> for Logic {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Logic::from_u8(value).ok_or(Error::UnrecognizedValue(value))
    }
}

impl From<bool> for Logic {
    fn from(high: bool) -> Self {
        if high {
            Logic::High
        } else {
            Logic::Low
        }
    }
}

bitflags! {
    /// Pins of one port, one bit per pin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PinMask: u8 {
        const PIN0 = BIT!(0);
        const PIN1 = BIT!(1);
        const PIN2 = BIT!(2);
        const PIN3 = BIT!(3);
        const PIN4 = BIT!(4);
        const PIN5 = BIT!(5);
        const PIN6 = BIT!(6);
        const PIN7 = BIT!(7);
    }
}

impl PinMask {
    /// Mask selecting `pin`, or `InvalidArgument` if the port has no such pin.
    pub fn from_pin(pin: u8) -> Result<Self> {
        if pin >= PORT_PIN_MAX_NUMBER {
            return Err(Error::InvalidArgument("pin index out of range"));
        }
        Ok(PinMask::from_bits_retain(BIT!(pin)))
    }
}

/// Validated access to the GPIO registers held by a [`RegisterBank`].
///
/// Pin-level operations address one bit of a port register through a
/// [`PinConfig`]; port-level operations read or write the whole byte.
/// Every operation validates its arguments before touching the bank.
#[derive(Debug)]
pub struct Gpio<B> {
    bank: B,
}

impl<B: RegisterBank> Gpio<B> {
    pub const fn new(bank: B) -> Self {
        Gpio { bank }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn into_inner(self) -> B {
        self.bank
    }

    /// Configures the direction of a single pin.
    ///
    /// # Parameters
    ///
    /// * `config` - Pin to configure; its `direction` field selects the new direction
    ///
    /// # Algorithm
    ///
    /// 1. Validate the pin index
    /// 2. Read the port's TRIS register
    /// 3. Clear the pin bit for an output, set it for an input
    /// 4. Write the register back
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `config.pin` is not below 8
    pub fn pin_direction_init(&mut self, config: &PinConfig) -> Result<()> {
        let mask = Self::pin_mask(config)?;

        let mut val = self.bank.read(config.port, Register::Tris);
        match config.direction {
            Direction::Output => BM_CLR!(val, mask.bits()),
            Direction::Input => BM_SET!(val, mask.bits()),
        }
        self.store(config.port, Register::Tris, val);

        Ok(())
    }

    /// Reads back the configured direction of a single pin from TRIS.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `config.pin` is not below 8
    pub fn pin_direction_status(&self, config: &PinConfig) -> Result<Direction> {
        let mask = Self::pin_mask(config)?;

        let val = self.bank.read(config.port, Register::Tris);
        Ok(if BM_IS_SET!(val, mask.bits()) {
            Direction::Input
        } else {
            Direction::Output
        })
    }

    /// Drives a single pin's output latch.
    ///
    /// # Parameters
    ///
    /// * `config` - Pin to drive; only `port` and `pin` are used
    /// * `logic` - Level written to the LAT bit
    ///
    /// # Notes
    ///
    /// * The latch is written whatever the pin direction; an input pin only
    ///   shows the level once it is turned into an output
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `config.pin` is not below 8
    pub fn pin_write_logic(&mut self, config: &PinConfig, logic: Logic) -> Result<()> {
        let mask = Self::pin_mask(config)?;

        let mut val = self.bank.read(config.port, Register::Lat);
        match logic {
            Logic::Low => BM_CLR!(val, mask.bits()),
            Logic::High => BM_SET!(val, mask.bits()),
        }
        self.store(config.port, Register::Lat, val);

        Ok(())
    }

    /// Reads the live level of a single pin.
    ///
    /// # Notes
    ///
    /// * Samples the PORT register, so the result is the electrical state of
    ///   the pin, not the last value written. Use [`Gpio::pin_read_latch`] for
    ///   the latter
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `config.pin` is not below 8
    pub fn pin_read_logic(&self, config: &PinConfig) -> Result<Logic> {
        let mask = Self::pin_mask(config)?;

        let val = self.bank.read(config.port, Register::Port);
        Ok(Logic::from(BM_IS_SET!(val, mask.bits())))
    }

    /// Reads the output latch bit of a single pin.
    pub fn pin_read_latch(&self, config: &PinConfig) -> Result<Logic> {
        let mask = Self::pin_mask(config)?;

        let val = self.bank.read(config.port, Register::Lat);
        Ok(Logic::from(BM_IS_SET!(val, mask.bits())))
    }

    /// Inverts a single pin's output.
    ///
    /// # Notes
    ///
    /// * Flips the LAT bit. With the `toggle-port-register` feature the read-modify-write
    ///   runs on PORT instead: the flipped byte is built from the sampled pin levels of
    ///   the whole port, so input pins of the same port overwrite their latch bits
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `config.pin` is not below 8
    pub fn pin_toggle_logic(&mut self, config: &PinConfig) -> Result<()> {
        let mask = Self::pin_mask(config)?;

        let mut val = self.bank.read(config.port, PIN_TOGGLE_REGISTER);
        BM_FLIP!(val, mask.bits());
        self.store(config.port, PIN_TOGGLE_REGISTER, val);

        Ok(())
    }

    /// Applies the direction and initial level of `config`.
    ///
    /// # Algorithm
    ///
    /// 1. Validate the pin index
    /// 2. Configure the direction
    /// 3. Write the initial level to the latch
    ///
    /// # Errors
    ///
    /// * The first failure of the two steps. Validation happens up front, so a
    ///   rejected config leaves both registers untouched
    pub fn pin_init(&mut self, config: &PinConfig) -> Result<()> {
        Self::pin_mask(config)?;

        self.pin_direction_init(config)?;
        self.pin_write_logic(config, config.logic)
    }

    /// Validates a raw configuration record and initializes the pin it describes.
    ///
    /// Returns the decoded configuration for use with the other pin-level calls.
    pub fn pin_init_raw(&mut self, raw: RawPinConfig) -> Result<PinConfig> {
        let config = PinConfig::try_from(raw).inspect_err(|err| {
            debug!(?raw, %err, "rejected pin configuration");
        })?;
        self.pin_init(&config)?;

        Ok(config)
    }

    /// Initializes every pin of a wiring table, in order.
    ///
    /// Stops at the first entry that fails; entries before it stay applied.
    /// Returns the number of pins initialized.
    pub fn pins_init(&mut self, configs: &[PinConfig]) -> Result<usize> {
        for config in configs {
            self.pin_init(config)?;
        }

        Ok(configs.len())
    }

    /// Writes the direction of all 8 pins of `port` at once.
    ///
    /// # Parameters
    ///
    /// * `port` - Port to configure
    /// * `direction` - TRIS byte; bit set = input, bit clear = output
    pub fn port_direction_init(&mut self, port: Port, direction: u8) -> Result<()> {
        self.store(port, Register::Tris, direction);
        Ok(())
    }

    /// Reads the TRIS byte of `port`.
    pub fn port_direction_status(&self, port: Port) -> Result<u8> {
        Ok(self.bank.read(port, Register::Tris))
    }

    /// Writes the output latch of all 8 pins of `port` at once.
    pub fn port_write_logic(&mut self, port: Port, logic: u8) -> Result<()> {
        self.store(port, Register::Lat, logic);
        Ok(())
    }

    /// Reads the output latch byte of `port`.
    ///
    /// # Notes
    ///
    /// * Unlike [`Gpio::pin_read_logic`] this returns LAT, the last written
    ///   levels, not the sampled pin levels
    pub fn port_read_logic(&self, port: Port) -> Result<u8> {
        Ok(self.bank.read(port, Register::Lat))
    }

    /// Inverts the output latch of every pin of `port`.
    pub fn port_toggle_logic(&mut self, port: Port) -> Result<()> {
        let mut val = self.bank.read(port, Register::Lat);
        BM_FLIP!(val, PORT_TOGGLE_MASK);
        self.store(port, Register::Lat, val);

        Ok(())
    }

    fn pin_mask(config: &PinConfig) -> Result<PinMask> {
        PinMask::from_pin(config.pin).inspect_err(|err| {
            debug!(port = ?config.port, pin = config.pin, %err, "rejected pin access");
        })
    }

    fn store(&mut self, port: Port, register: Register, value: u8) {
        trace!(?port, ?register, value, "register write");
        self.bank.write(port, register, value);
    }
}
