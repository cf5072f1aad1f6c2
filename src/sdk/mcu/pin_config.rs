use bytemuck::{Pod, Zeroable};

use crate::config::PORT_PIN_MAX_NUMBER;
use crate::error::{Error, Result};
use crate::sdk::mcu::gpio::{Direction, Logic, Port};
use crate::{BIT, BIT_RNG};

/// One physical pin as wired by the application, with the state it should
/// start in.
///
/// `pin` is kept as a raw index and checked by every accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinConfig {
    pub port: Port,
    pub pin: u8,
    pub direction: Direction,
    pub logic: Logic,
}

impl PinConfig {
    pub const fn new(port: Port, pin: u8, direction: Direction, logic: Logic) -> Self {
        PinConfig { port, pin, direction, logic }
    }

    pub const fn output(port: Port, pin: u8, logic: Logic) -> Self {
        Self::new(port, pin, Direction::Output, logic)
    }

    pub const fn input(port: Port, pin: u8) -> Self {
        Self::new(port, pin, Direction::Input, Logic::Low)
    }
}

/// Unvalidated pin configuration as stored in a byte table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct RawPinConfig {
    pub port: u8,
    pub pin: u8,
    pub direction: u8,
    pub logic: u8,
}

impl RawPinConfig {
    /// Views a byte table as configuration records, four bytes each.
    pub fn table(bytes: &[u8]) -> Result<&[RawPinConfig]> {
        bytemuck::try_cast_slice(bytes)
            .map_err(|_| Error::InvalidArgument("configuration table length is not a multiple of 4"))
    }
}

impl From<PinConfig> for RawPinConfig {
    fn from(config: PinConfig) -> Self {
        RawPinConfig {
            port: config.port.index(),
            pin: config.pin,
            direction: config.direction as u8,
            logic: config.logic as u8,
        }
    }
}

impl TryFrom<RawPinConfig> for PinConfig {
    type Error = Error;

    fn try_from(raw: RawPinConfig) -> Result<Self> {
        let port = Port::try_from(raw.port)?;
        if raw.pin >= PORT_PIN_MAX_NUMBER {
            return Err(Error::InvalidArgument("pin index out of range"));
        }
        let direction = Direction::try_from(raw.direction)?;
        let logic = Logic::try_from(raw.logic)?;

        Ok(PinConfig::new(port, raw.pin, direction, logic))
    }
}

const PACKED_PORT: u8 = BIT_RNG!(0, 2);
const PACKED_PIN: u8 = BIT_RNG!(3, 5);
const PACKED_PIN_SHIFT: u8 = 3;
const PACKED_DIRECTION: u8 = BIT!(6);
const PACKED_LOGIC: u8 = BIT!(7);

/// Single-byte pin configuration used by existing firmware images.
///
/// Bits 0..2 port, bits 3..5 pin, bit 6 direction, bit 7 logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct PackedPinConfig(pub u8);

impl PackedPinConfig {
    pub fn pack(config: &PinConfig) -> Result<Self> {
        if config.pin >= PORT_PIN_MAX_NUMBER {
            return Err(Error::InvalidArgument("pin index out of range"));
        }

        let mut bits = config.port.index() & PACKED_PORT;
        bits |= (config.pin << PACKED_PIN_SHIFT) & PACKED_PIN;
        if config.direction == Direction::Input {
            bits |= PACKED_DIRECTION;
        }
        if config.logic == Logic::High {
            bits |= PACKED_LOGIC;
        }

        Ok(PackedPinConfig(bits))
    }

    /// Fails with `InvalidArgument` for port values 5..7, which fit the field
    /// but name no port.
    pub fn unpack(self) -> Result<PinConfig> {
        let port = Port::try_from(self.0 & PACKED_PORT)?;
        let pin = (self.0 & PACKED_PIN) >> PACKED_PIN_SHIFT;
        let direction = if self.0 & PACKED_DIRECTION != 0 {
            Direction::Input
        } else {
            Direction::Output
        };
        let logic = Logic::from(self.0 & PACKED_LOGIC != 0);

        Ok(PinConfig::new(port, pin, direction, logic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_config_validation_order() {
        let raw = RawPinConfig { port: 7, pin: 9, direction: 3, logic: 3 };
        assert!(matches!(PinConfig::try_from(raw), Err(Error::InvalidArgument(_))));

        let raw = RawPinConfig { port: 1, pin: 9, direction: 3, logic: 3 };
        assert!(matches!(PinConfig::try_from(raw), Err(Error::InvalidArgument(_))));

        let raw = RawPinConfig { port: 1, pin: 7, direction: 3, logic: 4 };
        assert_eq!(PinConfig::try_from(raw), Err(Error::UnrecognizedValue(3)));

        let raw = RawPinConfig { port: 1, pin: 7, direction: 1, logic: 4 };
        assert_eq!(PinConfig::try_from(raw), Err(Error::UnrecognizedValue(4)));
    }

    #[test]
    fn test_raw_config_from_config() {
        let config = PinConfig::output(Port::D, 6, Logic::High);

        let raw = RawPinConfig::from(config);

        assert_eq!(raw, RawPinConfig { port: 3, pin: 6, direction: 0, logic: 1 });
        assert_eq!(PinConfig::try_from(raw), Ok(config));
    }

    #[test]
    fn test_raw_config_table() {
        let bytes = [
            1, 5, 0, 1, // RB5 output high
            0, 0, 1, 0, // RA0 input
        ];

        let table = RawPinConfig::table(&bytes).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(PinConfig::try_from(table[0]), Ok(PinConfig::output(Port::B, 5, Logic::High)));
        assert_eq!(PinConfig::try_from(table[1]), Ok(PinConfig::input(Port::A, 0)));
    }

    #[test]
    fn test_raw_config_table_rejects_partial_record() {
        let bytes = [1, 5, 0, 1, 0, 0];

        assert!(matches!(RawPinConfig::table(&bytes), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_packed_layout() {
        let config = PinConfig::new(Port::C, 5, Direction::Input, Logic::High);

        let packed = PackedPinConfig::pack(&config).unwrap();

        // logic | direction | pin 5 | port 2
        assert_eq!(packed, PackedPinConfig(0b1110_1010));
        assert_eq!(packed.unpack(), Ok(config));
    }

    #[test]
    fn test_packed_output_low_is_port_and_pin_only() {
        let config = PinConfig::output(Port::E, 7, Logic::Low);

        assert_eq!(PackedPinConfig::pack(&config), Ok(PackedPinConfig(0b0011_1100)));
    }

    #[test]
    fn test_pack_rejects_wide_pin() {
        let config = PinConfig::output(Port::A, 8, Logic::Low);

        assert!(matches!(PackedPinConfig::pack(&config), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_unpack_rejects_unused_port_values() {
        for port in 5..=7u8 {
            let packed = PackedPinConfig(BIT!(7) | (3 << PACKED_PIN_SHIFT) | port);
            assert!(matches!(packed.unpack(), Err(Error::InvalidArgument(_))));
        }
    }
}
