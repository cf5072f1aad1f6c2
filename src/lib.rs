//! GPIO hardware abstraction for the PIC18F46K20.
//!
//! Ports A..E are each backed by three 8-bit special function registers:
//! `TRISx` (direction), `LATx` (output latch) and `PORTx` (pin levels).
//! [`Gpio`] validates every pin or port access before touching them, through a
//! [`RegisterBank`]: [`MmioBank`] on the device, [`RamBank`] on a host.
//!
//! ```
//! use pic18_gpio::{Gpio, Logic, PinConfig, Port, RamBank};
//!
//! let mut gpio = Gpio::new(RamBank::new());
//! let led = PinConfig::output(Port::B, 5, Logic::High);
//!
//! gpio.pin_init(&led).unwrap();
//! gpio.pin_toggle_logic(&led).unwrap();
//! assert_eq!(gpio.pin_read_logic(&led), Ok(Logic::Low));
//! ```

pub mod config;
pub mod error;
pub mod sdk;

pub use error::{Error, Result};
pub use sdk::mcu::gpio::{Direction, Gpio, Logic, PinMask, Port};
pub use sdk::mcu::pin::GpioPin;
pub use sdk::mcu::pin_config::{PackedPinConfig, PinConfig, RawPinConfig};
pub use sdk::mcu::register::{MmioBank, RamBank, Register, RegisterBank};
