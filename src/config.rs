use crate::sdk::mcu::register::Register;

// PIC18F46K20 GPIO layout

/// Number of GPIO ports (A..E).
pub const PORT_MAX_NUMBER: usize = 5;
/// Number of pins on each port.
pub const PORT_PIN_MAX_NUMBER: u8 = 8;

/// Mask applied by the port-level toggle.
pub const PORT_TOGGLE_MASK: u8 = 0xFF;

// Special function registers; each family is contiguous over ports A..E
pub const PORT_BASE_ADDR: usize = 0xF80;
pub const LAT_BASE_ADDR: usize = 0xF89;
pub const TRIS_BASE_ADDR: usize = 0xF92;

/// Register flipped by the pin-level toggle.
#[cfg(not(feature = "toggle-port-register"))]
pub const PIN_TOGGLE_REGISTER: Register = Register::Lat;
#[cfg(feature = "toggle-port-register")]
pub const PIN_TOGGLE_REGISTER: Register = Register::Port;
