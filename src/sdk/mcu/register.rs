use crate::config::{LAT_BASE_ADDR, PORT_BASE_ADDR, PORT_MAX_NUMBER, TRIS_BASE_ADDR};
use crate::sdk::mcu::gpio::Port;

macro_rules! regrw_idx {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            #[cfg_attr(test, mry::mry)]
            pub(crate) fn [<read_ $x>](i: u8) -> u8 {
                unsafe {
                    core::ptr::read_volatile(($a + i as usize) as *const u8)
                }
            }

            #[cfg_attr(test, mry::mry)]
            pub(crate) fn [<write_ $x>](value: u8, i: u8) {
                unsafe {
                    core::ptr::write_volatile(($a + i as usize) as *mut u8, value)
                }
            }
        }
    };
}

/****************************************************
 gpio regs: PORTx 0xF80, LATx 0xF89, TRISx 0xF92
 *****************************************************/
regrw_idx!(reg_port, PORT_BASE_ADDR);
regrw_idx!(reg_lat, LAT_BASE_ADDR);
regrw_idx!(reg_tris, TRIS_BASE_ADDR);

/// The three registers backing every port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Direction control: bit set = input, bit clear = output.
    Tris,
    /// Output latch: the value software last wrote.
    Lat,
    /// Input status: the live level on each pin.
    Port,
}

/// Byte-wide access to the per-port register triple.
///
/// The GPIO layer only ever talks to hardware through this trait, so the same
/// accessors run against the memory-mapped registers on the device and against
/// [`RamBank`] on a host.
pub trait RegisterBank {
    fn read(&self, port: Port, register: Register) -> u8;

    fn write(&mut self, port: Port, register: Register, value: u8);

    /// Read-modify-write of one register. Not atomic with respect to interrupts.
    fn modify<F>(&mut self, port: Port, register: Register, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read(port, register);
        self.write(port, register, f(value));
    }
}

/// The special function registers of the running device.
#[derive(Debug)]
pub struct MmioBank(());

impl MmioBank {
    /// # Safety
    ///
    /// Must only be called on a PIC18F46K20, where the GPIO registers live at
    /// the addresses in [`crate::config`], and at most one `MmioBank` may exist
    /// at a time.
    pub const unsafe fn new() -> Self {
        MmioBank(())
    }
}

impl RegisterBank for MmioBank {
    fn read(&self, port: Port, register: Register) -> u8 {
        let i = port.index();
        match register {
            Register::Tris => read_reg_tris(i),
            Register::Lat => read_reg_lat(i),
            Register::Port => read_reg_port(i),
        }
    }

    fn write(&mut self, port: Port, register: Register, value: u8) {
        let i = port.index();
        match register {
            Register::Tris => write_reg_tris(value, i),
            Register::Lat => write_reg_lat(value, i),
            Register::Port => write_reg_port(value, i),
        }
    }
}

/// In-memory register bank modelling the port pins electrically.
///
/// Reading `PORT` returns the latch for output pins and the externally driven
/// level for input pins. Writing `PORT` lands in the latch, as on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamBank {
    tris: [u8; PORT_MAX_NUMBER],
    lat: [u8; PORT_MAX_NUMBER],
    input: [u8; PORT_MAX_NUMBER],
    writes: usize,
}

impl RamBank {
    /// Power-on state: every pin an input, latches and external levels low.
    pub const fn new() -> Self {
        RamBank {
            tris: [0xFF; PORT_MAX_NUMBER],
            lat: [0; PORT_MAX_NUMBER],
            input: [0; PORT_MAX_NUMBER],
            writes: 0,
        }
    }

    /// Sets the levels an external circuit drives onto `port`.
    pub fn drive_input(&mut self, port: Port, levels: u8) {
        self.input[port as usize] = levels;
    }

    /// Number of register writes performed through [`RegisterBank::write`].
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for RamBank {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBank for RamBank {
    fn read(&self, port: Port, register: Register) -> u8 {
        let i = port as usize;
        match register {
            Register::Tris => self.tris[i],
            Register::Lat => self.lat[i],
            Register::Port => (self.lat[i] & !self.tris[i]) | (self.input[i] & self.tris[i]),
        }
    }

    fn write(&mut self, port: Port, register: Register, value: u8) {
        let i = port as usize;
        self.writes += 1;
        match register {
            Register::Tris => self.tris[i] = value,
            Register::Lat | Register::Port => self.lat[i] = value,
        }
    }
}
