use thiserror::Error;

/// Failure reported by a GPIO accessor.
///
/// Every check runs before the first register access, so a call that returns
/// an error has not touched the hardware.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A port or pin index is out of range, or a required input is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A raw direction or logic value matches neither defined state.
    #[error("unrecognized value {0:#04x}")]
    UnrecognizedValue(u8),
}

pub type Result<T> = core::result::Result<T, Error>;
