pub mod gpio;
pub mod pin;
pub mod pin_config;
pub mod register;
