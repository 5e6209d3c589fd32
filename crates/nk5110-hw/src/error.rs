//! Error types for the NK5110 hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the controller.
///
/// Drawing into the framebuffer never fails; out-of-range geometry is clipped.
#[derive(Error, Debug)]
pub enum Error {
    /// Bringing up the controller failed. Startup cannot continue.
    #[error("Hardware initialization failed: {0}")]
    HardwareInit(#[source] Box<Error>),

    /// SPI or GPIO transfer error.
    #[error("Bus error: {0}")]
    Bus(String),

    /// Controller configuration value out of range.
    #[error("Invalid controller configuration: {0}")]
    InvalidConfig(String),

    /// Unknown display mode name.
    #[error("Invalid display mode: {0}")]
    InvalidDisplayMode(String),
}
