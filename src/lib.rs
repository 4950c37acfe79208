#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`InputSource`**: Registry of debounced buttons, fed from the GPIO interrupt
//! - **`SensorLevels`**: Soil and air levels (0-2, wrapping) advanced by buttons A and B
//! - **`Frame`**: A 5x5 bit pattern plus a colour
//! - **`ReferenceMap`**: Fixed mapping from logical cell to physical LED index
//! - **`PixelBuffer`**: One packed colour per LED; frames overlay into it
//! - **`Process`**: The fallow → planting → irrigation → harvest state machine
//! - **`Controller`**: Ties it all to the board peripherals and runs the loop
//! - **`PixelTransport`**, **`RgbIndicator`**, **`TextDisplay`**, **`Joystick`**,
//!   **`PullUpInput`**, **`TimeSource`**: Traits to implement for your board
//!
//! Matrix colours are packed as [`GrbColor`] (`0x00GGRRBB`), the order the LED
//! chain expects. The indicator LED takes plain `Srgb<u8>`.

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

pub use palette::Srgb;

pub mod colors;
pub mod config;
pub mod controller;
pub mod frame;
pub mod input;
pub mod matrix;
pub mod process;
pub mod time;
pub mod types;

pub use colors::{GrbColor, color};
pub use config::{Config, DwellTimes};
pub use controller::{Controller, Iteration, Joystick, Peripherals, Presses, RgbIndicator, TextDisplay};
pub use frame::{COLS, Frame, PIXELS, PixelBuffer, PixelTransport, ROWS, ReferenceMap, flush, render_frame};
pub use input::{
    Button, ButtonHandle, EdgeOutcome, InputSource, Level, LevelBinding, PullUpInput, SensorLevels,
};
pub use matrix::LedMatrix;
pub use process::{IrrigationMode, Process, ProcessState, Stage};
pub use time::{Duration, Instant, TimeSource};
pub use types::{InitError, JoystickReading, PinId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_reference_is_valid() {
        assert_eq!(config::BOARD_REFERENCE.validate(), Ok(()));
    }
}
