//! Board wiring and tunables.

use crate::frame::ReferenceMap;
use crate::time::Duration;
use crate::types::PinId;
use palette::Srgb;

/// Button A, bound to the soil moisture level.
pub const BUTTON_A: PinId = PinId(5);
/// Button B, bound to the air moisture level.
pub const BUTTON_B: PinId = PinId(6);
/// Joystick push button.
pub const BUTTON_JOYSTICK: PinId = PinId(22);

/// Joystick X axis ADC input.
pub const JOYSTICK_X: PinId = PinId(26);
/// Joystick Y axis ADC input.
pub const JOYSTICK_Y: PinId = PinId(27);

/// Data line of the 5x5 matrix.
pub const MATRIX_DATA: PinId = PinId(7);
/// Matrix bit clock in hertz.
pub const MATRIX_BIT_RATE_HZ: u32 = 800_000;

/// Indicator LED channels.
pub const INDICATOR_RED: PinId = PinId(13);
pub const INDICATOR_GREEN: PinId = PinId(11);
pub const INDICATOR_BLUE: PinId = PinId(12);

/// Display bus pins, address and clock.
pub const DISPLAY_SDA: PinId = PinId(14);
pub const DISPLAY_SCL: PinId = PinId(15);
pub const DISPLAY_ADDRESS: u8 = 0x3C;
pub const DISPLAY_BUS_HZ: u32 = 400_000;

/// Highest GPIO number available on the board.
pub const MAX_PIN: u8 = 29;

/// Minimum gap between two accepted edges on the same button.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_micros(200_000);

/// Number of buttons the board exposes.
pub const BUTTON_COUNT: usize = 3;

/// Wiring of the matrix panel: the data line snakes from the bottom-right
/// corner, so alternate rows run in opposite directions.
pub const BOARD_REFERENCE: ReferenceMap = ReferenceMap::checked([
    [24, 23, 22, 21, 20],
    [15, 16, 17, 18, 19],
    [14, 13, 12, 11, 10],
    [5, 6, 7, 8, 9],
    [4, 3, 2, 1, 0],
]);

/// How long each process state holds before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DwellTimes {
    pub fallow: Duration,
    pub planting: Duration,
    pub irrigation: Duration,
    pub harvest: Duration,
}

impl Default for DwellTimes {
    fn default() -> Self {
        Self {
            fallow: Duration::from_millis(3_000),
            planting: Duration::from_millis(2_000),
            irrigation: Duration::from_millis(2_000),
            harvest: Duration::from_millis(2_000),
        }
    }
}

/// Runtime configuration for [`Controller`](crate::Controller).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Button whose presses advance the soil level.
    pub button_a: PinId,

    /// Button whose presses advance the air level.
    pub button_b: PinId,

    /// Joystick push button.
    pub button_joystick: PinId,

    /// Dwell time per process state.
    pub dwell: DwellTimes,

    /// Logical-to-physical matrix mapping.
    pub reference: ReferenceMap,

    /// Colour written to the indicator LED at startup.
    pub indicator_startup: Srgb<u8>,

    /// Top-left corner of the irrigation label on the display.
    pub label_origin: (u8, u8),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            button_a: BUTTON_A,
            button_b: BUTTON_B,
            button_joystick: BUTTON_JOYSTICK,
            dwell: DwellTimes::default(),
            reference: BOARD_REFERENCE,
            indicator_startup: Srgb::new(0, 255, 0),
            label_origin: (0, 0),
        }
    }
}
