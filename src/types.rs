//! Core types shared across the input, rendering and process layers.

/// A GPIO pin number on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl From<u8> for PinId {
    fn from(pin: u8) -> Self {
        PinId(pin)
    }
}

impl From<PinId> for u8 {
    fn from(pin: PinId) -> Self {
        pin.0
    }
}

/// A raw pair of joystick ADC readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReading {
    /// X axis sample.
    pub x: u16,

    /// Y axis sample.
    pub y: u16,
}

/// Setup failures. All of them abort startup before the control loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Pin number does not exist on the board.
    InvalidPin(PinId),

    /// Pin is already bound to another button.
    PinAlreadyBound(PinId),

    /// The button registry has no free slot left.
    RegistryFull,

    /// The logical-to-physical map is not a bijection onto the pixel indices.
    InvalidReferenceMap,

    /// The platform refused to configure the pin as a pulled-up input.
    PinConfiguration(PinId),
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InitError::InvalidPin(pin) => {
                write!(f, "pin {} does not exist on this board", pin.0)
            }
            InitError::PinAlreadyBound(pin) => {
                write!(f, "pin {} is already bound to a button", pin.0)
            }
            InitError::RegistryFull => {
                write!(f, "button registry is full")
            }
            InitError::InvalidReferenceMap => {
                write!(f, "reference map must cover every pixel index exactly once")
            }
            InitError::PinConfiguration(pin) => {
                write!(f, "failed to configure pin {} as pull-up input", pin.0)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}
