//! Debounced buttons fed from an interrupt handler.
//!
//! [`InputSource`] owns every button record and both sensor levels behind one
//! `critical_section::Mutex`. The GPIO interrupt calls [`InputSource::on_edge`]
//! with the pin and a timestamp; the main loop calls [`InputSource::consume`]
//! and [`InputSource::levels`]. Each of these runs inside a single critical
//! section, so neither side ever observes a half-applied update.
//!
//! ```ignore
//! static INPUTS: InputSource<3> = InputSource::new();
//!
//! #[interrupt]
//! fn IO_IRQ_BANK0() {
//!     let pin = board::take_falling_edge();
//!     INPUTS.on_edge(pin, board::now());
//! }
//! ```

use core::cell::RefCell;
use critical_section::Mutex;
use heapless::Vec;

use crate::config::{DEBOUNCE_INTERVAL, MAX_PIN};
use crate::time::{Duration, Instant, TimeSource};
use crate::types::{InitError, PinId};

/// Trait for abstracting GPIO input configuration.
///
/// Implement this for your board's pin bank. The pin must end up as an input
/// with its pull-up enabled and a falling-edge interrupt armed.
pub trait PullUpInput {
    /// Configures `pin` as a pulled-up input.
    fn configure_pull_up(&mut self, pin: PinId) -> Result<(), InitError>;
}

/// Which sensor level an accepted press advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LevelBinding {
    /// Press only sets the pressed flag.
    None,

    /// Press advances the soil moisture level.
    Soil,

    /// Press advances the air moisture level.
    Air,
}

/// A discrete sensor reading in `0..=2` that wraps back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Level(u8);

impl Level {
    /// Number of distinct values.
    pub const STEPS: u8 = 3;

    /// Lowest level.
    pub const ZERO: Self = Level(0);

    /// Creates a level, returning `None` if `value` is out of range.
    pub const fn new(value: u8) -> Option<Self> {
        if value < Self::STEPS {
            Some(Level(value))
        } else {
            None
        }
    }

    /// Returns the raw value.
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns the following level, wrapping from 2 to 0.
    #[must_use]
    pub const fn next(self) -> Self {
        Level((self.0 + 1) % Self::STEPS)
    }
}

/// A consistent snapshot of both sensor levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorLevels {
    pub soil: Level,
    pub air: Level,
}

/// Identifies a registered button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonHandle(usize);

impl ButtonHandle {
    /// Registration order of the button.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One physical button and its debounce state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pin: PinId,
    last_time: Instant,
    pressed: bool,
    binding: LevelBinding,
}

impl Button {
    const fn new(pin: PinId, binding: LevelBinding) -> Self {
        Self {
            pin,
            last_time: Instant::BOOT,
            pressed: false,
            binding,
        }
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// Timestamp of the last accepted edge.
    pub fn last_time(&self) -> Instant {
        self.last_time
    }

    /// True while a press is waiting to be consumed.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn binding(&self) -> LevelBinding {
        self.binding
    }

    /// Accepts the edge if more than `debounce` has passed since the last
    /// accepted one.
    fn accept(&mut self, now: Instant, debounce: Duration) -> bool {
        if now.duration_since(self.last_time) > debounce {
            self.pressed = true;
            self.last_time = now;
            true
        } else {
            false
        }
    }
}

struct Inputs<const N: usize> {
    buttons: Vec<Button, N>,
    levels: SensorLevels,
}

impl<const N: usize> Inputs<N> {
    const fn new() -> Self {
        Self {
            buttons: Vec::new(),
            levels: SensorLevels {
                soil: Level::ZERO,
                air: Level::ZERO,
            },
        }
    }

    fn check_free(&self, pin: PinId) -> Result<(), InitError> {
        if self.buttons.iter().any(|b| b.pin == pin) {
            return Err(InitError::PinAlreadyBound(pin));
        }
        if self.buttons.is_full() {
            return Err(InitError::RegistryFull);
        }
        Ok(())
    }

    fn bump(&mut self, binding: LevelBinding) {
        match binding {
            LevelBinding::None => {}
            LevelBinding::Soil => self.levels.soil = self.levels.soil.next(),
            LevelBinding::Air => self.levels.air = self.levels.air.next(),
        }
    }
}

/// Result of delivering one edge to [`InputSource::on_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Press committed.
    Accepted(ButtonHandle),

    /// Edge arrived inside the debounce window and was dropped.
    Bounced(ButtonHandle),

    /// No button is registered on the pin.
    Unknown,
}

/// Registry of up to `N` debounced buttons plus the sensor levels they drive.
///
/// Can live in a `static`: construction is `const` and every method takes
/// `&self`.
pub struct InputSource<const N: usize> {
    inner: Mutex<RefCell<Inputs<N>>>,
    debounce: Duration,
}

impl<const N: usize> InputSource<N> {
    /// Creates an empty registry with the standard 200 ms debounce interval.
    pub const fn new() -> Self {
        Self::with_debounce(DEBOUNCE_INTERVAL)
    }

    /// Creates an empty registry with a custom debounce interval.
    pub const fn with_debounce(debounce: Duration) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inputs::new())),
            debounce,
        }
    }

    /// Returns the debounce interval.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Binds a new button to `pin` and configures the pin as a pulled-up input.
    ///
    /// # Errors
    /// * `InvalidPin` - Pin number beyond the board's GPIO range
    /// * `PinAlreadyBound` - Another button already uses the pin
    /// * `RegistryFull` - All `N` slots are taken
    /// * Any error from the pin configurator
    pub fn register<P: PullUpInput>(
        &self,
        pins: &mut P,
        pin: PinId,
        binding: LevelBinding,
    ) -> Result<ButtonHandle, InitError> {
        if pin.0 > MAX_PIN {
            return Err(InitError::InvalidPin(pin));
        }

        critical_section::with(|cs| self.inner.borrow_ref(cs).check_free(pin))?;

        // Configured outside the lock, so the slot is checked again below
        pins.configure_pull_up(pin)?;

        let handle = critical_section::with(|cs| {
            let mut inputs = self.inner.borrow_ref_mut(cs);
            inputs.check_free(pin)?;

            let handle = ButtonHandle(inputs.buttons.len());
            inputs
                .buttons
                .push(Button::new(pin, binding))
                .map_err(|_| InitError::RegistryFull)?;
            Ok(handle)
        })?;

        debug!("button {} bound to pin {}", handle.0, pin.0);
        Ok(handle)
    }

    /// Delivers a falling edge on `pin` observed at `timestamp`.
    ///
    /// Call this from the GPIO interrupt handler. Edges closer than the
    /// debounce interval to the previously accepted edge are dropped, not
    /// queued.
    pub fn on_edge(&self, pin: PinId, timestamp: Instant) -> EdgeOutcome {
        let (outcome, levels) = critical_section::with(|cs| {
            let mut inputs = self.inner.borrow_ref_mut(cs);

            let Some(index) = inputs.buttons.iter().position(|b| b.pin == pin) else {
                return (EdgeOutcome::Unknown, inputs.levels);
            };

            let button = &mut inputs.buttons[index];
            let binding = button.binding;
            if !button.accept(timestamp, self.debounce) {
                return (EdgeOutcome::Bounced(ButtonHandle(index)), inputs.levels);
            }

            inputs.bump(binding);
            (EdgeOutcome::Accepted(ButtonHandle(index)), inputs.levels)
        });

        match outcome {
            EdgeOutcome::Accepted(_) => debug!(
                "press on pin {}: soil {} air {}",
                pin.0,
                levels.soil.get(),
                levels.air.get()
            ),
            EdgeOutcome::Bounced(_) => trace!("bounce on pin {} dropped", pin.0),
            EdgeOutcome::Unknown => trace!("edge on unbound pin {}", pin.0),
        }

        outcome
    }

    /// Same as [`InputSource::on_edge`], stamping the edge with `clock.now()`.
    #[inline]
    pub fn on_edge_at<T: TimeSource>(&self, pin: PinId, clock: &T) -> EdgeOutcome {
        self.on_edge(pin, clock.now())
    }

    /// Reads and clears the pressed flag of `handle`. Returns whether a press
    /// was pending. Unknown handles report no press.
    pub fn consume(&self, handle: ButtonHandle) -> bool {
        critical_section::with(|cs| {
            let mut inputs = self.inner.borrow_ref_mut(cs);
            match inputs.buttons.get_mut(handle.0) {
                Some(button) => core::mem::replace(&mut button.pressed, false),
                None => false,
            }
        })
    }

    /// Returns both sensor levels, read together.
    pub fn levels(&self) -> SensorLevels {
        critical_section::with(|cs| self.inner.borrow_ref(cs).levels)
    }

    /// Returns a copy of the button record behind `handle`.
    pub fn button(&self, handle: ButtonHandle) -> Option<Button> {
        critical_section::with(|cs| self.inner.borrow_ref(cs).buttons.get(handle.0).copied())
    }

    /// Number of registered buttons.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).buttons.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for InputSource<N> {
    fn default() -> Self {
        Self::new()
    }
}
