//! The fallow → planting → irrigation → harvest cycle.
//!
//! Provides [`Process`], a time-driven state machine. Each state holds for its
//! dwell time and then unconditionally advances; there is no terminal state.
//! Irrigation is the only state with a side effect: on entry it derives an
//! [`IrrigationMode`] from the sensor levels and asks for the mode label to be
//! shown.

use crate::colors::{self, GrbColor};
use crate::config::DwellTimes;
use crate::frame::Frame;
use crate::input::SensorLevels;
use crate::time::Duration;

/// Stage of the simulated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProcessState {
    /// Resting field, dim green.
    Fallow,
    /// Seeds going in, brighter green.
    Planting,
    /// Watering, blue-green. Selects the irrigation mode.
    Irrigation,
    /// Crop ready, bright green.
    Harvest,
}

impl ProcessState {
    /// All states in cycle order.
    pub const ALL: [ProcessState; 4] = [
        ProcessState::Fallow,
        ProcessState::Planting,
        ProcessState::Irrigation,
        ProcessState::Harvest,
    ];

    /// Returns the state that follows this one.
    ///
    /// Planting advances on time alone. Whether it should instead repeat a
    /// bounded number of times or wait for a button press is still open.
    pub fn next(&self) -> Self {
        match self {
            ProcessState::Fallow => ProcessState::Planting,
            ProcessState::Planting => ProcessState::Irrigation,
            ProcessState::Irrigation => ProcessState::Harvest,
            ProcessState::Harvest => ProcessState::Fallow,
        }
    }

    /// Matrix colour shown in this state.
    pub fn color(&self) -> GrbColor {
        match self {
            ProcessState::Fallow => colors::FALLOW,
            ProcessState::Planting => colors::PLANTING,
            ProcessState::Irrigation => colors::IRRIGATION,
            ProcessState::Harvest => colors::HARVEST,
        }
    }

    /// Frame shown in this state: the whole field in the state colour.
    pub fn frame(&self) -> Frame {
        Frame::solid(self.color())
    }

    /// How long this state holds.
    pub fn dwell(&self, dwell: &DwellTimes) -> Duration {
        match self {
            ProcessState::Fallow => dwell.fallow,
            ProcessState::Planting => dwell.planting,
            ProcessState::Irrigation => dwell.irrigation,
            ProcessState::Harvest => dwell.harvest,
        }
    }
}

/// Watering method chosen while irrigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrrigationMode {
    #[default]
    None,
    Sprinkler,
    Drip,
}

impl IrrigationMode {
    /// Picks the mode for the given levels. Dry soil gets sprinklers unless
    /// the air is at its wettest, in which case drip lines are used; moist soil
    /// keeps `current`.
    pub fn select(current: Self, levels: SensorLevels) -> Self {
        if levels.soil.get() < 1 {
            if levels.air.get() < 2 {
                IrrigationMode::Sprinkler
            } else {
                IrrigationMode::Drip
            }
        } else {
            current
        }
    }

    /// Text shown on the display for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            IrrigationMode::None => "Modo de Irrigacao: Nenhum",
            IrrigationMode::Sprinkler => "Modo de Irrigacao: Aspersao",
            IrrigationMode::Drip => "Modo de Irrigacao: Gotejamento",
        }
    }
}

/// What one loop iteration has to do for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stage {
    /// State being executed.
    pub state: ProcessState,

    /// Frame to render.
    pub frame: Frame,

    /// Time to hold before advancing.
    pub dwell: Duration,

    /// Label to show on the display, if any.
    pub label: Option<&'static str>,
}

/// The process state machine.
#[derive(Debug, Clone)]
pub struct Process {
    state: ProcessState,
    mode: IrrigationMode,
    dwell: DwellTimes,
    cycles: u32,
}

impl Process {
    /// Creates a machine resting in `Fallow` with no irrigation mode.
    pub fn new(dwell: DwellTimes) -> Self {
        Self {
            state: ProcessState::Fallow,
            mode: IrrigationMode::None,
            dwell,
            cycles: 0,
        }
    }

    /// Runs the entry behaviour of the current state and describes the
    /// iteration. Does not change state; call [`Process::advance`] once the
    /// dwell has elapsed.
    pub fn enter(&mut self, levels: SensorLevels) -> Stage {
        let label = match self.state {
            ProcessState::Irrigation => {
                self.mode = IrrigationMode::select(self.mode, levels);
                info!(
                    "irrigation mode {:?} (soil {}, air {})",
                    self.mode,
                    levels.soil.get(),
                    levels.air.get()
                );
                Some(self.mode.label())
            }
            _ => None,
        };

        Stage {
            state: self.state,
            frame: self.state.frame(),
            dwell: self.state.dwell(&self.dwell),
            label,
        }
    }

    /// Moves to the next state. Leaving `Irrigation` resets the mode.
    pub fn advance(&mut self) -> ProcessState {
        let from = self.state;
        if from == ProcessState::Irrigation {
            self.mode = IrrigationMode::None;
        }

        self.state = from.next();
        if self.state == ProcessState::Fallow {
            self.cycles = self.cycles.wrapping_add(1);
        }

        debug!("process {:?} -> {:?}", from, self.state);
        self.state
    }

    /// Returns the current state.
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Returns the irrigation mode. Only meaningful while irrigating.
    pub fn mode(&self) -> IrrigationMode {
        self.mode
    }

    /// Number of completed cycles (arrivals back at `Fallow`).
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn dwell_times(&self) -> &DwellTimes {
        &self.dwell
    }
}

impl Default for Process {
    fn default() -> Self {
        Self::new(DwellTimes::default())
    }
}
