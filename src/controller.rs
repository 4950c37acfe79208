//! Board-level control loop.
//!
//! Provides [`Controller`], which wires the input registry, the process state
//! machine and the LED matrix to the remaining board peripherals. It also
//! defines the traits those peripherals implement.

use embedded_hal::delay::DelayNs;
use palette::Srgb;

use crate::config::Config;
use crate::frame::PixelTransport;
use crate::input::{ButtonHandle, InputSource, LevelBinding, PullUpInput};
use crate::matrix::LedMatrix;
use crate::process::{Process, Stage};
use crate::types::{InitError, JoystickReading};

/// Trait for abstracting the RGB indicator LED.
///
/// Implement this for your LED hardware (GPIO, PWM, etc.). Channel values are
/// 0-255; mapping them to duty cycles is up to the implementation. Handle any
/// hardware errors internally - this method cannot fail.
pub trait RgbIndicator {
    /// Sets the LED to the specified colour.
    fn set_color(&mut self, color: Srgb<u8>);
}

/// Trait for abstracting the text display.
pub trait TextDisplay {
    /// Erases the drawing buffer. The screen keeps its content until the next
    /// [`TextDisplay::draw_text`].
    fn clear(&mut self);

    /// Draws `text` with its top-left corner at `(x, y)` and sends the buffer
    /// to the screen.
    fn draw_text(&mut self, text: &str, x: u8, y: u8);
}

/// Trait for abstracting the analog joystick.
pub trait Joystick {
    /// Samples both axes.
    fn read(&mut self) -> JoystickReading;
}

/// Board peripherals consumed by [`Controller::new`].
pub struct Peripherals<M, D, L, J, Y> {
    /// Serial link of the LED matrix.
    pub matrix: M,
    pub display: D,
    pub indicator: L,
    pub joystick: J,
    /// Blocking delay used for dwell times.
    pub delay: Y,
}

/// Presses drained during one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Presses {
    pub a: bool,
    pub b: bool,
    pub joystick: bool,
}

/// Summary of one control loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// State executed during the iteration.
    pub stage: Stage,

    /// Presses consumed at the start of the iteration.
    pub presses: Presses,

    /// Joystick sample taken during the iteration.
    pub joystick: JoystickReading,
}

#[derive(Debug, Clone, Copy)]
struct Buttons {
    a: ButtonHandle,
    b: ButtonHandle,
    joystick: ButtonHandle,
}

/// Runs the process cycle on the board.
///
/// # Type Parameters
/// * `'a` - Lifetime of the input registry, usually `'static`
/// * `M` - Matrix transport
/// * `D` - Text display
/// * `L` - Indicator LED
/// * `J` - Joystick
/// * `Y` - Delay provider
/// * `N` - Capacity of the input registry (at least 3)
pub struct Controller<'a, M, D, L, J, Y, const N: usize>
where
    M: PixelTransport,
    D: TextDisplay,
    L: RgbIndicator,
    J: Joystick,
    Y: DelayNs,
{
    inputs: &'a InputSource<N>,
    buttons: Buttons,
    matrix: LedMatrix<M>,
    display: D,
    indicator: L,
    joystick: J,
    delay: Y,
    process: Process,
    label_origin: (u8, u8),
    last_joystick: JoystickReading,
}

impl<'a, M, D, L, J, Y, const N: usize> Controller<'a, M, D, L, J, Y, N>
where
    M: PixelTransport,
    D: TextDisplay,
    L: RgbIndicator,
    J: Joystick,
    Y: DelayNs,
{
    /// Brings the board up: validates the matrix map, binds the three buttons,
    /// lights the indicator and clears the display.
    ///
    /// Any failure aborts setup; the control loop must not be started.
    pub fn new<P: PullUpInput>(
        inputs: &'a InputSource<N>,
        pins: &mut P,
        peripherals: Peripherals<M, D, L, J, Y>,
        config: Config,
    ) -> Result<Self, InitError> {
        let Peripherals {
            matrix,
            mut display,
            mut indicator,
            joystick,
            delay,
        } = peripherals;

        let matrix = LedMatrix::new(matrix, config.reference)?;

        let buttons = Buttons {
            a: inputs.register(pins, config.button_a, LevelBinding::Soil)?,
            b: inputs.register(pins, config.button_b, LevelBinding::Air)?,
            joystick: inputs.register(pins, config.button_joystick, LevelBinding::None)?,
        };

        indicator.set_color(config.indicator_startup);
        display.clear();

        info!("setup complete, {} buttons bound", inputs.len());

        Ok(Self {
            inputs,
            buttons,
            matrix,
            display,
            indicator,
            joystick,
            delay,
            process: Process::new(config.dwell),
            label_origin: config.label_origin,
            last_joystick: JoystickReading::default(),
        })
    }

    /// Runs one iteration: drains presses, samples the joystick, executes the
    /// current state, renders the matrix, waits out the dwell and advances.
    pub fn step(&mut self) -> Iteration {
        let presses = self.drain_presses();
        self.last_joystick = self.joystick.read();

        let stage = self.process.enter(self.inputs.levels());
        if let Some(label) = stage.label {
            let (x, y) = self.label_origin;
            self.display.draw_text(label, x, y);
        }

        self.matrix.put_frame(&stage.frame);
        self.matrix.render();

        self.delay.delay_ms(stage.dwell.as_millis());
        self.process.advance();
        self.display.clear();

        Iteration {
            stage,
            presses,
            joystick: self.last_joystick,
        }
    }

    /// Runs the control loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn drain_presses(&mut self) -> Presses {
        let presses = Presses {
            a: self.inputs.consume(self.buttons.a),
            b: self.inputs.consume(self.buttons.b),
            joystick: self.inputs.consume(self.buttons.joystick),
        };

        if presses.a {
            debug!("button A consumed");
        }
        if presses.b {
            debug!("button B consumed");
        }
        if presses.joystick {
            debug!("joystick button consumed");
        }

        presses
    }

    pub fn process(&self) -> &Process {
        &self.process
    }

    pub fn matrix(&self) -> &LedMatrix<M> {
        &self.matrix
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    pub fn delay(&self) -> &Y {
        &self.delay
    }

    /// Most recent joystick sample. The process logic does not use it.
    pub fn last_joystick(&self) -> JoystickReading {
        self.last_joystick
    }

    pub fn inputs(&self) -> &'a InputSource<N> {
        self.inputs
    }
}
