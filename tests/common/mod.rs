//! Shared test infrastructure for crop-cycle integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use crop_cycle::{
    Config, Controller, Duration, GrbColor, InitError, InputSource, Instant, Joystick,
    JoystickReading, PIXELS, Peripherals, PinId, PixelTransport, PullUpInput, RgbIndicator, Srgb,
    TextDisplay, TimeSource,
};
use embedded_hal::delay::DelayNs;

// ============================================================================
// Mock Pin Bank
// ============================================================================

/// Mock pin configurator that records configured pins and can refuse one
pub struct MockPins {
    configured: heapless::Vec<PinId, 8>,
    refuse: Option<PinId>,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            configured: heapless::Vec::new(),
            refuse: None,
        }
    }

    pub fn refusing(pin: PinId) -> Self {
        Self {
            configured: heapless::Vec::new(),
            refuse: Some(pin),
        }
    }

    pub fn configured(&self) -> &[PinId] {
        &self.configured
    }
}

impl PullUpInput for MockPins {
    fn configure_pull_up(&mut self, pin: PinId) -> Result<(), InitError> {
        if self.refuse == Some(pin) {
            return Err(InitError::PinConfiguration(pin));
        }
        let _ = self.configured.push(pin);
        Ok(())
    }
}

// ============================================================================
// Mock Matrix Transport
// ============================================================================

/// Mock transport that records every pushed pixel
pub struct MockTransport {
    history: heapless::Vec<GrbColor, 512>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            history: heapless::Vec::new(),
        }
    }

    pub fn pixels_written(&self) -> usize {
        self.history.len()
    }

    /// Number of complete buffer flushes seen
    pub fn flushes(&self) -> usize {
        self.history.len() / PIXELS
    }

    /// The most recent complete flush
    pub fn last_flush(&self) -> &[GrbColor] {
        let end = self.flushes() * PIXELS;
        &self.history[end.saturating_sub(PIXELS)..end]
    }
}

impl PixelTransport for MockTransport {
    fn write_pixel(&mut self, pixel: GrbColor) {
        let _ = self.history.push(pixel);
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that records drawn text and clears
pub struct MockDisplay {
    draws: heapless::Vec<(heapless::String<32>, u8, u8), 16>,
    clears: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            draws: heapless::Vec::new(),
            clears: 0,
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.draws.iter().map(|(text, _, _)| text.as_str())
    }

    pub fn last_text(&self) -> Option<&str> {
        self.draws.last().map(|(text, _, _)| text.as_str())
    }

    pub fn last_origin(&self) -> Option<(u8, u8)> {
        self.draws.last().map(|(_, x, y)| (*x, *y))
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl TextDisplay for MockDisplay {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) {
        let mut line = heapless::String::new();
        let _ = line.push_str(text);
        let _ = self.draws.push((line, x, y));
    }
}

// ============================================================================
// Mock Indicator LED
// ============================================================================

/// Mock indicator that records all colour changes
pub struct MockIndicator {
    history: heapless::Vec<Srgb<u8>, 8>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self {
            history: heapless::Vec::new(),
        }
    }

    pub fn color_history(&self) -> &[Srgb<u8>] {
        &self.history
    }
}

impl RgbIndicator for MockIndicator {
    fn set_color(&mut self, color: Srgb<u8>) {
        let _ = self.history.push(color);
    }
}

// ============================================================================
// Mock Joystick
// ============================================================================

/// Mock joystick whose X axis climbs by one on every sample
pub struct MockJoystick {
    next: JoystickReading,
}

impl MockJoystick {
    pub fn new() -> Self {
        Self {
            next: JoystickReading { x: 2048, y: 2048 },
        }
    }
}

impl Joystick for MockJoystick {
    fn read(&mut self) -> JoystickReading {
        let reading = self.next;
        self.next.x = self.next.x.wrapping_add(1);
        reading
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Mock delay that returns immediately and records requested waits
pub struct MockDelay {
    waits_ms: heapless::Vec<u32, 32>,
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            waits_ms: heapless::Vec::new(),
            total_ns: 0,
        }
    }

    pub fn waits_ms(&self) -> &[u32] {
        &self.waits_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        let _ = self.waits_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ============================================================================
// Mock Clock
// ============================================================================

/// Mock microsecond clock that only moves when told to
pub struct MockClock {
    current_time: core::cell::Cell<Instant>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(Instant::BOOT),
        }
    }

    /// Advance time by the given duration, wrapping like the hardware timer
    pub fn advance(&self, duration: Duration) {
        let current = self.current_time.get().as_micros();
        self.current_time
            .set(Instant::from_micros(current.wrapping_add(duration.as_micros())));
    }

    pub fn set_time(&self, time: Instant) {
        self.current_time.set(time);
    }
}

impl TimeSource for MockClock {
    fn now(&self) -> Instant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestController<'a, const N: usize> =
    Controller<'a, MockTransport, MockDisplay, MockIndicator, MockJoystick, MockDelay, N>;

pub fn peripherals() -> Peripherals<MockTransport, MockDisplay, MockIndicator, MockJoystick, MockDelay> {
    Peripherals {
        matrix: MockTransport::new(),
        display: MockDisplay::new(),
        indicator: MockIndicator::new(),
        joystick: MockJoystick::new(),
        delay: MockDelay::new(),
    }
}

/// Brings up a controller with default configuration on mocks
pub fn controller<const N: usize>(inputs: &InputSource<N>) -> TestController<'_, N> {
    Controller::new(inputs, &mut MockPins::new(), peripherals(), Config::default())
        .expect("setup with default config should succeed")
}

/// Shorthand for a microsecond timestamp
pub fn at(micros: u32) -> Instant {
    Instant::from_micros(micros)
}

/// Delivers `count` presses on `pin`, spaced well outside the debounce window,
/// starting after `start_us`. Returns the timestamp of the last press.
pub fn press_times(inputs: &InputSource<3>, pin: PinId, start_us: u32, count: u32) -> u32 {
    let mut t = start_us;
    for _ in 0..count {
        t += 250_000;
        inputs.on_edge(pin, at(t));
    }
    t
}
