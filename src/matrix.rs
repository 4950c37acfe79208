//! The 5x5 LED matrix: pixel buffer, wiring map and transport in one place.

use crate::frame::{Frame, PixelBuffer, PixelTransport, ReferenceMap};
use crate::types::InitError;

/// Owns the matrix transport together with its pixel buffer and wiring map.
///
/// [`LedMatrix::put_frame`] composites into the buffer, [`LedMatrix::render`]
/// pushes the whole buffer out. The buffer is never cleared implicitly, so
/// successive frames overlay each other.
pub struct LedMatrix<T: PixelTransport> {
    transport: T,
    buffer: PixelBuffer,
    reference: ReferenceMap,
}

impl<T: PixelTransport> LedMatrix<T> {
    /// Creates a matrix with every pixel off.
    ///
    /// # Errors
    /// * `InvalidReferenceMap` - `reference` is not a bijection onto the pixels
    pub fn new(transport: T, reference: ReferenceMap) -> Result<Self, InitError> {
        reference.validate()?;

        Ok(Self {
            transport,
            buffer: PixelBuffer::new(),
            reference,
        })
    }

    /// Composites `frame` into the buffer.
    pub fn put_frame(&mut self, frame: &Frame) {
        self.buffer.render_frame(frame, &self.reference);
    }

    /// Pushes every pixel to the transport.
    pub fn render(&mut self) {
        self.buffer.flush(&mut self.transport);
    }

    /// Turns every buffered pixel off without rendering.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn reference(&self) -> &ReferenceMap {
        &self.reference
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Releases the transport.
    pub fn release(self) -> T {
        self.transport
    }
}
