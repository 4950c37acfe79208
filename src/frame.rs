//! Bit-pattern frames and their rasterization into a physical pixel buffer.
//!
//! A [`Frame`] describes the 5x5 panel as five row bytes: bit `i` of row `r`
//! lights logical cell `(r, i)`. Only the low five bits of each row are used.
//! [`PixelBuffer::render_frame`] resolves each lit cell through a
//! [`ReferenceMap`] to the physical LED index on the data chain.
//!
//! Rendering is an overlay: cells whose bit is clear keep whatever colour the
//! buffer already holds. Clear the buffer first when a fresh picture is wanted.

use crate::colors::GrbColor;
use crate::types::InitError;

/// Rows on the panel.
pub const ROWS: usize = 5;
/// Columns on the panel.
pub const COLS: usize = 5;
/// LEDs on the data chain.
pub const PIXELS: usize = ROWS * COLS;

/// Bits of a row byte that address a column.
const ROW_MASK: u8 = 0b1_1111;

/// What to light, and in which colour, for one rendering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Row bit patterns, top row first.
    pub draw: [u8; ROWS],

    /// Colour written to every lit cell.
    pub color: GrbColor,
}

impl Frame {
    /// Creates a frame from row patterns and a colour.
    pub const fn new(draw: [u8; ROWS], color: GrbColor) -> Self {
        Self { draw, color }
    }

    /// Every cell lit.
    pub const fn solid(color: GrbColor) -> Self {
        Self::new([ROW_MASK; ROWS], color)
    }

    /// Returns the same pattern in another colour.
    pub const fn with_color(self, color: GrbColor) -> Self {
        Self::new(self.draw, color)
    }

    /// Decodes one row into per-column flags. Bits above column 4 are ignored.
    ///
    /// # Panics
    /// Panics if `row >= ROWS`.
    #[inline]
    pub fn row_cells(&self, row: usize) -> [bool; COLS] {
        let bits = self.draw[row];
        core::array::from_fn(|col| bits & (1 << col) != 0)
    }

    /// Returns true if logical cell `(row, col)` is lit.
    #[inline]
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        row < ROWS && col < COLS && self.draw[row] & (1 << col) != 0
    }

    /// Number of lit cells, counting only the meaningful bits.
    pub fn lit_count(&self) -> u32 {
        self.draw.iter().map(|row| (row & ROW_MASK).count_ones()).sum()
    }
}

/// Fixed translation from logical `(row, col)` to physical pixel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferenceMap([[u8; COLS]; ROWS]);

impl ReferenceMap {
    /// Creates a map from a table known to be a bijection. In a `const` item
    /// a bad table fails the build.
    ///
    /// # Panics
    /// Panics if an index is out of range or used twice.
    pub const fn checked(table: [[u8; COLS]; ROWS]) -> Self {
        assert!(
            is_bijection(&table),
            "reference map must use every pixel index exactly once"
        );
        Self(table)
    }

    /// Creates a map without checking it. [`ReferenceMap::validate`] reports
    /// the problem later; rendering skips cells that point off the chain.
    pub const fn new_unchecked(table: [[u8; COLS]; ROWS]) -> Self {
        Self(table)
    }

    /// Creates a map, rejecting tables that are not a bijection onto
    /// `0..PIXELS`.
    ///
    /// # Errors
    /// * `InvalidReferenceMap` - An index is out of range or used twice
    pub fn new(table: [[u8; COLS]; ROWS]) -> Result<Self, InitError> {
        let map = Self(table);
        map.validate()?;
        Ok(map)
    }

    /// Checks that every physical index appears exactly once.
    pub fn validate(&self) -> Result<(), InitError> {
        if is_bijection(&self.0) {
            Ok(())
        } else {
            Err(InitError::InvalidReferenceMap)
        }
    }

    /// Physical index of logical cell `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row >= ROWS` or `col >= COLS`.
    #[inline]
    pub const fn index(&self, row: usize, col: usize) -> usize {
        self.0[row][col] as usize
    }

    /// Returns the raw table.
    pub const fn table(&self) -> &[[u8; COLS]; ROWS] {
        &self.0
    }
}

const fn is_bijection(table: &[[u8; COLS]; ROWS]) -> bool {
    let mut seen = [false; PIXELS];
    let mut row = 0;
    while row < ROWS {
        let mut col = 0;
        while col < COLS {
            let index = table[row][col] as usize;
            if index >= PIXELS || seen[index] {
                return false;
            }
            seen[index] = true;
            col += 1;
        }
        row += 1;
    }
    true
}

/// One packed colour per physical LED, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelBuffer([GrbColor; PIXELS]);

impl PixelBuffer {
    /// Creates a buffer with every pixel off.
    pub const fn new() -> Self {
        Self([GrbColor::OFF; PIXELS])
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: GrbColor) {
        self.0 = [color; PIXELS];
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.fill(GrbColor::OFF);
    }

    /// Returns the pixel at physical `index`, if in range.
    pub fn get(&self, index: usize) -> Option<GrbColor> {
        self.0.get(index).copied()
    }

    /// Returns all pixels in chain order.
    pub fn pixels(&self) -> &[GrbColor; PIXELS] {
        &self.0
    }

    /// Writes `frame.color` to the physical pixel of every lit cell. Pixels of
    /// unlit cells are left as they are, and so are cells mapped off the chain.
    pub fn render_frame(&mut self, frame: &Frame, map: &ReferenceMap) {
        for row in 0..ROWS {
            let cells = frame.row_cells(row);
            for (col, lit) in cells.into_iter().enumerate() {
                if !lit {
                    continue;
                }
                if let Some(pixel) = self.0.get_mut(map.index(row, col)) {
                    *pixel = frame.color;
                }
            }
        }
    }

    /// Streams all pixels, in chain order, to `transport`.
    pub fn flush<T: PixelTransport>(&self, transport: &mut T) {
        for &pixel in &self.0 {
            transport.write_pixel(pixel);
        }
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for abstracting the serial pixel link of the matrix.
///
/// Implement this for your LED chain driver (PIO state machine, SPI, bit-bang).
/// Each call pushes one pixel and may block until the link accepts it. Handle
/// any hardware errors internally - this method cannot fail.
pub trait PixelTransport {
    /// Pushes the next pixel of the chain.
    fn write_pixel(&mut self, pixel: GrbColor);
}

/// Rasterizes `frame` into `buffer` through `map`. See [`PixelBuffer::render_frame`].
#[inline]
pub fn render_frame(frame: &Frame, buffer: &mut PixelBuffer, map: &ReferenceMap) {
    buffer.render_frame(frame, map);
}

/// Streams `buffer` to `transport`. See [`PixelBuffer::flush`].
#[inline]
pub fn flush<T: PixelTransport>(buffer: &PixelBuffer, transport: &mut T) {
    buffer.flush(transport);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::color;

    const IDENTITY: ReferenceMap = ReferenceMap::checked([
        [0, 1, 2, 3, 4],
        [5, 6, 7, 8, 9],
        [10, 11, 12, 13, 14],
        [15, 16, 17, 18, 19],
        [20, 21, 22, 23, 24],
    ]);

    #[test]
    fn row_bits_map_to_columns_lsb_first() {
        let frame = Frame::new([0b00001, 0b10000, 0, 0, 0b10101], GrbColor::OFF);

        assert_eq!(frame.row_cells(0), [true, false, false, false, false]);
        assert_eq!(frame.row_cells(1), [false, false, false, false, true]);
        assert_eq!(frame.row_cells(4), [true, false, true, false, true]);
    }

    #[test]
    fn high_bits_of_a_row_are_ignored() {
        let frame = Frame::new([0b1110_0000, 0, 0, 0, 0], color(9, 9, 9));
        let mut buffer = PixelBuffer::new();

        buffer.render_frame(&frame, &IDENTITY);

        assert_eq!(buffer, PixelBuffer::new());
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn lit_cells_go_through_the_map() {
        let map = ReferenceMap::new([
            [24, 23, 22, 21, 20],
            [15, 16, 17, 18, 19],
            [14, 13, 12, 11, 10],
            [5, 6, 7, 8, 9],
            [4, 3, 2, 1, 0],
        ])
        .unwrap();
        let red = color(255, 0, 0);
        let frame = Frame::new([0b00001, 0, 0, 0, 0b10000], red);
        let mut buffer = PixelBuffer::new();

        buffer.render_frame(&frame, &map);

        assert_eq!(buffer.get(24), Some(red));
        assert_eq!(buffer.get(0), Some(red));
        assert_eq!(buffer.pixels().iter().filter(|p| **p == red).count(), 2);
    }

    #[test]
    fn duplicate_index_is_rejected() {
        let mut table = *IDENTITY.table();
        table[4][4] = 0;
        assert_eq!(ReferenceMap::new(table), Err(InitError::InvalidReferenceMap));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut table = *IDENTITY.table();
        table[2][2] = 25;
        assert_eq!(ReferenceMap::new(table), Err(InitError::InvalidReferenceMap));
    }

    #[test]
    #[should_panic(expected = "exactly once")]
    fn checked_map_refuses_a_bad_table() {
        let mut table = *IDENTITY.table();
        table[0][0] = 30;
        let _ = ReferenceMap::checked(table);
    }

    #[test]
    fn off_chain_cells_are_skipped_when_rendering() {
        let mut table = *IDENTITY.table();
        table[2][2] = 25;
        let map = ReferenceMap::new_unchecked(table);
        let mut buffer = PixelBuffer::new();

        buffer.render_frame(&Frame::solid(color(0, 9, 0)), &map);

        assert_eq!(buffer.pixels().iter().filter(|p| **p == color(0, 9, 0)).count(), 24);
        assert_eq!(buffer.get(12), Some(GrbColor::OFF));
    }

    #[test]
    fn solid_frame_lights_everything() {
        let frame = Frame::solid(color(1, 2, 3));
        assert_eq!(frame.lit_count(), 25);
        assert!(frame.is_lit(4, 4));
        assert!(!frame.is_lit(5, 0));
    }
}
