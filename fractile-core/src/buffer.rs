use serde::{Deserialize, Serialize};

/// Escape iteration counts for one tile, row-major, one byte per pixel.
///
/// The backing vector always has length `width * height`. A computation
/// that stops early leaves the unwritten samples at the default zero,
/// meaning "not computed"; consumers cannot tell a zero-iteration escape
/// from an unwritten sample, and do not need to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationBuffer {
    width: u32,
    height: u32,
    counts: Vec<u8>,
}

impl IterationBuffer {
    /// Create a buffer for a width x height tile with every sample at zero
    pub fn zeroed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            counts: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples, always width * height
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.counts[y as usize * self.width as usize + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, count: u8) {
        debug_assert!(x < self.width && y < self.height);
        self.counts[y as usize * self.width as usize + x as usize] = count;
    }

    /// Raw row-major samples
    pub fn counts(&self) -> &[u8] {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_buffer_has_tile_area_length() {
        let buffer = IterationBuffer::zeroed(128, 64);

        assert_eq!(buffer.len(), 128 * 64);
        assert!(buffer.counts().iter().all(|&c| c == 0));
    }

    #[test]
    fn zeroed_handles_empty_tiles() {
        let buffer = IterationBuffer::zeroed(0, 64);

        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn set_and_get_are_row_major() {
        let mut buffer = IterationBuffer::zeroed(4, 2);

        buffer.set(1, 0, 7);
        buffer.set(0, 1, 9);

        assert_eq!(buffer.get(1, 0), 7);
        assert_eq!(buffer.get(0, 1), 9);
        // Row-major: (1, 0) is index 1, (0, 1) is index 4
        assert_eq!(buffer.counts()[1], 7);
        assert_eq!(buffer.counts()[4], 9);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut original = IterationBuffer::zeroed(3, 3);
        original.set(2, 2, 255);

        let json = serde_json::to_string(&original).unwrap();
        let restored: IterationBuffer = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }
}
