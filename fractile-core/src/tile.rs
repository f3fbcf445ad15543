use serde::{Deserialize, Serialize};

/// Rectangular sub-window of the computed plane (always u32 pixel coordinates),
/// plus a pixel-space pan offset into the logical viewport.
///
/// A tile is immutable once submitted; workers only ever read it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Tile {
    /// Create a tile with no viewport offset
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Create a tile panned by an additional pixel-space offset
    pub fn with_offset(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        offset_x: f64,
        offset_y: f64,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            offset_x,
            offset_y,
        }
    }

    /// Calculate area in pixels
    pub fn area(&self) -> u32 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_has_zero_offsets() {
        let tile = Tile::new(10, 20, 100, 50);

        assert_eq!(tile.x, 10);
        assert_eq!(tile.y, 20);
        assert_eq!(tile.width, 100);
        assert_eq!(tile.height, 50);
        assert_eq!(tile.offset_x, 0.0);
        assert_eq!(tile.offset_y, 0.0);
    }

    #[test]
    fn with_offset_stores_pan_offsets() {
        let tile = Tile::with_offset(0, 0, 64, 64, 0.25, -1.5);

        assert_eq!(tile.offset_x, 0.25);
        assert_eq!(tile.offset_y, -1.5);
    }

    #[test]
    fn area_is_width_times_height() {
        let tile = Tile::new(0, 0, 1920, 1080);

        assert_eq!(tile.area(), 1920 * 1080);
    }

    #[test]
    fn serialization_roundtrip() {
        let original = Tile::with_offset(100, 200, 640, 480, 0.5, 0.125);

        let json = serde_json::to_string(&original).unwrap();
        let restored: Tile = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }
}
