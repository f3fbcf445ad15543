//! Escape-time Mandelbrot computation for one tile.
//!
//! The math here is deliberately plain f64; the interesting part is the
//! cancellation checkpoint wrapping each column.

use crate::cancellation::CancellationChecker;
use fractile_core::{IterationBuffer, Tile, ViewParams};

/// Iteration cap; counts always fit in one byte.
pub const MAX_ITERATIONS: u32 = 255;

/// Squared escape threshold. Comparing |z|^2 avoids a square root per step.
const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Compute iteration counts for every pixel of a tile.
///
/// The checker is consulted once per finished column, not per pixel:
/// cancellation latency is bounded by the time to compute one column. A
/// cancelled tile returns with the columns processed so far filled and the
/// remainder left at zero; the buffer length is always width * height.
pub fn compute_tile<C: CancellationChecker>(
    checker: &C,
    view: &ViewParams,
    tile: &Tile,
) -> IterationBuffer {
    let mut buffer = IterationBuffer::zeroed(tile.width, tile.height);

    for x in 0..tile.width {
        if checker.is_cancelled() {
            // abort tile
            break;
        }

        for y in 0..tile.height {
            let re = -1.5
                + tile.offset_x
                + 2.0 * (tile.x + x) as f64 / (view.zoom * view.canvas_width as f64);
            let im = -1.0
                + tile.offset_y
                + 2.0 * (tile.y + y) as f64 / (view.zoom * view.canvas_height as f64);

            buffer.set(x, y, escape_time(re, im));
        }
    }

    buffer
}

/// Escape-time iteration count for a single point c of the complex plane.
///
/// Iterates z = z^2 + c from z = 0 and counts the steps whose result stays
/// within the escape radius, up to [`MAX_ITERATIONS`].
pub fn escape_time(cx: f64, cy: f64) -> u8 {
    let mut zx = 0.0_f64;
    let mut zy = 0.0_f64;

    let mut i = 0;
    while i < MAX_ITERATIONS {
        // z = z^2 + c
        let next_zx = zx * zx - zy * zy + cx;
        let next_zy = 2.0 * zx * zy + cy;
        zx = next_zx;
        zy = next_zy;

        if zx * zx + zy * zy > ESCAPE_RADIUS_SQ {
            break;
        }
        i += 1;
    }

    i as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::NeverCancel;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Allows a fixed number of checks before reporting cancellation.
    #[derive(Clone)]
    struct CancelAfter {
        remaining: Arc<AtomicU32>,
    }

    impl CancelAfter {
        fn columns(n: u32) -> Self {
            Self {
                remaining: Arc::new(AtomicU32::new(n)),
            }
        }
    }

    impl CancellationChecker for CancelAfter {
        fn is_cancelled(&self) -> bool {
            if self.remaining.load(Ordering::Relaxed) == 0 {
                true
            } else {
                self.remaining.fetch_sub(1, Ordering::Relaxed);
                false
            }
        }
    }

    #[test]
    fn origin_is_in_set() {
        assert_eq!(escape_time(0.0, 0.0), 255);
    }

    #[test]
    fn main_cardioid_point_is_in_set() {
        assert_eq!(escape_time(-0.5, 0.0), 255);
    }

    #[test]
    fn point_far_outside_escapes_immediately() {
        // |c|^2 = 100 > 4, so the very first z = c already escaped
        assert_eq!(escape_time(10.0, 0.0), 0);
    }

    #[test]
    fn point_outside_escapes_quickly() {
        // z1 = 2, z2 = 6: |z2|^2 > 4 after one surviving step
        assert_eq!(escape_time(2.0, 0.0), 1);
    }

    #[test]
    fn boundary_point_takes_many_iterations() {
        let count = escape_time(-0.75, 0.1);
        assert!(count > 10, "boundary point should survive many steps");
        assert!(count < 255, "but it does escape eventually");
    }

    #[test]
    fn full_tile_matches_hand_computed_counts() {
        // 2x2 canvas at zoom 1, whole canvas as one tile. The four plane
        // points are (-1.5, -1), (-0.5, -1), (-1.5, 0), (-0.5, 0); the
        // first two escape after 1 and 3 surviving steps, the second row
        // lies inside the set.
        let view = ViewParams::new(2, 2, 1.0);
        let tile = Tile::new(0, 0, 2, 2);

        let buffer = compute_tile(&NeverCancel, &view, &tile);

        assert_eq!(buffer.counts(), &[1, 3, 255, 255]);
    }

    #[test]
    fn tile_position_shifts_the_sampled_points() {
        // The right half of a 4x2 canvas computed as its own tile must
        // match the corresponding pixels of the full-canvas computation.
        let view = ViewParams::new(4, 2, 1.0);
        let full = compute_tile(&NeverCancel, &view, &Tile::new(0, 0, 4, 2));
        let right = compute_tile(&NeverCancel, &view, &Tile::new(2, 0, 2, 2));

        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(right.get(x, y), full.get(x + 2, y));
            }
        }
    }

    #[test]
    fn cancelled_tile_keeps_computed_column_prefix() {
        let view = ViewParams::new(4, 4, 1.0);
        let tile = Tile::new(0, 0, 4, 4);

        let full = compute_tile(&NeverCancel, &view, &tile);
        let aborted = compute_tile(&CancelAfter::columns(1), &view, &tile);

        assert_eq!(aborted.len(), full.len());
        for y in 0..4 {
            assert_eq!(aborted.get(0, y), full.get(0, y), "first column computed");
            for x in 1..4 {
                assert_eq!(aborted.get(x, y), 0, "remaining columns left at zero");
            }
        }
    }

    #[test]
    fn already_cancelled_tile_is_all_zeros() {
        let view = ViewParams::new(4, 4, 1.0);
        let tile = Tile::new(0, 0, 4, 4);

        let buffer = compute_tile(&CancelAfter::columns(0), &view, &tile);

        assert_eq!(buffer.len(), 16);
        assert!(buffer.counts().iter().all(|&c| c == 0));
    }
}
