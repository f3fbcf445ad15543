use crate::Tile;

/// Generate tiles covering the canvas, sorted by distance from center.
///
/// Edge tiles are clipped so the grid covers the canvas exactly.
/// Center-out ordering lets a consumer render the most important part of
/// the image first.
pub fn tile_grid(canvas_width: u32, canvas_height: u32, tile_size: u32) -> Vec<Tile> {
    let mut tiles = Vec::new();

    for y_start in (0..canvas_height).step_by(tile_size as usize) {
        for x_start in (0..canvas_width).step_by(tile_size as usize) {
            let w = tile_size.min(canvas_width - x_start);
            let h = tile_size.min(canvas_height - y_start);
            tiles.push(Tile::new(x_start, y_start, w, h));
        }
    }

    let center_x = canvas_width as f64 / 2.0;
    let center_y = canvas_height as f64 / 2.0;

    tiles.sort_by(|a, b| {
        let a_center_x = a.x as f64 + a.width as f64 / 2.0;
        let a_center_y = a.y as f64 + a.height as f64 / 2.0;
        let a_dist_sq = (a_center_x - center_x).powi(2) + (a_center_y - center_y).powi(2);

        let b_center_x = b.x as f64 + b.width as f64 / 2.0;
        let b_center_y = b.y as f64 + b.height as f64 / 2.0;
        let b_dist_sq = (b_center_x - center_x).powi(2) + (b_center_y - center_y).powi(2);

        a_dist_sq
            .partial_cmp(&b_dist_sq)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tiles
}
