use serde::{Deserialize, Serialize};

/// Global view parameters shared by every tile of one render pass.
///
/// Not versioned itself: a caller submits it alongside each tile, logically
/// tied to the generation that was current at submission time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub zoom: f64,
}

impl ViewParams {
    pub fn new(canvas_width: u32, canvas_height: u32, zoom: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            zoom,
        }
    }
}
