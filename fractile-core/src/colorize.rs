use crate::IterationBuffer;

/// Convert iteration counts to a 4-byte-per-pixel RGBA buffer for
/// rendering on a canvas.
///
/// Per pixel: R = count, G = 0.7 x count (truncated), B = 0, A = 255.
/// Pure and stateless; the engine never calls this itself.
pub fn to_rgba(buffer: &IterationBuffer) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(buffer.len() * 4);

    for &count in buffer.counts() {
        rgba.push(count);
        rgba.push((count as f64 * 0.7) as u8);
        rgba.push(0);
        rgba.push(255);
    }

    rgba
}
