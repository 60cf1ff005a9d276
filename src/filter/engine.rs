use rayon::prelude::*;

use crate::{filter::FilterKind, frame::PixelBuffer};

// Sepia color-mix coefficients, rows are output R/G/B over input (r, g, b)
const SEPIA_R: [f32; 3] = [0.393, 0.769, 0.189];
const SEPIA_G: [f32; 3] = [0.349, 0.686, 0.168];
const SEPIA_B: [f32; 3] = [0.272, 0.534, 0.131];

/// Apply a filter to a pixel buffer, returning a new buffer
///
/// This is a pure function: the output depends only on the input buffer and
/// the filter, the input is never mutated, and dimensions are preserved. It
/// runs to completion synchronously and is safe to call from multiple
/// threads on independent buffers. An empty buffer passes through as an
/// empty buffer.
pub fn apply(frame: &PixelBuffer, kind: FilterKind) -> PixelBuffer {
    match kind {
        FilterKind::None => frame.clone(),
        FilterKind::Grayscale => map_pixels(frame, grayscale),
        FilterKind::Sepia => map_pixels(frame, sepia),
        FilterKind::Negative => map_pixels(frame, negative),
    }
}

/// Run a per-pixel transform over every pixel in parallel
///
/// Every output channel is clamped into `[0.0, 1.0]`, whatever the transform
/// or the input produced.
fn map_pixels<F>(frame: &PixelBuffer, transform: F) -> PixelBuffer
where
    F: Fn(f32, f32, f32) -> [f32; 3] + Sync,
{
    let mut out = frame.clone();
    out.samples_mut()
        .par_chunks_exact_mut(3)
        .for_each(|pixel| {
            let [r, g, b] = transform(pixel[0], pixel[1], pixel[2]);
            pixel[0] = r.clamp(0.0, 1.0);
            pixel[1] = g.clamp(0.0, 1.0);
            pixel[2] = b.clamp(0.0, 1.0);
        });
    out
}

fn grayscale(r: f32, g: f32, b: f32) -> [f32; 3] {
    let gray = (r + g + b) / 3.0;
    [gray, gray, gray]
}

fn sepia(r: f32, g: f32, b: f32) -> [f32; 3] {
    [
        SEPIA_R[0] * r + SEPIA_R[1] * g + SEPIA_R[2] * b,
        SEPIA_G[0] * r + SEPIA_G[1] * g + SEPIA_G[2] * b,
        SEPIA_B[0] * r + SEPIA_B[1] * g + SEPIA_B[2] * b,
    ]
}

fn negative(r: f32, g: f32, b: f32) -> [f32; 3] {
    [1.0 - r, 1.0 - g, 1.0 - b]
}
