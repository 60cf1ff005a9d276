use image::{Rgb, Rgb32FImage, RgbImage};

/// A rectangular grid of normalized RGB color samples
///
/// Each channel is an `f32` in `[0.0, 1.0]`. This is a thin wrapper around an
/// `image` float buffer that provides the accessors the filter engine and the
/// encoder need. Dimensions are fixed for the lifetime of the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    buffer: Rgb32FImage,
}

impl PixelBuffer {
    /// Create a pixel buffer from a normalized float image buffer
    pub fn new(buffer: Rgb32FImage) -> Self {
        Self { buffer }
    }

    /// Create a buffer of the given dimensions filled with black
    pub fn new_black(width: u32, height: u32) -> Self {
        Self {
            buffer: Rgb32FImage::new(width, height),
        }
    }

    /// Create a buffer of the given dimensions filled with the specified color
    ///
    /// Channels are clamped into `[0.0, 1.0]`.
    pub fn new_filled(width: u32, height: u32, color: [f32; 3]) -> Self {
        let color = clamp_channels(color);
        let buffer = Rgb32FImage::from_pixel(width, height, Rgb(color));
        Self { buffer }
    }

    /// Get the width of the buffer
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the buffer
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Number of pixels in the buffer
    pub fn pixel_count(&self) -> usize {
        self.buffer.width() as usize * self.buffer.height() as usize
    }

    /// Check whether the buffer contains no pixels
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [f32; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Set a pixel at the given coordinates, clamping channels into range
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [f32; 3]) {
        self.buffer.put_pixel(x, y, Rgb(clamp_channels(color)));
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &Rgb32FImage {
        &self.buffer
    }

    /// Flat view over all channel samples in row-major RGB order
    pub fn samples(&self) -> &[f32] {
        &self.buffer
    }

    /// Mutable flat view over all channel samples
    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.buffer
    }

    /// Convert an 8-bit RGB image into a normalized buffer
    pub fn from_rgb8(image: &RgbImage) -> Self {
        let buffer = Rgb32FImage::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb([
                f32::from(pixel[0]) / 255.0,
                f32::from(pixel[1]) / 255.0,
                f32::from(pixel[2]) / 255.0,
            ])
        });
        Self { buffer }
    }

    /// Convert the buffer to an 8-bit RGB image
    ///
    /// Out-of-range samples are clamped before quantization.
    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.buffer.width(), self.buffer.height(), |x, y| {
            let pixel = self.buffer.get_pixel(x, y);
            Rgb([
                quantize(pixel[0]),
                quantize(pixel[1]),
                quantize(pixel[2]),
            ])
        })
    }
}

fn clamp_channels(color: [f32; 3]) -> [f32; 3] {
    [
        color[0].clamp(0.0, 1.0),
        color[1].clamp(0.0, 1.0),
        color[2].clamp(0.0, 1.0),
    ]
}

fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_buffer_reports_dimensions_and_color() {
        let buffer = PixelBuffer::new_filled(4, 3, [1.0, 0.5, 0.0]);

        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.pixel_count(), 12);
        assert_eq!(buffer.get_pixel(3, 2), [1.0, 0.5, 0.0]);
    }

    #[test]
    fn set_pixel_clamps_out_of_range_channels() {
        let mut buffer = PixelBuffer::new_black(2, 2);
        buffer.set_pixel(0, 0, [1.5, -0.25, 0.5]);

        assert_eq!(buffer.get_pixel(0, 0), [1.0, 0.0, 0.5]);
    }

    #[test]
    fn empty_buffer_has_no_pixels() {
        let buffer = PixelBuffer::new_black(0, 0);

        assert!(buffer.is_empty());
        assert!(buffer.samples().is_empty());
    }

    #[test]
    fn rgb8_roundtrip_preserves_pixels() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));
        image.put_pixel(1, 1, Rgb([17, 128, 240]));

        let buffer = PixelBuffer::from_rgb8(&image);
        assert_eq!(buffer.get_pixel(0, 0), [1.0, 0.0, 0.0]);

        assert_eq!(buffer.to_rgb8(), image);
    }
}
