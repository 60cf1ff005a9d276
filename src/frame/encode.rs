use crate::{
    error::{EncodeError, Result},
    frame::PixelBuffer,
};

/// Encode a pixel buffer into lossless PNG bytes
///
/// The encoder settings are pinned, so the same buffer always produces
/// bit-identical output. Samples are quantized to 8-bit RGB; decoding the
/// result reproduces the buffer within that quantization.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::EmptyBuffer { width, height }.into());
    }

    let rgb = buffer.to_rgb8();
    let mut bytes = Vec::new();

    let mut encoder = png::Encoder::new(&mut bytes, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);
    encoder.set_filter(png::FilterType::Sub);

    let mut writer = encoder.write_header().map_err(encode_failed)?;
    writer.write_image_data(rgb.as_raw()).map_err(encode_failed)?;
    writer.finish().map_err(encode_failed)?;

    Ok(bytes)
}

fn encode_failed(error: png::EncodingError) -> EncodeError {
    EncodeError::EncodingFailed {
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoothError;

    #[test]
    fn encoding_is_deterministic() {
        let buffer = PixelBuffer::new_filled(16, 9, [0.2, 0.6, 0.9]);

        let first = encode_png(&buffer).unwrap();
        let second = encode_png(&buffer).unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn encoded_bytes_decode_to_the_same_pixels() {
        let mut buffer = PixelBuffer::new_filled(3, 2, [1.0, 0.0, 0.0]);
        buffer.set_pixel(1, 1, [0.25, 0.5, 0.75]);

        let bytes = encode_png(&buffer).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();

        assert_eq!(decoded, buffer.to_rgb8());
    }

    #[test]
    fn empty_buffer_is_rejected() {
        let buffer = PixelBuffer::new_black(0, 0);

        let err = encode_png(&buffer).unwrap_err();
        assert!(matches!(
            err,
            BoothError::Encode(EncodeError::EmptyBuffer { width: 0, height: 0 })
        ));
    }
}
