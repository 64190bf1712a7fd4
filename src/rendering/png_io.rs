//! PNG decode of input images and encode of swatch / preview output.

use std::io::Cursor;
use std::path::Path;

use paint_quantize::{Rgb, RgbImage};

use crate::error::ImageIoError;

/// Decode PNG bytes into an RGB image.
///
/// Palette and low bit-depth images are expanded and 16-bit channels are
/// stripped to 8 bits. Alpha is dropped, not composited.
pub fn decode_png(bytes: &[u8]) -> Result<RgbImage, ImageIoError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageIoError::UnsupportedFormat {
            color: info.color_type,
            depth: info.bit_depth,
        });
    }

    let pixels: Vec<Rgb> = match info.color_type {
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| Rgb::new(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|p| Rgb::new(p[0], p[0], p[0]))
            .collect(),
        color => {
            return Err(ImageIoError::UnsupportedFormat {
                color,
                depth: info.bit_depth,
            })
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        "Decoded PNG"
    );
    Ok(RgbImage::new(
        info.width as usize,
        info.height as usize,
        pixels,
    )?)
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<RgbImage, ImageIoError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Encode packed `[R, G, B, ...]` bytes as an 8-bit RGB PNG.
pub fn encode_rgb_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, ImageIoError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgb)?;
    }
    Ok(buf.into_inner())
}

/// Encode and write an RGB PNG, creating parent directories.
pub fn write_rgb_png(path: &Path, width: u32, height: u32, rgb: &[u8]) -> Result<(), ImageIoError> {
    let png_bytes = encode_rgb_png(width, height, rgb)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, png_bytes)?;
    Ok(())
}
