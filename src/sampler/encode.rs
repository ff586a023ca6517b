use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb};
use thiserror::Error;

use crate::camera::feed::Frame;

/// Per-tick render/encode failures. Recovered locally: the tick's frame is
/// simply not sent and the timer keeps running.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("invalid frame buffer ({width}x{height}, {len} bytes)")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    #[error("resize failed: {0}")]
    Resize(String),

    #[error("JPEG encoding failed: {0}")]
    Encode(String),
}

/// Rasterize a frame to the fixed target size and encode it as a
/// base64 JPEG data URI, ready for the outbound envelope.
pub fn encode_frame(
    frame: &Frame,
    width: u32,
    height: u32,
    quality: u8,
) -> Result<String, SampleError> {
    let rgb = if frame.width == width && frame.height == height {
        frame.data.clone()
    } else {
        resize_rgb(&frame.data, frame.width, frame.height, width, height)?
    };

    let jpeg = compress_jpeg(rgb, width, height, quality)?;
    Ok(format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&jpeg)
    ))
}

/// Compress raw RGB pixel data to JPEG at the given quality (1-100).
fn compress_jpeg(data: Vec<u8>, width: u32, height: u32, quality: u8) -> Result<Vec<u8>, SampleError> {
    let len = data.len();
    let img: ImageBuffer<Rgb<u8>, _> = ImageBuffer::from_raw(width, height, data)
        .ok_or(SampleError::InvalidBuffer { width, height, len })?;

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)
        .map_err(|e| SampleError::Encode(e.to_string()))?;
    Ok(buf)
}

/// SIMD-accelerated RGB resize to the target raster.
fn resize_rgb(
    data: &[u8],
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
) -> Result<Vec<u8>, SampleError> {
    use fast_image_resize as fr;
    use fr::images::Image;

    let src_image = Image::from_vec_u8(src_width, src_height, data.to_vec(), fr::PixelType::U8x3)
        .map_err(|e| SampleError::Resize(e.to_string()))?;

    let mut dst_image = Image::new(dst_width, dst_height, fr::PixelType::U8x3);

    let mut resizer = fr::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, None)
        .map_err(|e| SampleError::Resize(e.to_string()))?;

    Ok(dst_image.into_vec())
}
