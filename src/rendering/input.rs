use std::io::Cursor;

use bead_quant::PixelBuffer;

use crate::error::RenderError;

/// Decode a PNG into an RGBA8 pixel buffer.
///
/// Indexed, greyscale and 16-bit images are expanded to 8-bit RGBA;
/// images without alpha get an opaque alpha channel.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedFormat(format!(
            "{:?} bit depth after expansion",
            info.bit_depth
        )));
    }

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        other => {
            return Err(RenderError::UnsupportedFormat(format!("{other:?}")));
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    Ok(PixelBuffer::new(rgba, info.width, info.height)?)
}

/// Output size for fitting `src` into `target`.
///
/// With `maintain_aspect` the result fits inside the target box keeping the
/// source aspect ratio; otherwise it is exactly the target size.
pub fn fit_dimensions(
    src: (u32, u32),
    target: (u32, u32),
    maintain_aspect: bool,
) -> Result<(u32, u32), RenderError> {
    let (src_w, src_h) = src;
    let (target_w, target_h) = target;
    if target_w == 0 || target_h == 0 {
        return Err(RenderError::InvalidDimensions {
            width: target_w,
            height: target_h,
        });
    }
    if src_w == 0 || src_h == 0 {
        return Err(RenderError::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }
    if !maintain_aspect {
        return Ok((target_w, target_h));
    }

    let aspect = src_w as f64 / src_h as f64;
    let (w, h) = if target_w as f64 / target_h as f64 > aspect {
        ((target_h as f64 * aspect).round() as u32, target_h)
    } else {
        (target_w, (target_w as f64 / aspect).round() as u32)
    };
    Ok((w.max(1), h.max(1)))
}

/// Nearest-neighbour resize to fit `target_w x target_h`.
pub fn resize_nearest(
    src: &PixelBuffer,
    target_w: u32,
    target_h: u32,
    maintain_aspect: bool,
) -> Result<PixelBuffer, RenderError> {
    let (src_w, src_h) = (src.width(), src.height());
    let (w, h) = fit_dimensions((src_w, src_h), (target_w, target_h), maintain_aspect)?;
    if (w, h) == (src_w, src_h) {
        return Ok(src.clone());
    }

    let data = src.data();
    let mut out = Vec::with_capacity(w as usize * h as usize * 4);
    for y in 0..h {
        // Sample at pixel centres
        let sy = (((y as f64 + 0.5) * src_h as f64 / h as f64) as u32).min(src_h - 1);
        for x in 0..w {
            let sx = (((x as f64 + 0.5) * src_w as f64 / w as f64) as u32).min(src_w - 1);
            let i = (sy as usize * src_w as usize + sx as usize) * 4;
            out.extend_from_slice(&data[i..i + 4]);
        }
    }

    tracing::debug!(src_w, src_h, width = w, height = h, "Resized image");
    Ok(PixelBuffer::new(out, w, h)?)
}
