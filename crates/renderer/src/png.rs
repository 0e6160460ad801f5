//! PNG encoding for the RGBA raster (color type 6).

use std::io::Write;

use crate::interpolate::{Raster, RenderError};

/// Encode a raster as an RGBA PNG.
pub fn encode(raster: &Raster) -> Result<Vec<u8>, RenderError> {
    let width = raster.width as usize;
    let height = raster.height as usize;
    if raster.pixels.len() != width * height * 4 {
        return Err(RenderError::Encode(format!(
            "pixel buffer is {} bytes, expected {} for {}x{}",
            raster.pixels.len(),
            width * height * 4,
            width,
            height
        )));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&raster.width.to_be_bytes());
    ihdr_data.extend_from_slice(&raster.height.to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat(&raster.pixels, width, height)
        .map_err(|e| RenderError::Encode(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let crc_data = [chunk_type.as_slice(), data].concat();
    png.extend_from_slice(&crc32fast::hash(&crc_data).to_be_bytes());
}

/// Deflate RGBA scanlines for the IDAT chunk, filter type 0 per row.
fn deflate_idat(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + width * 4));
    for y in 0..height {
        uncompressed.push(0); // filter type: none
        let row_start = y * width * 4;
        uncompressed.extend_from_slice(&pixels[row_start..row_start + width * 4]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
