// Scenario rendering library for the draw2d demonstration tool.
//
// Provides the RGBA canvas the scenarios draw into and PNG output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;

// ============================================================================
// Pixel Buffer
// ============================================================================

/// An RGBA pixel buffer with dimensions.
#[derive(Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, row-major, top-to-bottom. Length = width * height * 4.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width * height * 4) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

// ============================================================================
// PNG output
// ============================================================================

/// Encode `buf` as an 8-bit RGBA PNG at `path`.
pub fn save_png(path: &Path, buf: &PixelBuffer) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), buf.width, buf.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .with_context(|| format!("writing PNG header to {}", path.display()))?;
    writer
        .write_image_data(&buf.data)
        .with_context(|| format!("writing PNG data to {}", path.display()))?;
    writer.finish()?;
    Ok(())
}

// ============================================================================
// Scenario rendering (re-exported from render module)
// ============================================================================

pub mod render;
