// File: crates/chartframe/src/surface.rs
// Summary: Pixel-buffer drawing surface wrapped as a Skia raster canvas per render pass.

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::error::{ChartError, ChartResult};

/// RGBA8888 premultiplied pixel buffer owned by one chart.
///
/// The Skia canvas is borrowed from the buffer for the duration of a
/// [`ChartSurface::with_canvas`] call, so regions bound to it cannot outlive
/// the pass.
#[derive(Clone, Debug)]
pub struct ChartSurface {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
}

impl ChartSurface {
    /// Largest accepted edge, in pixels.
    pub const MAX_DIMENSION: i32 = 16_384;

    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        check_size(width, height)?;
        Ok(Self { width, height, pixels: vec![0; buffer_len(width, height)] })
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    /// A zero-sized surface exists but cannot be drawn on.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Resize, discarding the current contents.
    pub fn resize(&mut self, width: i32, height: i32) -> ChartResult<()> {
        check_size(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels = vec![0; buffer_len(width, height)];
        Ok(())
    }

    fn info(&self) -> skia::ImageInfo {
        skia::ImageInfo::new(
            (self.width, self.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Premul,
            None,
        )
    }

    fn row_bytes(&self) -> usize {
        self.width.max(0) as usize * 4
    }

    /// Draw on the buffer through a Skia canvas.
    pub fn with_canvas<R>(&mut self, f: impl FnOnce(&skia::Canvas) -> R) -> ChartResult<R> {
        if !self.is_drawable() {
            return Err(ChartError::SurfaceUnavailable(format!(
                "zero-sized surface {}x{}",
                self.width, self.height
            )));
        }
        let info = self.info();
        let row_bytes = self.row_bytes();
        let mut surface = skia::surfaces::wrap_pixels(&info, &mut self.pixels, row_bytes, None)
            .ok_or_else(|| ChartError::SurfaceUnavailable("failed to wrap raster pixels".into()))?;
        Ok(f(surface.canvas()))
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Raw premultiplied RGBA rows, `width * 4` bytes each.
    pub fn rgba8(&self) -> &[u8] {
        &self.pixels
    }

    /// Encode the current contents as PNG.
    pub fn to_png(&self) -> ChartResult<Vec<u8>> {
        if !self.is_drawable() {
            return Err(ChartError::SurfaceUnavailable("nothing to encode".into()));
        }
        let data = skia::Data::new_copy(&self.pixels);
        let image = skia::images::raster_from_data(&self.info(), data, self.row_bytes())
            .ok_or(ChartError::Encode("raster image"))?;
        #[allow(deprecated)]
        let png = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(ChartError::Encode("PNG"))?;
        Ok(png.as_bytes().to_vec())
    }

    /// Write the current contents to `path` as PNG, creating parent directories.
    pub fn write_png(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_png()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

fn check_size(width: i32, height: i32) -> ChartResult<()> {
    if width < 0 || height < 0 || width > ChartSurface::MAX_DIMENSION || height > ChartSurface::MAX_DIMENSION {
        return Err(ChartError::SurfaceUnavailable(format!("invalid surface size {width}x{height}")));
    }
    Ok(())
}

fn buffer_len(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize * 4
}
