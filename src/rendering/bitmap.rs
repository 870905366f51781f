//! Software rendering of a field into an RGBA8 bitmap.
//!
//! The gridded background only depends on the field size and the cell size,
//! so it is drawn once per [`FieldKey`] and kept in a [`FieldCache`] owned by
//! the caller. Each frame clones the background and fills the live squares.

use std::collections::HashMap;

use rayon::prelude::*;
use thiserror::Error;

use crate::domain::CellField;

pub type Rgba = [u8; 4];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cell size must be at least one pixel")]
    ZeroCellSize,

    #[error("bitmap {width}x{height} is too large for a texture")]
    TooLarge { width: usize, height: usize },
}

/// Colors used for the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba,
    pub grid_line: Rgba,
    pub live: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [15, 15, 15, 255],
            grid_line: [40, 40, 40, 255],
            live: [0, 255, 150, 255],
        }
    }
}

/// Row-major RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: fill.repeat(width * height),
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[i..i + 4]);
        Some(rgba)
    }

    fn put(&mut self, x: usize, y: usize, color: Rgba) {
        let i = (y * self.width + x) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color);
    }

    fn stride(&self) -> usize {
        self.width * 4
    }
}

/// Identifies a cached background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub width: usize,
    pub height: usize,
    pub cell_px: usize,
}

/// Pre-drawn backgrounds for one palette, keyed by field geometry.
pub struct FieldCache {
    palette: Palette,
    backgrounds: HashMap<FieldKey, Bitmap>,
}

impl FieldCache {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            backgrounds: HashMap::new(),
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn len(&self) -> usize {
        self.backgrounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backgrounds.is_empty()
    }

    pub fn clear(&mut self) {
        self.backgrounds.clear();
    }

    fn background(&mut self, key: FieldKey) -> &Bitmap {
        let palette = self.palette;
        self.backgrounds
            .entry(key)
            .or_insert_with(|| draw_background(key, palette))
    }
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// Background fill plus a line at every cell boundary, including the closing
/// right and bottom edges.
fn draw_background(key: FieldKey, palette: Palette) -> Bitmap {
    let width = key.width * key.cell_px;
    let height = key.height * key.cell_px;
    let mut bitmap = Bitmap::new(width, height, palette.background);
    if width == 0 || height == 0 {
        return bitmap;
    }

    for y in 0..height {
        for x in (0..width).step_by(key.cell_px) {
            bitmap.put(x, y, palette.grid_line);
        }
        bitmap.put(width - 1, y, palette.grid_line);
    }
    for x in 0..width {
        for y in (0..height).step_by(key.cell_px) {
            bitmap.put(x, y, palette.grid_line);
        }
        bitmap.put(x, height - 1, palette.grid_line);
    }
    bitmap
}

/// Render `field` with square cells of `cell_px` pixels, in the colors of
/// the cache's palette.
///
/// Cell rows are painted in parallel; the field is only read.
pub fn paint_field<F: CellField + Sync>(
    field: &F,
    cell_px: usize,
    cache: &mut FieldCache,
) -> Result<Bitmap, RenderError> {
    if cell_px == 0 {
        return Err(RenderError::ZeroCellSize);
    }
    let key = FieldKey {
        width: field.width(),
        height: field.height(),
        cell_px,
    };
    let mut bitmap = cache.background(key).clone();
    if key.width == 0 || key.height == 0 {
        return Ok(bitmap);
    }
    let square = cache.palette().live.repeat(cell_px);
    let stride = bitmap.stride();

    bitmap
        .pixels
        .par_chunks_mut(stride * cell_px)
        .enumerate()
        .for_each(|(cy, band)| {
            for cx in 0..key.width {
                if !matches!(field.is_alive(cx, cy), Ok(true)) {
                    continue;
                }
                let start = cx * cell_px * 4;
                for line in band.chunks_mut(stride) {
                    line[start..start + square.len()].copy_from_slice(&square);
                }
            }
        });

    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EngineError, LifeEngine};

    const LIVE: Rgba = [0, 0, 0, 255];
    const LINE: Rgba = [255, 0, 0, 255];
    const BACK: Rgba = [255, 255, 255, 255];

    fn palette() -> Palette {
        Palette {
            background: BACK,
            grid_line: LINE,
            live: LIVE,
        }
    }

    /// Checkerboard stand-in for the engine.
    struct Checker;

    impl CellField for Checker {
        fn width(&self) -> usize {
            4
        }
        fn height(&self) -> usize {
            3
        }
        fn is_alive(&self, x: usize, y: usize) -> Result<bool, EngineError> {
            Ok((x + y) % 2 == 0)
        }
    }

    #[test]
    fn test_bitmap_size_follows_cell_size() {
        let mut cache = FieldCache::new(palette());
        let bitmap = paint_field(&Checker, 5, &mut cache).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (20, 15));
        assert_eq!(bitmap.pixels.len(), 20 * 15 * 4);
    }

    #[test]
    fn test_live_squares_are_filled() {
        let mut cache = FieldCache::new(palette());
        let bitmap = paint_field(&Checker, 5, &mut cache).unwrap();
        // (0, 0) alive, (1, 0) dead
        assert_eq!(bitmap.pixel(2, 2), Some(LIVE));
        assert_eq!(bitmap.pixel(7, 2), Some(BACK));
        // Live squares cover their grid lines
        assert_eq!(bitmap.pixel(0, 0), Some(LIVE));
        assert_eq!(bitmap.pixel(5, 0), Some(LINE));
        // (3, 2) is dead; closing edges are drawn
        assert_eq!(bitmap.pixel(19, 14), Some(LINE));
    }

    #[test]
    fn test_background_is_cached_per_geometry() {
        let mut cache = FieldCache::new(palette());
        paint_field(&Checker, 5, &mut cache).unwrap();
        paint_field(&Checker, 5, &mut cache).unwrap();
        assert_eq!(cache.len(), 1);
        paint_field(&Checker, 6, &mut cache).unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let mut cache = FieldCache::new(palette());
        assert_eq!(
            paint_field(&Checker, 0, &mut cache),
            Err(RenderError::ZeroCellSize)
        );
    }

    /// A field with no columns.
    struct Empty;

    impl CellField for Empty {
        fn width(&self) -> usize {
            0
        }
        fn height(&self) -> usize {
            3
        }
        fn is_alive(&self, _x: usize, _y: usize) -> Result<bool, EngineError> {
            Ok(true)
        }
    }

    #[test]
    fn test_empty_field_paints_empty_bitmap() {
        let mut cache = FieldCache::new(palette());
        let bitmap = paint_field(&Empty, 4, &mut cache).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (0, 12));
        assert!(bitmap.pixels.is_empty());
    }

    #[test]
    fn test_paints_engine_state() {
        let mut engine = LifeEngine::new(3, 3).unwrap();
        engine.revive(2, 1).unwrap();
        let mut cache = FieldCache::new(palette());
        let bitmap = paint_field(&engine, 4, &mut cache).unwrap();
        assert_eq!(bitmap.pixel(9, 5), Some(LIVE));
        assert_eq!(bitmap.pixel(1, 1), Some(BACK));
        assert_eq!(engine.population(), 1);
    }
}
