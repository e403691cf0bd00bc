use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use ising_sim::SpinGrid;
use tracing::info;

const SEPARATOR: Rgb<u8> = Rgb([128, 128, 128]);

/// Anything that can turn a finished grid into a view for a human.
pub trait Renderer {
    /// Render `grid` under the display label `label` and return where it went.
    fn render(&self, grid: &SpinGrid, label: &str) -> Result<PathBuf>;
}

/// Spin → colour mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub down: Rgb<u8>,
    pub up: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            down: Rgb([0, 0, 0]),
            up: Rgb([255, 255, 255]),
        }
    }
}

impl Palette {
    #[inline]
    pub fn color(&self, spin: i8) -> Rgb<u8> {
        if spin < 0 {
            self.down
        } else {
            self.up
        }
    }
}

/// Writes two-colour PNG rasters into a directory.
///
/// Each spin becomes a `scale x scale` block. Below the lattice sits a legend
/// band, separated by a grey line: the left half shows the colour of −1, the
/// right half the colour of +1.
pub struct PngRenderer {
    out_dir: PathBuf,
    scale: u32,
    palette: Palette,
}

impl PngRenderer {
    pub fn new(out_dir: impl AsRef<Path>, scale: u32) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            scale: scale.max(1),
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    fn legend_height(&self, side: u32) -> u32 {
        (side / 10).max(4)
    }

    /// Rasterize `grid` with its legend band.
    pub fn raster(&self, grid: &SpinGrid) -> Result<RgbImage> {
        let side = u32::try_from(grid.size())
            .ok()
            .and_then(|n| n.checked_mul(self.scale))
            .context("lattice too large to rasterize")?;
        let legend = self.legend_height(side);
        let mut img = RgbImage::new(side, side + 1 + legend);

        for (row, spins) in grid.rows().enumerate() {
            for (col, &spin) in spins.iter().enumerate() {
                let color = self.palette.color(spin);
                let (x0, y0) = (col as u32 * self.scale, row as u32 * self.scale);
                for dy in 0..self.scale {
                    for dx in 0..self.scale {
                        img.put_pixel(x0 + dx, y0 + dy, color);
                    }
                }
            }
        }

        for x in 0..side {
            img.put_pixel(x, side, SEPARATOR);
            let swatch = if x < side / 2 {
                self.palette.down
            } else {
                self.palette.up
            };
            for y in side + 1..side + 1 + legend {
                img.put_pixel(x, y, swatch);
            }
        }

        Ok(img)
    }

    pub fn path_for(&self, label: &str) -> PathBuf {
        self.out_dir.join(format!("{}.png", slug(label)))
    }
}

impl Renderer for PngRenderer {
    fn render(&self, grid: &SpinGrid, label: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating output directory {}", self.out_dir.display()))?;
        let path = self.path_for(label);
        self.raster(grid)?
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "rendered \"{label}\" (legend: left = -1, right = +1)");
        Ok(path)
    }
}

/// File-name-safe form of a display label.
fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("lattice");
    }
    out
}

/// Text block of the top-left `n x n` corner of `grid`, one row per line.
pub fn corner_preview(grid: &SpinGrid, n: usize) -> String {
    let n = n.min(grid.size());
    let mut out = String::new();
    for row in grid.rows().take(n) {
        for &s in &row[..n] {
            let _ = write!(out, "{s:>3}");
        }
        out.push('\n');
    }
    out
}
