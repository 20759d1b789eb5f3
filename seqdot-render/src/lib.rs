/*!
# seqdot Dot Plot Export

Turns a [`SimilarityMatrix`] into an image. Every matrix cell becomes a
square block of pixels; cells holding 1 are painted in the foreground
colour and cells holding 0 are left as background, so runs of matches show
up as dark diagonal strokes.

Two outputs are supported:
1. **PNG**: the bare matrix raster
2. **SVG**: the raster plus a title, the filter parameters, axis names and,
   for short sequences, one tick label per symbol
*/

use seqdot_core::{FilterParams, Session, SimilarityMatrix};
use serde::{Deserialize, Serialize};

pub mod export;
mod svg;

pub use export::DotPlotExporter;

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Edge length in pixels of one matrix cell
    pub cell_size: u32,
    /// Upper bound for the longer side of the plot area
    pub max_image_side: u32,
    pub foreground_color: String,
    pub background_color: String,
    pub font_family: String,
    pub font_size: u32,
    /// Symbol tick labels are drawn only when both sequences are shorter
    /// than this
    pub tick_label_limit: usize,
    /// Draw mismatches instead of matches
    pub invert: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            cell_size: 24,
            max_image_side: 2048,
            foreground_color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12,
            tick_label_limit: 12,
            invert: false,
        }
    }
}

/// Names and parameters printed around the plot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotLabels {
    /// Name of the sequence along the x axis (columns)
    pub name1: String,
    /// Name of the sequence along the y axis (rows)
    pub name2: String,
    /// Symbols of the x axis sequence, for tick labels
    pub seq1: String,
    /// Symbols of the y axis sequence, for tick labels
    pub seq2: String,
    /// Filter parameters, `None` for an unfiltered plot
    pub params: Option<FilterParams>,
}

impl PlotLabels {
    pub fn from_session(session: &Session, params: Option<FilterParams>) -> Self {
        Self {
            name1: session.name1().to_string(),
            name2: session.name2().to_string(),
            seq1: session.seq1().as_str().to_string(),
            seq2: session.seq2().as_str().to_string(),
            params,
        }
    }

    pub fn title(&self) -> String {
        format!("Comparison of {} and {}", self.name1, self.name2)
    }

    pub fn subtitle(&self) -> String {
        match self.params {
            Some(p) => format!("Window: {}, threshold: {}", p.window, p.threshold),
            None => "Unfiltered".to_string(),
        }
    }

    /// Whether both sequences are short enough for per-symbol tick labels
    pub fn wants_tick_labels(&self, limit: usize) -> bool {
        self.seq1.len() < limit && self.seq2.len() < limit
    }
}

/// Pixel geometry shared by the PNG and SVG writers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlotGeometry {
    pub width: u32,
    pub height: u32,
    rows: usize,
    cols: usize,
}

impl PlotGeometry {
    pub fn new(matrix: &SimilarityMatrix, config: &ExportConfig) -> Self {
        let (rows, cols) = matrix.dimensions();
        let longest = rows.max(cols) as u64;
        let cap = u64::from(config.max_image_side.max(1));
        let cell = u64::from(config.cell_size.max(1));

        // Scale every cell by the same factor, shrinking below one pixel per
        // cell only when the matrix is larger than the cap
        let (width, height) = if longest * cell <= cap {
            (cols as u64 * cell, rows as u64 * cell)
        } else {
            let side = |n: usize| ((n as u64 * cap) / longest).max(1);
            (side(cols), side(rows))
        };

        Self {
            width: width as u32,
            height: height as u32,
            rows,
            cols,
        }
    }

    /// Half-open pixel span `[x0, x1)` covered by column `col`
    pub fn col_span(&self, col: usize) -> (u32, u32) {
        span(col, self.cols, self.width)
    }

    /// Half-open pixel span `[y0, y1)` covered by row `row`
    pub fn row_span(&self, row: usize) -> (u32, u32) {
        span(row, self.rows, self.height)
    }
}

fn span(index: usize, count: usize, pixels: u32) -> (u32, u32) {
    let px = u64::from(pixels);
    let start = (index as u64 * px / count as u64) as u32;
    let end = ((index as u64 + 1) * px / count as u64) as u32;
    (start, end.max(start + 1).min(pixels.max(1)))
}

/// Parse a colour like `#RRGGBB`
pub(crate) fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}
