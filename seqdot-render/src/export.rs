//! Dot plot writers

use std::borrow::Cow;
use std::path::Path;

use anyhow::{anyhow, Result};
use image::{ImageFormat, Rgb, RgbImage};
use seqdot_core::SimilarityMatrix;

use crate::svg::SvgBuilder;
use crate::{parse_hex_rgb, ExportConfig, PlotGeometry, PlotLabels};

/// Writes similarity matrices as PNG or SVG dot plots
pub struct DotPlotExporter {
    config: ExportConfig,
}

impl DotPlotExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Write `matrix` to `path`, choosing SVG for a `.svg` extension and PNG
    /// otherwise
    pub fn export<P: AsRef<Path>>(
        &self,
        path: P,
        matrix: &SimilarityMatrix,
        labels: &PlotLabels,
    ) -> Result<()> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            self.export_svg(path, matrix, labels)
        } else {
            self.export_png(path, matrix)
        }
    }

    /// Raster export of the bare matrix
    pub fn export_png<P: AsRef<Path>>(&self, path: P, matrix: &SimilarityMatrix) -> Result<()> {
        let img = self.rasterize(matrix)?;
        img.save_with_format(path.as_ref(), ImageFormat::Png)?;
        log::info!(
            "Wrote {}x{} dot plot to {}",
            img.width(),
            img.height(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Render the matrix into an in-memory image
    pub fn rasterize(&self, matrix: &SimilarityMatrix) -> Result<RgbImage> {
        let foreground = color(&self.config.foreground_color)?;
        let background = color(&self.config.background_color)?;

        let matrix = self.oriented(matrix);
        let geometry = PlotGeometry::new(&matrix, &self.config);
        let mut img = RgbImage::from_pixel(geometry.width, geometry.height, background);

        for (row, values) in matrix.iter_rows().enumerate() {
            let (y0, y1) = geometry.row_span(row);
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let (x0, x1) = geometry.col_span(col);
                for y in y0..y1 {
                    for x in x0..x1 {
                        img.put_pixel(x, y, foreground);
                    }
                }
            }
        }

        Ok(img)
    }

    /// Vector export with title, parameters, axis names and tick labels
    pub fn export_svg<P: AsRef<Path>>(
        &self,
        path: P,
        matrix: &SimilarityMatrix,
        labels: &PlotLabels,
    ) -> Result<()> {
        let svg = self.render_svg(matrix, labels)?;
        std::fs::write(path.as_ref(), svg)?;
        log::info!("Wrote SVG dot plot to {}", path.as_ref().display());
        Ok(())
    }

    /// SVG document as a string
    pub fn render_svg(&self, matrix: &SimilarityMatrix, labels: &PlotLabels) -> Result<String> {
        // Validate colours up front so SVG and PNG reject the same configs
        color(&self.config.foreground_color)?;
        color(&self.config.background_color)?;

        let matrix = self.oriented(matrix);
        let geometry = PlotGeometry::new(&matrix, &self.config);
        let ticks = labels.wants_tick_labels(self.config.tick_label_limit);

        let mut svg = SvgBuilder::new(&self.config, geometry, ticks);
        svg.add_background();
        svg.add_title(&labels.title(), &labels.subtitle());
        svg.render_cells(&matrix);
        svg.add_frame();
        if ticks {
            svg.add_tick_labels(&labels.seq1, &labels.seq2);
        }
        svg.add_axis_names(&labels.name1, &labels.name2);
        Ok(svg.finish())
    }

    fn oriented<'a>(&self, matrix: &'a SimilarityMatrix) -> Cow<'a, SimilarityMatrix> {
        if self.config.invert {
            Cow::Owned(matrix.inverted())
        } else {
            Cow::Borrowed(matrix)
        }
    }
}

fn color(s: &str) -> Result<Rgb<u8>> {
    parse_hex_rgb(s)
        .map(Rgb)
        .ok_or_else(|| anyhow!("Invalid colour '{}', expected #RRGGBB", s))
}
