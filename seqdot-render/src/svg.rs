use seqdot_core::SimilarityMatrix;

use crate::{ExportConfig, PlotGeometry};

/// Accumulates SVG elements around a plot area of `geometry` pixels
pub(crate) struct SvgBuilder {
    config: ExportConfig,
    geometry: PlotGeometry,
    elements: Vec<String>,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    ticks_on_top: bool,
}

impl SvgBuilder {
    pub fn new(config: &ExportConfig, geometry: PlotGeometry, ticks_on_top: bool) -> Self {
        let line = config.font_size as f32 + 8.0;
        let header = 2.0 * line + 20.0;

        // Tick labels move the x axis name above the plot, next to the ticks
        let (top, bottom) = if ticks_on_top {
            (header + 2.0 * line, 20.0)
        } else {
            (header, line + 20.0)
        };
        let left = (if ticks_on_top { 30.0 + line } else { 30.0 }) + 10.0;
        let right = 20.0;

        Self {
            config: config.clone(),
            geometry,
            elements: Vec::new(),
            left,
            top,
            width: left + geometry.width as f32 + right,
            height: top + geometry.height as f32 + bottom,
            ticks_on_top,
        }
    }

    pub fn add_background(&mut self) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.width, self.height, self.config.background_color
        ));
    }

    pub fn add_title(&mut self, title: &str, subtitle: &str) {
        let title_y = self.config.font_size as f32 + 10.0;
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle" font-weight="bold">{}</text>"#,
            self.width / 2.0, title_y, self.config.font_family, self.config.font_size + 4, escape_xml(title)
        ));
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#,
            self.width / 2.0, title_y + self.config.font_size as f32 + 10.0, self.config.font_family, self.config.font_size, escape_xml(subtitle)
        ));
    }

    pub fn render_cells(&mut self, matrix: &SimilarityMatrix) {
        for (row, values) in matrix.iter_rows().enumerate() {
            let (y0, y1) = self.geometry.row_span(row);
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let (x0, x1) = self.geometry.col_span(col);
                self.elements.push(format!(
                    r#"<rect class="cell" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    self.left + x0 as f32,
                    self.top + y0 as f32,
                    x1 - x0,
                    y1 - y0,
                    self.config.foreground_color
                ));
            }
        }
    }

    pub fn add_frame(&mut self) {
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="black" stroke-width="1"/>"#,
            self.left, self.top, self.geometry.width, self.geometry.height
        ));
    }

    /// One label per symbol: columns along the top, rows down the left side
    pub fn add_tick_labels(&mut self, seq1: &str, seq2: &str) {
        for (col, symbol) in seq1.chars().enumerate() {
            let (x0, x1) = self.geometry.col_span(col);
            self.elements.push(format!(
                r#"<text class="tick" x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#,
                self.left + (x0 + x1) as f32 / 2.0, self.top - 6.0, self.config.font_family, self.config.font_size, symbol
            ));
        }
        for (row, symbol) in seq2.chars().enumerate() {
            let (y0, y1) = self.geometry.row_span(row);
            self.elements.push(format!(
                r#"<text class="tick" x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                self.left - 6.0, self.top + (y0 + y1) as f32 / 2.0, self.config.font_family, self.config.font_size, symbol
            ));
        }
    }

    /// `name1` labels the x axis (columns), `name2` the y axis (rows)
    pub fn add_axis_names(&mut self, name1: &str, name2: &str) {
        let center_x = self.left + self.geometry.width as f32 / 2.0;
        let center_y = self.top + self.geometry.height as f32 / 2.0;
        let line = self.config.font_size as f32 + 8.0;

        let x_name_y = if self.ticks_on_top {
            self.top - line - 6.0
        } else {
            self.top + self.geometry.height as f32 + line
        };
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#,
            center_x, x_name_y, self.config.font_family, self.config.font_size, escape_xml(name1)
        ));
        self.elements.push(format!(
            r#"<text x="{}" y="{}" transform="rotate(-90 {} {})" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#,
            18.0, center_y, 18.0, center_y, self.config.font_family, self.config.font_size, escape_xml(name2)
        ));
    }

    pub fn finish(self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.width, self.height, self.width, self.height
        ));
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
