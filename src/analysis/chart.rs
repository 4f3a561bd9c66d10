//! Bar chart rendering for word-frequency rankings.
//!
//! Charts are drawn with plotters into an in-memory SVG document. The text
//! elements carry a CSS font-family list, so whatever viewer displays the
//! chart walks the list until it finds a font that has the token's glyphs.

use super::{AnalysisError, WordFrequencyEntry};
use crate::error::Result;
use crate::locale::Language;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use tracing::debug;

#[cfg(target_os = "windows")]
const PREFERRED_FONT: &str = "Malgun Gothic";
#[cfg(target_os = "macos")]
const PREFERRED_FONT: &str = "AppleGothic";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const PREFERRED_FONT: &str = "DejaVu Sans";

const FALLBACK_FONTS: &[&str] = &["Noto Sans CJK KR", "DejaVu Sans", "sans-serif"];

const X_LABEL_AREA: u32 = 120;
const LABEL_GAP: i32 = 10;

const BAR_FILL: RGBColor = RGBColor(135, 206, 235);
const BAR_EDGE: RGBColor = RGBColor(0, 0, 128);

/// Font-family list used for every text element: the platform's preferred
/// font first, then fallbacks that cover Hangul and Latin.
pub fn font_family_chain() -> String {
    let mut chain = vec![PREFERRED_FONT];
    chain.extend(FALLBACK_FONTS.iter().filter(|font| **font != PREFERRED_FONT));
    chain.join(", ")
}

/// A rendered chart. Opaque to the dialogue loop; surfaces decide how to
/// show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    svg: String,
}

impl ChartImage {
    pub fn as_svg(&self) -> &str {
        &self.svg
    }

    /// Write the chart as an SVG file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.svg)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    language: Language,
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            width: 1200,
            height: 800,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Draw one bar per entry, in the order given.
    pub fn render(
        &self,
        ranking: &[WordFrequencyEntry],
    ) -> std::result::Result<ChartImage, AnalysisError> {
        if ranking.is_empty() {
            return Err(AnalysisError::Chart("nothing to plot".to_string()));
        }

        let fonts = font_family_chain();
        let family = fonts.as_str();
        let bars = ranking.len();
        let max_count = ranking.iter().map(|e| e.count).max().unwrap_or(1) as u32;
        // One unit-wide slot per bar; ticks sit at the slot centers.
        let centers: Vec<f64> = (0..bars).map(slot_center).collect();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(chart_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(self.language.chart_title(), (family, 28).into_font().style(FontStyle::Bold))
                .margin(20)
                .x_label_area_size(X_LABEL_AREA)
                .y_label_area_size(60)
                .build_cartesian_2d(
                    (0f64..bars as f64).with_key_points(centers),
                    0u32..max_count + 1,
                )
                .map_err(chart_error)?;

            // Tokens are drawn below, the mesh only contributes the tick marks.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .light_line_style(BLACK.mix(0.1).stroke_width(1))
                .bold_line_style(BLACK.mix(0.3).stroke_width(1))
                .x_label_formatter(&|_| String::new())
                .y_label_style((family, 14))
                .x_desc(self.language.chart_x_label())
                .y_desc(self.language.chart_y_label())
                .axis_desc_style((family, 18).into_font().style(FontStyle::Bold))
                .draw()
                .map_err(chart_error)?;

            chart
                .draw_series(ranking.iter().enumerate().map(|(idx, entry)| {
                    let mut bar = Rectangle::new(
                        [(idx as f64, 0), (idx as f64 + 1.0, entry.count as u32)],
                        BAR_FILL.mix(0.7).filled(),
                    );
                    bar.set_margin(0, 0, 10, 10);
                    bar
                }))
                .map_err(chart_error)?;

            chart
                .draw_series(ranking.iter().enumerate().map(|(idx, entry)| {
                    let mut edge = Rectangle::new(
                        [(idx as f64, 0), (idx as f64 + 1.0, entry.count as u32)],
                        BAR_EDGE.stroke_width(1),
                    );
                    edge.set_margin(0, 0, 10, 10);
                    edge
                }))
                .map_err(chart_error)?;

            let count_style = (family, 16)
                .into_font()
                .style(FontStyle::Bold)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));

            chart
                .draw_series(ranking.iter().enumerate().map(|(idx, entry)| {
                    Text::new(
                        entry.count.to_string(),
                        (slot_center(idx), entry.count as u32),
                        count_style.clone(),
                    )
                }))
                .map_err(chart_error)?;

            // Rotated clockwise and anchored at their start, so each token
            // hangs downward from just under its tick.
            let token_style = (family, 16)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center));

            chart
                .draw_series(ranking.iter().enumerate().map(|(idx, entry)| {
                    EmptyElement::at((slot_center(idx), 0))
                        + Text::new(entry.token.clone(), (0, LABEL_GAP), token_style.clone())
                }))
                .map_err(chart_error)?;

            root.present().map_err(chart_error)?;
        }

        debug!(bars = ranking.len(), bytes = svg.len(), "Rendered word frequency chart");
        Ok(ChartImage { svg })
    }
}

fn slot_center(idx: usize) -> f64 {
    idx as f64 + 0.5
}

fn chart_error<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::Chart(err.to_string())
}
