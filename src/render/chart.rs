//! Chart renderers for the solo vs social frequency comparison.
//!
//! Both renderers draw the same scene from a [`ChartSpec`]: two line series
//! over the full guess domain, peak labels above the taller series, and a
//! legend. `SvgRenderer` produces vector markup, `PngRenderer` rasterizes
//! through the pixel-font backend.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::models::{Mode, DOMAIN_END};

use super::pixel_text::PixelTextBackend;
use super::{ChartRenderer, ChartSpec, RenderError};

pub const CHART_WIDTH: u32 = 1280;
pub const CHART_HEIGHT: u32 = 640;

// Matplotlib's default cycle colors C0 and C1, kept so dashboards keep
// their familiar palette.
const SOLO_COLOR: RGBColor = RGBColor(31, 119, 180);
const SOCIAL_COLOR: RGBColor = RGBColor(255, 127, 14);

const CAPTION: &str = "Solo vs Social Guess Frequencies";

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Draws the full scene onto `root`. Backend-agnostic so the SVG and PNG
/// renderers stay byte-for-byte identical in what they plot.
fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(draw_err)?;

    let tallest = spec
        .solo
        .iter()
        .chain(spec.social.iter())
        .map(|point| point.y)
        .max()
        .unwrap_or(0);
    // Headroom above the tallest bin so peak labels stay inside the plot.
    let y_top = (tallest + tallest / 10).max(tallest + 2).max(5);

    let mut chart = ChartBuilder::on(root)
        .caption(CAPTION, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(0i64..DOMAIN_END, 0u64..y_top)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_labels(21)
        .y_labels(10)
        .light_line_style(&WHITE)
        .bold_line_style(&BLACK.mix(0.15))
        .x_desc("Guess")
        .y_desc("Frequency")
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            spec.solo.iter().map(|point| (point.x, point.y)),
            ShapeStyle {
                color: SOLO_COLOR.to_rgba(),
                filled: false,
                stroke_width: 2,
            },
        ))
        .map_err(draw_err)?
        .label("Solo")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 26, y)], SOLO_COLOR));

    // The social line is drawn translucent so overlaps stay readable.
    chart
        .draw_series(LineSeries::new(
            spec.social.iter().map(|point| (point.x, point.y)),
            ShapeStyle {
                color: SOCIAL_COLOR.mix(0.6),
                filled: false,
                stroke_width: 2,
            },
        ))
        .map_err(draw_err)?
        .label("Social")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 26, y)], SOCIAL_COLOR));

    for annotation in &spec.annotations {
        let color = match annotation.mode {
            Mode::Social => SOCIAL_COLOR,
            Mode::Solo | Mode::Unknown => SOLO_COLOR,
        };
        let style = ("sans-serif", 13)
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(std::iter::once(Text::new(
                annotation.text.clone(),
                (annotation.x, annotation.y),
                style,
            )))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 15))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)
}

/// Vector output. Text goes through the SVG `<text>` element, so no font
/// rasterization happens on this path.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl ChartRenderer for SvgRenderer {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError> {
        let mut svg = String::new();
        {
            let root =
                SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
            draw_chart(&root, spec)?;
        }
        Ok(svg.into_bytes())
    }
}

/// Raster output. Draws into an RGB buffer with the pixel-font backend,
/// then encodes the buffer as PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngRenderer;

impl ChartRenderer for PngRenderer {
    fn content_type(&self) -> &'static str {
        "image/png"
    }

    fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError> {
        let mut raw = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
        {
            let backend = PixelTextBackend::new(BitMapBackend::with_buffer(
                &mut raw,
                (CHART_WIDTH, CHART_HEIGHT),
            ));
            let root = backend.into_drawing_area();
            draw_chart(&root, spec)?;
        }

        let img = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, raw)
            .ok_or_else(|| RenderError::Encode("raster buffer has unexpected size".into()))?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencyTable;
    use crate::services::select_peaks;

    fn sample_spec() -> ChartSpec {
        let mut table = FrequencyTable::new();
        for _ in 0..40 {
            table.record(120, Mode::Solo);
        }
        for _ in 0..25 {
            table.record(480, Mode::Social);
        }
        table.record(777, Mode::Solo);
        let peaks = select_peaks(&table, 2);
        ChartSpec::from_table(&table, &peaks)
    }

    #[test]
    fn test_svg_renderer_emits_svg_markup() {
        let bytes = SvgRenderer.render(&sample_spec()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("<?xml") || text.starts_with("<svg"));
        assert!(text.contains("<svg"));
        assert!(text.contains(CAPTION));
    }

    #[test]
    fn test_png_renderer_emits_png_signature() {
        let bytes = PngRenderer.render(&sample_spec()).unwrap();
        assert!(bytes.len() > 1000);
        assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_empty_table_still_renders() {
        let spec = ChartSpec::from_table(&FrequencyTable::new(), &[]);
        assert!(SvgRenderer.render(&spec).is_ok());
        assert!(PngRenderer.render(&spec).is_ok());
    }

    #[test]
    fn test_renderers_work_as_trait_objects() {
        let renderers: Vec<Box<dyn ChartRenderer>> =
            vec![Box::new(SvgRenderer), Box::new(PngRenderer)];
        let spec = sample_spec();
        for renderer in &renderers {
            let bytes = renderer.render(&spec).unwrap();
            assert!(!bytes.is_empty());
            assert!(!renderer.content_type().is_empty());
        }
    }
}
