//! Drawing backend wrapper that renders text from the built-in pixel font.
//!
//! The raster backend has no font loader in this build, so its own
//! `draw_text` cannot be used. This wrapper delegates every primitive to the
//! wrapped backend and redraws text itself as scaled glyph blocks.

use plotters_backend::{
    text_anchor, BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend,
    DrawingErrorKind,
};

use super::glyphs::{glyph, text_width, GLYPH_HEIGHT, SPACE_WIDTH};

pub(super) struct PixelTextBackend<DB> {
    inner: DB,
}

impl<DB: DrawingBackend> PixelTextBackend<DB> {
    pub(super) fn new(inner: DB) -> Self {
        Self { inner }
    }
}

impl<DB: DrawingBackend> DrawingBackend for PixelTextBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        dim: (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, dim, src)
    }

    fn draw_text<S: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &S,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        let color = style.color();
        if text.is_empty() || color.alpha == 0.0 {
            return Ok(());
        }

        // The requested font size still drives the glyph scale, via the
        // height of the layout box the style reports for this text.
        let ((_, min_y), (_, max_y)) = style
            .layout_box(text)
            .map_err(|e| DrawingErrorKind::FontError(Box::new(e)))?;
        let box_height = (max_y - min_y).max(1);
        let scale = ((box_height as f64 / GLYPH_HEIGHT as f64).round() as i32).max(1);

        let width = text_width(text) * scale;
        let height = GLYPH_HEIGHT as i32 * scale;
        let anchor = style.anchor();
        let dx = match anchor.h_pos {
            text_anchor::HPos::Left => 0,
            text_anchor::HPos::Right => -width,
            text_anchor::HPos::Center => -width / 2,
        };
        let dy = match anchor.v_pos {
            text_anchor::VPos::Top => 0,
            text_anchor::VPos::Center => -height / 2,
            text_anchor::VPos::Bottom => -height,
        };

        let mut pen_x = pos.0 + dx;
        let top = pos.1 + dy;
        for ch in text.chars() {
            let g = match glyph(ch) {
                Some(g) => g,
                None => {
                    pen_x += (SPACE_WIDTH as i32 + 1) * scale;
                    continue;
                }
            };
            for (row_idx, row) in g.rows.iter().enumerate() {
                for col in 0..g.width {
                    if row & (1 << (g.width - 1 - col)) == 0 {
                        continue;
                    }
                    let x0 = pen_x + col as i32 * scale;
                    let y0 = top + row_idx as i32 * scale;
                    for px in 0..scale {
                        for py in 0..scale {
                            self.inner.draw_pixel((x0 + px, y0 + py), color)?;
                        }
                    }
                }
            }
            pen_x += (g.width as i32 + 1) * scale;
        }
        Ok(())
    }
}
