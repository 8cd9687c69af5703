//! The two-layer drawing surface.
//!
//! The stroke layer accumulates brush ink over a transparent background and
//! is what gets submitted to the room. The guide layer sits behind it and is
//! written exactly once, by [`Surface::install_guides`]: the rings are
//! painted onto the stroke layer, snapshotted into the guide layer, and the
//! stroke layer is wiped. Keeping the pattern on its own layer means the
//! stroke surface is never cleared while drawing, and the final capture
//! contains ink only.

use crate::RenderError;
use crate::guides::paint_rings;
use sg_core::StrokeFrame;
use sg_core::model::{Color, GuideLayout};
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

/// Convert a model color to a tiny-skia color.
pub(crate) fn skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        c.r.clamp(0.0, 1.0),
        c.g.clamp(0.0, 1.0),
        c.b.clamp(0.0, 1.0),
        c.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::BLACK)
}

/// A raster board surface: stroke layer over guide layer over background.
pub struct Surface {
    width: u32,
    height: u32,
    strokes: Pixmap,
    guide: Pixmap,
    background: Color,
}

impl Surface {
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, RenderError> {
        let strokes = Pixmap::new(width, height).ok_or(RenderError::ZeroSized(width, height))?;
        let guide = strokes.clone();
        Ok(Self {
            width,
            height,
            strokes,
            guide,
            background,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Render the guide pattern into the background layer.
    ///
    /// Draws onto the stroke layer, snapshots that into the guide layer,
    /// then clears the stroke layer, leaving it blank for ink.
    pub fn install_guides(&mut self, layout: &GuideLayout) {
        paint_rings(&mut self.strokes, &layout.rings);
        self.guide = self.strokes.clone();
        self.clear_strokes();
    }

    /// Wipe the stroke layer back to transparent.
    pub fn clear_strokes(&mut self) {
        self.strokes.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Paint one brush frame: a round-capped line per surviving bristle.
    pub fn paint_frame(&mut self, frame: &StrokeFrame, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;

        for seg in &frame.segments {
            let mut pb = PathBuilder::new();
            pb.move_to(seg.x0, seg.y0);
            pb.line_to(seg.x1, seg.y1);
            let Some(path) = pb.finish() else { continue };

            let stroke = Stroke {
                width: seg.width,
                line_cap: LineCap::Round,
                ..Stroke::default()
            };
            self.strokes
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        log::trace!(
            "painted {} segments {:?} -> {:?}",
            frame.segments.len(),
            frame.from,
            frame.to
        );
    }

    /// Encode the stroke layer alone as PNG: transparent background, ink
    /// only. This is the submission artifact; the room composites it.
    pub fn capture_png(&self) -> Result<Vec<u8>, RenderError> {
        self.strokes
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    /// Encode background color + guide layer + stroke layer as PNG, the way
    /// the board looks on screen. This is the local download artifact.
    pub fn composite_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut flat = Pixmap::new(self.width, self.height)
            .ok_or(RenderError::ZeroSized(self.width, self.height))?;
        flat.fill(skia_color(self.background));
        flat.draw_pixmap(
            0,
            0,
            self.guide.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        flat.draw_pixmap(
            0,
            0,
            self.strokes.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        flat.encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    /// Premultiplied RGBA of one stroke-layer pixel.
    pub fn stroke_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.strokes
            .pixel(x, y)
            .map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    }

    /// Premultiplied RGBA of one guide-layer pixel.
    pub fn guide_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.guide
            .pixel(x, y)
            .map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    }
}
