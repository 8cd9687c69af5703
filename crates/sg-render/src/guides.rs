//! Guide-dot pattern painting.
//!
//! Each [`GuideRing`] places the vertices of a regular polygon on a circle
//! centered in the pixmap. Rings are painted in order, later rings over
//! earlier ones.

use sg_core::model::GuideRing;
use std::f32::consts::{PI, TAU};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Paint `rings` onto `pixmap`.
pub fn paint_rings(pixmap: &mut Pixmap, rings: &[GuideRing]) {
    let xoff = pixmap.width() as f32 / 2.0;
    let yoff = pixmap.height() as f32 / 2.0;

    for ring in rings {
        if ring.points == 0 {
            log::warn!("guide ring with zero points skipped");
            continue;
        }

        let mut paint = Paint::default();
        paint.set_color(super::surface::skia_color(ring.color));
        paint.anti_alias = true;

        // Start at the top; shifting by half a division turns the top
        // vertex into a flat top edge.
        let mut ang_off = -PI / 2.0;
        let ang_div = TAU / ring.points as f32;
        if !ring.point_up {
            ang_off += ang_div / 2.0;
        }

        let radius = pixmap.width() as f32 * ring.diameter_ratio / 2.0;

        for i in 0..ring.points {
            let ang = ang_div * i as f32 + ang_off;
            let x = ang.cos() * radius + xoff;
            let y = ang.sin() * radius + yoff;

            if let Some(dot) = PathBuilder::from_circle(x, y, ring.dot_radius) {
                pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }
}
