//! Shape generation for 2D primitives
//!
//! Everything becomes a triangle list in canvas pixel space. Text uses a tiny
//! stroke font made of line segments, enough for the in-world labels.

use glam::Vec2;

use super::scene::DrawCmd;
use super::vertex::{Color, Vertex};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::Rect;

/// Glyph proportions relative to the font size
const GLYPH_WIDTH: f32 = 0.45;
const GLYPH_HEIGHT: f32 = 0.7;
const GLYPH_ADVANCE: f32 = 0.6;
const GLYPH_STROKE: f32 = 0.12;

/// Stroke segments on a unit cell, (0,0) top-left
type Segment = ([f32; 2], [f32; 2]);

const GLYPH_BOX: &[Segment] = &[
    ([0.0, 0.0], [1.0, 0.0]),
    ([1.0, 0.0], [1.0, 1.0]),
    ([1.0, 1.0], [0.0, 1.0]),
    ([0.0, 1.0], [0.0, 0.0]),
];
const GLYPH_ONE: &[Segment] = &[
    ([0.5, 0.0], [0.5, 1.0]),
    ([0.2, 0.25], [0.5, 0.0]),
    ([0.2, 1.0], [0.8, 1.0]),
];
const GLYPH_Z: &[Segment] = &[
    ([0.0, 0.0], [1.0, 0.0]),
    ([1.0, 0.0], [0.0, 1.0]),
    ([0.0, 1.0], [1.0, 1.0]),
];
const GLYPH_E: &[Segment] = &[
    ([0.0, 0.0], [0.0, 1.0]),
    ([0.0, 0.0], [1.0, 0.0]),
    ([0.0, 0.5], [0.75, 0.5]),
    ([0.0, 1.0], [1.0, 1.0]),
];
const GLYPH_R: &[Segment] = &[
    ([0.0, 0.0], [0.0, 1.0]),
    ([0.0, 0.0], [1.0, 0.0]),
    ([1.0, 0.0], [1.0, 0.5]),
    ([1.0, 0.5], [0.0, 0.5]),
    ([0.4, 0.5], [1.0, 1.0]),
];

fn glyph(c: char) -> &'static [Segment] {
    match c {
        '0' | 'O' => GLYPH_BOX,
        '1' => GLYPH_ONE,
        'Z' => GLYPH_Z,
        'E' => GLYPH_E,
        'R' => GLYPH_R,
        _ => &[],
    }
}

/// Tessellate a whole draw list, in order
pub fn tessellate(cmds: &[DrawCmd]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(cmds.len() * 12);

    for cmd in cmds {
        match cmd {
            DrawCmd::Clear(color) => fill_rect(
                &mut vertices,
                &Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
                *color,
            ),
            DrawCmd::FillRect { rect, color } => fill_rect(&mut vertices, rect, *color),
            DrawCmd::StrokeRect { rect, color, width } => {
                stroke_rect(&mut vertices, rect, *color, *width)
            }
            DrawCmd::Line {
                from,
                to,
                color,
                width,
            } => line(&mut vertices, *from, *to, *color, *width),
            DrawCmd::Text {
                text,
                center,
                size,
                color,
            } => self::text(&mut vertices, text, *center, *size, *color),
        }
    }

    vertices
}

/// Two triangles covering an arbitrary quad (corners in winding order)
fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
    out.push(Vertex::new(a.x, a.y, color));
}

/// Solid axis-aligned rectangle
pub fn fill_rect(out: &mut Vec<Vertex>, rect: &Rect, color: Color) {
    let min = rect.pos;
    let max = rect.pos + rect.size;
    quad(
        out,
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
        color,
    );
}

/// Outline straddling the rectangle edges, `width` pixels thick
pub fn stroke_rect(out: &mut Vec<Vertex>, rect: &Rect, color: Color, width: f32) {
    let half = width / 2.0;
    let outer_min = rect.pos - Vec2::splat(half);
    let outer_max = rect.pos + rect.size + Vec2::splat(half);
    let inner_h = (rect.size.y - width).max(0.0);

    // Top and bottom span the full outer width
    fill_rect(
        out,
        &Rect::new(outer_min.x, outer_min.y, outer_max.x - outer_min.x, width),
        color,
    );
    fill_rect(
        out,
        &Rect::new(outer_min.x, outer_max.y - width, outer_max.x - outer_min.x, width),
        color,
    );
    // Sides fill the gap between them
    fill_rect(
        out,
        &Rect::new(outer_min.x, outer_min.y + width, width, inner_h),
        color,
    );
    fill_rect(
        out,
        &Rect::new(outer_max.x - width, outer_min.y + width, width, inner_h),
        color,
    );
}

/// Thick line segment with square ends
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, color: Color, width: f32) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(out, from + perp, to + perp, to - perp, from - perp, color);
}

/// Stroke-font text centered on `center`; `size` matches a CSS pixel font size
pub fn text(out: &mut Vec<Vertex>, text: &str, center: Vec2, size: f32, color: Color) {
    let count = text.chars().count();
    if count == 0 {
        return;
    }

    let glyph_size = Vec2::new(GLYPH_WIDTH, GLYPH_HEIGHT) * size;
    let advance = GLYPH_ADVANCE * size;
    let stroke = (GLYPH_STROKE * size).max(1.0);
    let total_width = advance * (count - 1) as f32 + glyph_size.x;
    let mut origin = Vec2::new(center.x - total_width / 2.0, center.y - glyph_size.y / 2.0);

    for c in text.chars() {
        for (a, b) in glyph(c.to_ascii_uppercase()) {
            let from = origin + Vec2::from(*a) * glyph_size;
            let to = origin + Vec2::from(*b) * glyph_size;
            line(out, from, to, color, stroke);
        }
        origin.x += advance;
    }
}
