use kurbo::{BezPath, PathEl};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CaptionError, CaptionResult};

/// Colors and pen width for the three caption layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionPaint {
    /// Plate fill and halo stroke color.
    pub background: Rgba8,
    /// Glyph fill color drawn last.
    pub foreground: Rgba8,
    /// Halo pen width in pixels; `0` skips the stroke.
    pub stroke_width: f32,
}

/// Composite the caption described by `path` onto `pixels` in place.
///
/// Layers are rasterized with `vello_cpu` onto a transparent surface (plate fill, round-joined
/// halo stroke, glyph fill) and the result is blended source-over onto the image.
pub fn composite_caption(
    pixels: &mut image::RgbaImage,
    path: &BezPath,
    paint: &CaptionPaint,
) -> CaptionResult<()> {
    if path.elements().is_empty() {
        return Ok(());
    }

    let layer = rasterize_caption(path, pixels.width(), pixels.height(), paint)?;
    over_straight_in_place(pixels, layer.data_as_u8_slice())
}

/// Rasterize the caption layers into a premultiplied, initially transparent pixmap.
pub fn rasterize_caption(
    path: &BezPath,
    width: u32,
    height: u32,
    paint: &CaptionPaint,
) -> CaptionResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CaptionError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CaptionError::validation("image height exceeds u16"))?;

    let cpu_path = bezpath_to_cpu(path);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    ctx.set_paint(color_to_cpu(paint.background));
    ctx.fill_path(&cpu_path);

    if paint.stroke_width > 0.0 {
        let stroke = vello_cpu::kurbo::Stroke::new(f64::from(paint.stroke_width))
            .with_join(vello_cpu::kurbo::Join::Round);
        ctx.set_stroke(stroke);
        ctx.stroke_path(&cpu_path);
    }

    ctx.set_paint(color_to_cpu(paint.foreground));
    ctx.fill_path(&cpu_path);

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Blend a premultiplied layer over a straight-alpha RGBA8 buffer.
pub fn over_straight_in_place(dst: &mut [u8], layer_premul: &[u8]) -> CaptionResult<()> {
    if dst.len() != layer_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(CaptionError::validation(
            "over_straight_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(layer_premul.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let base = premultiply([d[0], d[1], d[2], d[3]]);
        let out = over(base, [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&unpremultiply(out));
    }
    Ok(())
}

fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
