//! Cairo rendering of annotations and PNG previews.

use super::geometry::Geometry;
use super::strategy::Strategy;
use crate::editor::{RenderItem, render_items};
use crate::slideshow::{Selection, Slideshow};
use crate::style::{Color, RenderStyle, WHITE};
use crate::util::Bounds;
use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::path::Path;

/// Renders annotations in order (first item = bottom layer).
///
/// Selected items are outlined in the selected colour and get their edit
/// handles drawn on top.
pub fn render_annotations(ctx: &cairo::Context, items: &[RenderItem<'_>], style: &RenderStyle) {
    for item in items {
        render_annotation(ctx, item, style);
    }
}

/// Renders a single annotation with the strategy chosen for it.
pub fn render_annotation(ctx: &cairo::Context, item: &RenderItem<'_>, style: &RenderStyle) {
    let color = style.outline(item.selected);
    let geometry = item.annotation.geometry();
    let _ = ctx.save();
    ctx.set_line_width(style.stroke_width);
    ctx.set_line_join(cairo::LineJoin::Round);

    match item.strategy {
        Strategy::Circle => {
            if let Geometry::Point {
                coordinates,
                radius,
            } = geometry
            {
                ctx.new_path();
                ctx.arc(
                    coordinates[0],
                    coordinates[1],
                    radius.max(0.0),
                    0.0,
                    std::f64::consts::PI * 2.0,
                );
                fill_and_stroke(ctx, color, style.fill_opacity);
            }
        }
        Strategy::Rectangle => {
            if let Some(bounds) = item.strategy.bounds(geometry) {
                ctx.new_path();
                ctx.rectangle(bounds.min_x, bounds.min_y, bounds.width(), bounds.height());
                fill_and_stroke(ctx, color, style.fill_opacity);
            }
        }
        Strategy::Polygon => {
            ctx.new_path();
            for ring in geometry.rings() {
                let Some((first, rest)) = ring.split_first() else {
                    continue;
                };
                ctx.move_to(first[0], first[1]);
                for vertex in rest {
                    ctx.line_to(vertex[0], vertex[1]);
                }
                ctx.close_path();
            }
            // Even-odd so inner rings punch holes
            ctx.set_fill_rule(cairo::FillRule::EvenOdd);
            fill_and_stroke(ctx, color, style.fill_opacity);
        }
    }

    if item.selected {
        render_handles(ctx, item, style);
    }
    let _ = ctx.restore();
}

fn fill_and_stroke(ctx: &cairo::Context, color: Color, fill_opacity: f64) {
    if fill_opacity > 0.0 {
        set_source(ctx, color.with_alpha(color.a * fill_opacity));
        let _ = ctx.fill_preserve();
    }
    set_source(ctx, color);
    let _ = ctx.stroke();
}

fn set_source(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Square handle markers, filled white with a coloured border.
fn render_handles(ctx: &cairo::Context, item: &RenderItem<'_>, style: &RenderStyle) {
    let size = style.handle_size.max(1.0);
    let half = size / 2.0;
    ctx.set_line_width((style.stroke_width / 2.0).max(0.5));
    for handle in item.strategy.handles(item.annotation.geometry()) {
        let [x, y] = handle.position;
        ctx.new_path();
        ctx.rectangle(x - half, y - half, size, size);
        set_source(ctx, WHITE);
        let _ = ctx.fill_preserve();
        set_source(ctx, style.selected.with_alpha(1.0));
        let _ = ctx.stroke();
    }
}

/// Draws the slideshow into a `width` x `height` PNG file.
///
/// The view is fitted to the union of every drawable shape's bounds with a
/// small margin. Line widths stay in output pixels regardless of the scale.
pub fn render_preview_png(
    slideshow: &Slideshow,
    selection: &Selection,
    style: &RenderStyle,
    width: u32,
    height: u32,
    path: &Path,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(anyhow!("preview size must be non-zero, got {width}x{height}"));
    }
    let (Ok(surface_width), Ok(surface_height)) = (i32::try_from(width), i32::try_from(height))
    else {
        return Err(anyhow!("preview size {width}x{height} is too large"));
    };
    let surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, surface_width, surface_height)
            .context("failed to create image surface")?;
    {
        let ctx = cairo::Context::new(&surface).context("failed to create cairo context")?;
        set_source(&ctx, WHITE);
        let _ = ctx.paint();

        let items = render_items(slideshow, selection);
        let scaled_style = match content_bounds(&items, style) {
            Some(bounds) => {
                let scale = (f64::from(width) / bounds.width())
                    .min(f64::from(height) / bounds.height())
                    .max(f64::EPSILON);
                let offset_x = (f64::from(width) - bounds.width() * scale) / 2.0;
                let offset_y = (f64::from(height) - bounds.height() * scale) / 2.0;
                ctx.translate(offset_x, offset_y);
                ctx.scale(scale, scale);
                ctx.translate(-bounds.min_x, -bounds.min_y);
                RenderStyle {
                    stroke_width: style.stroke_width / scale,
                    handle_size: style.handle_size / scale,
                    ..*style
                }
            }
            None => *style,
        };
        render_annotations(&ctx, &items, &scaled_style);
    }
    surface.flush();

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("failed to write PNG to {}", path.display()))?;
    log::info!(
        "Rendered {} annotations of slideshow {} to {}",
        slideshow.len(),
        slideshow.id(),
        path.display()
    );
    Ok(())
}

fn content_bounds(items: &[RenderItem<'_>], style: &RenderStyle) -> Option<Bounds> {
    let bounds = items
        .iter()
        .filter_map(|item| item.strategy.bounds(item.annotation.geometry()))
        .reduce(Bounds::union)?;
    let margin = (bounds.width().max(bounds.height()) * 0.05).max(style.handle_size);
    Some(bounds.inflate(margin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Annotation, AnnotationKind};
    use crate::config::SelectionMode;
    use cairo::{Format, ImageSurface};

    fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
    }

    #[test]
    fn rectangle_outline_is_painted() {
        let slideshow = Slideshow::from_annotations(
            "s",
            "Render",
            vec![Annotation::new(
                "r",
                Geometry::rectangle([10.0, 10.0], [40.0, 40.0]),
                AnnotationKind::Rectangle,
            )],
        );
        let selection = Selection::new(SelectionMode::Single);
        let style = RenderStyle {
            fill_opacity: 0.0,
            ..RenderStyle::default()
        };

        let mut surface = ImageSurface::create(Format::ARgb32, 50, 50).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            render_annotations(&ctx, &render_items(&slideshow, &selection), &style);
        }
        surface.flush();

        // On the left edge, away from corners
        assert_ne!(pixel(&mut surface, 10, 25)[3], 0);
        // Unfilled interior stays transparent
        assert_eq!(pixel(&mut surface, 25, 25)[3], 0);
    }

    #[test]
    fn preview_png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let slideshow = Slideshow::from_annotations(
            "s",
            "Preview",
            vec![Annotation::new(
                "p",
                Geometry::point([100.0, 100.0], 20.0),
                AnnotationKind::Point,
            )],
        );
        render_preview_png(
            &slideshow,
            &Selection::default(),
            &RenderStyle::default(),
            64,
            48,
            &path,
        )
        .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn zero_sized_preview_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_preview_png(
            &Slideshow::with_id("s", "Empty"),
            &Selection::default(),
            &RenderStyle::default(),
            0,
            10,
            &dir.path().join("x.png"),
        );
        assert!(err.is_err());
    }

    #[test]
    fn oversized_preview_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let err = render_preview_png(
            &Slideshow::with_id("s", "Empty"),
            &Selection::default(),
            &RenderStyle::default(),
            u32::MAX,
            10,
            &path,
        )
        .unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(!path.exists());
    }
}
