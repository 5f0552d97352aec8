//! Flat rasterization of page content for the color checks.
//!
//! Paints axis-aligned geometry and approximate text ink onto a white canvas
//! at one pixel per point. This is a color audit, not a renderer: filled and
//! stroked shapes land in the right place with the right color, while glyphs
//! are stamped as solid boxes sized from the effective font size. Row 0 of
//! the output raster is the top of the page.
//!
//! Clipping, shading, transparency, and XObject painting are ignored; the
//! checks fed by this module only ask whether any pixel carries saturated
//! color and whether the page corner is white.

use lopdf::content::Content;
use lopdf::Object;

use super::text::{operand_f64, transform_point, Matrix, Shown, TextState};
use super::PageRaster;

const BLACK: (u8, u8, u8) = (0, 0, 0);
const WHITE: (u8, u8, u8) = (255, 255, 255);

#[derive(Default)]
struct PathBuilder {
    rects: Vec<[f64; 4]>,
    points: Vec<(f64, f64)>,
}

impl PathBuilder {
    fn clear(&mut self) {
        self.rects.clear();
        self.points.clear();
    }

    fn push_points(&mut self, operands: &[Object], count: usize) {
        let nums: Vec<f64> = operands.iter().filter_map(operand_f64).collect();
        for pair in nums.chunks_exact(2).take(count) {
            self.points.push((pair[0], pair[1]));
        }
    }

    fn points_bbox(&self) -> Option<(f64, f64, f64, f64)> {
        let (first, rest) = self.points.split_first()?;
        let mut bbox = (first.0, first.1, first.0, first.1);
        for &(x, y) in rest {
            bbox.0 = bbox.0.min(x);
            bbox.1 = bbox.1.min(y);
            bbox.2 = bbox.2.max(x);
            bbox.3 = bbox.3.max(y);
        }
        Some(bbox)
    }
}

struct Canvas {
    raster: PageRaster,
    width: f64,
    height: f64,
}

impl Canvas {
    fn new(width_pt: f64, height_pt: f64) -> Self {
        let width = width_pt.ceil().max(1.0) as u32;
        let height = height_pt.ceil().max(1.0) as u32;
        Canvas {
            raster: PageRaster::solid(width, height, WHITE),
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Paint the device-space box `[x0, x1] x [y0, y1]` (y axis up).
    fn paint_box(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: (u8, u8, u8)) {
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let (y0, y1) = (y0.min(y1), y0.max(y1));

        let col_start = x0.floor().max(0.0) as u32;
        let col_end = x1.ceil().min(self.width).max(0.0) as u32;
        let row_start = (self.height - y1).floor().max(0.0) as u32;
        let row_end = (self.height - y0).ceil().min(self.height).max(0.0) as u32;

        let stride = self.raster.width();
        let data = self.raster.data_mut();
        for row in row_start..row_end {
            for col in col_start..col_end {
                let idx = ((row * stride + col) * 3) as usize;
                data[idx] = color.0;
                data[idx + 1] = color.1;
                data[idx + 2] = color.2;
            }
        }
    }

    fn fill_bbox(&mut self, bbox: (f64, f64, f64, f64), color: (u8, u8, u8)) {
        self.paint_box(bbox.0, bbox.1, bbox.2, bbox.3, color);
    }

    /// Outline a device-space box with a one-point pen.
    fn stroke_bbox(&mut self, bbox: (f64, f64, f64, f64), color: (u8, u8, u8)) {
        let (x0, y0, x1, y1) = bbox;
        self.paint_box(x0, y1 - 1.0, x1, y1, color);
        self.paint_box(x0, y0, x1, y0 + 1.0, color);
        self.paint_box(x0, y0, x0 + 1.0, y1, color);
        self.paint_box(x1 - 1.0, y0, x1, y1, color);
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Interpret color-setting operands: 1 number is gray, 3 are RGB, 4 are
/// CMYK. Pattern names and malformed operand lists leave the color alone.
fn color_operands(operands: &[Object]) -> Option<(u8, u8, u8)> {
    let nums: Vec<f64> = operands.iter().filter_map(operand_f64).collect();
    match nums.len() {
        1 => {
            let v = channel(nums[0]);
            Some((v, v, v))
        }
        3 => Some((channel(nums[0]), channel(nums[1]), channel(nums[2]))),
        4 => {
            let (c, m, y, k) = (nums[0], nums[1], nums[2], nums[3]);
            Some((
                channel((1.0 - c) * (1.0 - k)),
                channel((1.0 - m) * (1.0 - k)),
                channel((1.0 - y) * (1.0 - k)),
            ))
        }
        _ => None,
    }
}

fn transform_bbox(x0: f64, y0: f64, x1: f64, y1: f64, ctm: &Matrix) -> (f64, f64, f64, f64) {
    let corners = [
        transform_point(x0, y0, ctm),
        transform_point(x1, y0, ctm),
        transform_point(x0, y1, ctm),
        transform_point(x1, y1, ctm),
    ];
    let mut bbox = (corners[0].0, corners[0].1, corners[0].0, corners[0].1);
    for &(x, y) in &corners[1..] {
        bbox.0 = bbox.0.min(x);
        bbox.1 = bbox.1.min(y);
        bbox.2 = bbox.2.max(x);
        bbox.3 = bbox.3.max(y);
    }
    bbox
}

fn paint_path(
    canvas: &mut Canvas,
    path: &PathBuilder,
    ctm: &Matrix,
    color: (u8, u8, u8),
    stroke: bool,
) {
    for &[x, y, w, h] in &path.rects {
        let bbox = transform_bbox(x, y, x + w, y + h, ctm);
        if stroke {
            canvas.stroke_bbox(bbox, color);
        } else {
            canvas.fill_bbox(bbox, color);
        }
    }
    if let Some((x0, y0, x1, y1)) = path.points_bbox() {
        let bbox = transform_bbox(x0, y0, x1, y1, ctm);
        if stroke {
            canvas.stroke_bbox(bbox, color);
        } else {
            canvas.fill_bbox(bbox, color);
        }
    }
}

/// Stamp shown text as per-glyph boxes in the fill color. Whitespace
/// carries no ink.
fn stamp_text(canvas: &mut Canvas, shown: &Shown, color: (u8, u8, u8)) {
    let height = shown.size * 0.7;
    if height <= 0.0 || shown.glyph_width <= 0.0 {
        return;
    }
    let (pen_x, pen_y) = shown.pen;
    for (i, &byte) in shown.bytes.iter().enumerate() {
        if (byte as char).is_whitespace() {
            continue;
        }
        let x0 = pen_x + i as f64 * shown.glyph_width;
        canvas.paint_box(x0, pen_y, x0 + shown.glyph_width, pen_y + height, color);
    }
}

/// Rasterize one page's content onto a white canvas of the given size in
/// points.
pub(crate) fn rasterize(width_pt: f64, height_pt: f64, content: &Content) -> PageRaster {
    let mut canvas = Canvas::new(width_pt, height_pt);
    let mut state = TextState::new();
    let mut fill = BLACK;
    let mut stroke = BLACK;
    let mut color_stack: Vec<((u8, u8, u8), (u8, u8, u8))> = Vec::new();
    let mut path = PathBuilder::default();

    for op in &content.operations {
        if let Some(shown) = state.apply(op) {
            stamp_text(&mut canvas, &shown, fill);
            continue;
        }
        match op.operator.as_str() {
            // Matrix state already handled inside TextState::apply
            "q" => color_stack.push((fill, stroke)),
            "Q" => {
                if let Some((f, s)) = color_stack.pop() {
                    fill = f;
                    stroke = s;
                }
            }
            "rg" | "g" | "k" | "sc" | "scn" => {
                if let Some(color) = color_operands(&op.operands) {
                    fill = color;
                }
            }
            "RG" | "G" | "K" | "SC" | "SCN" => {
                if let Some(color) = color_operands(&op.operands) {
                    stroke = color;
                }
            }
            "re" => {
                let nums: Vec<f64> = op.operands.iter().filter_map(operand_f64).collect();
                if nums.len() >= 4 {
                    path.rects.push([nums[0], nums[1], nums[2], nums[3]]);
                }
            }
            "m" | "l" => path.push_points(&op.operands, 1),
            "v" | "y" => path.push_points(&op.operands, 2),
            "c" => path.push_points(&op.operands, 3),
            "h" => {}
            "f" | "F" | "f*" => {
                paint_path(&mut canvas, &path, &state.ctm(), fill, false);
                path.clear();
            }
            "S" | "s" => {
                paint_path(&mut canvas, &path, &state.ctm(), stroke, true);
                path.clear();
            }
            "B" | "B*" | "b" | "b*" => {
                paint_path(&mut canvas, &path, &state.ctm(), fill, false);
                paint_path(&mut canvas, &path, &state.ctm(), stroke, true);
                path.clear();
            }
            "n" => path.clear(),
            _ => {}
        }
    }

    canvas.raster
}
