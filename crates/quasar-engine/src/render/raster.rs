//! Raster backends for the rich-image tier.
//!
//! A [`RasterBackend`] turns a [`DiagramLayout`] into PNG bytes. The
//! drawing surface lives only inside [`RasterBackend::rasterize`], so it is
//! released when that call returns, whether it succeeded or not.

use quasar_ir::{DiagramLayout, Instruction, QubitId};
use tiny_skia::{
    Color, FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use crate::config::RenderConfig;
use crate::error::RenderError;

/// Largest width or height, in pixels, a backend will allocate.
pub const MAX_CANVAS_EDGE: u32 = 8192;

/// Something that can draw a circuit layout as a PNG image.
pub trait RasterBackend: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Draw `layout` and return the encoded PNG.
    fn rasterize(&self, layout: &DiagramLayout, config: &RenderConfig)
    -> Result<Vec<u8>, RenderError>;
}

/// A backend that always fails, used when rich images are switched off.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    /// Create a backend that reports `reason` on every call.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RasterBackend for UnavailableBackend {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn rasterize(
        &self,
        _layout: &DiagramLayout,
        _config: &RenderConfig,
    ) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::BackendUnavailable {
            backend: self.name().to_string(),
            reason: self.reason.clone(),
        })
    }
}

/// Software rasterizer built on `tiny-skia`. Needs no display or fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkiaBackend;

/// Pixel geometry derived from the layout and the render settings.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: u32,
    height: u32,
    margin: f32,
    gutter: f32,
    cell_width: f32,
    row_height: f32,
    box_size: f32,
}

impl Geometry {
    fn new(layout: &DiagramLayout, config: &RenderConfig) -> Result<Self, RenderError> {
        let columns = layout.num_columns().max(1) as u64;
        let rows = layout.num_qubits().max(1) as u64;
        let gutter = config.cell_width / 2;

        let width = 2 * u64::from(config.margin)
            + u64::from(gutter)
            + columns * u64::from(config.cell_width);
        let height = 2 * u64::from(config.margin) + rows * u64::from(config.row_height);
        let too_big = |edge: u64| edge == 0 || edge > u64::from(MAX_CANVAS_EDGE);
        if too_big(width) || too_big(height) {
            return Err(RenderError::Canvas {
                width: u32::try_from(width).unwrap_or(u32::MAX),
                height: u32::try_from(height).unwrap_or(u32::MAX),
            });
        }

        let cell_width = config.cell_width as f32;
        let row_height = config.row_height as f32;
        Ok(Self {
            width: width as u32,
            height: height as u32,
            margin: config.margin as f32,
            gutter: gutter as f32,
            cell_width,
            row_height,
            box_size: cell_width.min(row_height) * 0.6,
        })
    }

    fn wire_y(&self, qubit: QubitId) -> f32 {
        self.margin + (qubit.0 as f32 + 0.5) * self.row_height
    }

    fn column_x(&self, column: usize) -> f32 {
        self.margin + self.gutter + (column as f32 + 0.5) * self.cell_width
    }
}

/// Unit-square strokes for the gate letters, in `[-1, 1]` coordinates.
fn glyph_strokes(symbol: char) -> &'static [[(f32, f32); 2]] {
    match symbol {
        'H' => &[
            [(-1.0, -1.0), (-1.0, 1.0)],
            [(1.0, -1.0), (1.0, 1.0)],
            [(-1.0, 0.0), (1.0, 0.0)],
        ],
        'X' => &[[(-1.0, -1.0), (1.0, 1.0)], [(-1.0, 1.0), (1.0, -1.0)]],
        'Y' => &[
            [(-1.0, -1.0), (0.0, 0.0)],
            [(1.0, -1.0), (0.0, 0.0)],
            [(0.0, 0.0), (0.0, 1.0)],
        ],
        'Z' => &[
            [(-1.0, -1.0), (1.0, -1.0)],
            [(1.0, -1.0), (-1.0, 1.0)],
            [(-1.0, 1.0), (1.0, 1.0)],
        ],
        _ => &[],
    }
}

fn paint(r: u8, g: u8, b: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        ..Stroke::default()
    }
}

fn segments(lines: &[[(f32, f32); 2]]) -> Result<Path, RenderError> {
    let mut pb = PathBuilder::new();
    for [(x0, y0), (x1, y1)] in lines {
        pb.move_to(*x0, *y0);
        pb.line_to(*x1, *y1);
    }
    pb.finish()
        .ok_or_else(|| RenderError::Geometry("empty line set".into()))
}

fn circle(cx: f32, cy: f32, r: f32) -> Result<Path, RenderError> {
    PathBuilder::from_circle(cx, cy, r)
        .ok_or_else(|| RenderError::Geometry(format!("circle of radius {r} at ({cx}, {cy})")))
}

impl SkiaBackend {
    fn draw_wires(
        &self,
        pixmap: &mut Pixmap,
        geo: &Geometry,
        num_qubits: usize,
    ) -> Result<(), RenderError> {
        let x0 = geo.margin;
        let x1 = geo.width as f32 - geo.margin;
        let lines: Vec<_> = (0..num_qubits as u32)
            .map(|q| {
                let y = geo.wire_y(QubitId(q));
                [(x0, y), (x1, y)]
            })
            .collect();
        if lines.is_empty() {
            return Ok(());
        }
        pixmap.stroke_path(
            &segments(&lines)?,
            &paint(0x44, 0x44, 0x44),
            &stroke(1.5),
            Transform::identity(),
            None,
        );

        // Start-of-wire markers stand in for |0⟩ labels.
        for q in 0..num_qubits as u32 {
            let marker = circle(x0 + geo.gutter / 2.0, geo.wire_y(QubitId(q)), 3.0)?;
            pixmap.fill_path(
                &marker,
                &paint(0x44, 0x44, 0x44),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        Ok(())
    }

    fn draw_gate_box(
        &self,
        pixmap: &mut Pixmap,
        geo: &Geometry,
        x: f32,
        y: f32,
        symbol: char,
    ) -> Result<(), RenderError> {
        let half = geo.box_size / 2.0;
        let rect = Rect::from_xywh(x - half, y - half, geo.box_size, geo.box_size)
            .ok_or_else(|| RenderError::Geometry(format!("gate box at ({x}, {y})")))?;
        let outline = PathBuilder::from_rect(rect);
        pixmap.fill_path(
            &outline,
            &paint(0xe3, 0xf2, 0xfd),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        pixmap.stroke_path(
            &outline,
            &paint(0x15, 0x65, 0xc0),
            &stroke(2.0),
            Transform::identity(),
            None,
        );

        let g = geo.box_size * 0.28;
        let glyph: Vec<_> = glyph_strokes(symbol)
            .iter()
            .map(|[(ax, ay), (bx, by)]| {
                [(x + ax * g, y + ay * g), (x + bx * g, y + by * g)]
            })
            .collect();
        if !glyph.is_empty() {
            pixmap.stroke_path(
                &segments(&glyph)?,
                &paint(0x0d, 0x47, 0xa1),
                &stroke(2.5),
                Transform::identity(),
                None,
            );
        }
        Ok(())
    }

    fn draw_cx(
        &self,
        pixmap: &mut Pixmap,
        geo: &Geometry,
        x: f32,
        control: QubitId,
        target: QubitId,
    ) -> Result<(), RenderError> {
        let dark = paint(0x1a, 0x23, 0x7e);
        let (cy, ty) = (geo.wire_y(control), geo.wire_y(target));
        let r = geo.box_size * 0.35;

        let wire = segments(&[[(x, cy), (x, ty)]])?;
        pixmap.stroke_path(&wire, &dark, &stroke(2.0), Transform::identity(), None);
        let dot = circle(x, cy, geo.box_size * 0.12)?;
        pixmap.fill_path(&dot, &dark, FillRule::Winding, Transform::identity(), None);

        // ⊕ on the target wire.
        let ring = circle(x, ty, r)?;
        pixmap.fill_path(
            &ring,
            &paint(0xff, 0xff, 0xff),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        pixmap.stroke_path(&ring, &dark, &stroke(2.0), Transform::identity(), None);
        let cross = segments(&[[(x - r, ty), (x + r, ty)], [(x, ty - r), (x, ty + r)]])?;
        pixmap.stroke_path(&cross, &dark, &stroke(2.0), Transform::identity(), None);
        Ok(())
    }

    fn draw_instruction(
        &self,
        pixmap: &mut Pixmap,
        geo: &Geometry,
        x: f32,
        instruction: &Instruction,
    ) -> Result<(), RenderError> {
        let target = instruction.target().ok_or_else(|| {
            RenderError::Geometry(format!("gate '{}' has no operands", instruction.gate))
        })?;
        match instruction.control() {
            Some(control) => self.draw_cx(pixmap, geo, x, control, target),
            None => {
                let y = geo.wire_y(target);
                self.draw_gate_box(pixmap, geo, x, y, instruction.gate.symbol())
            }
        }
    }
}

impl RasterBackend for SkiaBackend {
    fn name(&self) -> &str {
        "tiny-skia"
    }

    fn rasterize(
        &self,
        layout: &DiagramLayout,
        config: &RenderConfig,
    ) -> Result<Vec<u8>, RenderError> {
        let geo = Geometry::new(layout, config)?;
        let mut pixmap = Pixmap::new(geo.width, geo.height).ok_or(RenderError::Canvas {
            width: geo.width,
            height: geo.height,
        })?;
        pixmap.fill(Color::WHITE);

        self.draw_wires(&mut pixmap, &geo, layout.num_qubits())?;
        for (column, instructions) in layout.columns().iter().enumerate() {
            let x = geo.column_x(column);
            for instruction in instructions {
                self.draw_instruction(&mut pixmap, &geo, x, instruction)?;
            }
        }

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}
