//! Rendering: draws the lattice, plaquettes and selection to a [`Surface`].
//!
//! [`draw_scene`] reads the workspace, camera and UI state and issues draw
//! calls in screen space (CSS pixels). It never mutates application state and
//! knows nothing about the browser; the only browser-facing piece is the
//! [`Surface`] impl for [`web_sys::CanvasRenderingContext2d`] at the bottom.
//!
//! Layers, bottom to top:
//! 1. lattice links between neighboring qubits
//! 2. plaquettes in creation order, with the selected one outlined dashed
//! 3. qubits colored by role, with selection and hover rings

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Camera;
use crate::consts::{PLAQUETTE_ALPHA, QUBIT_RADIUS, SELECTION_DASH_PX};
use crate::geometry::Point;
use crate::input::UiState;
use crate::lattice::{Direction, QubitRole};
use crate::workspace::WorkspaceController;

const LINK_STROKE: &str = "#d0ccc4";
const OUTLINE_STROKE: &str = "#1f1a17";
const SELECTION_STROKE: &str = "#1E90FF";
const QUBIT_STROKE: &str = "#1f1a17";
const LABEL_FILL: &str = "#ffffff";

/// Zoom below which role letters are not drawn.
const LABEL_MIN_ZOOM: f64 = 0.75;

/// Drawing primitives in screen space.
pub trait Surface {
    type Error;

    /// Reset the surface to a blank `width × height` CSS-pixel viewport.
    fn clear(&mut self, width: f64, height: f64, dpr: f64) -> Result<(), Self::Error>;
    fn fill_polygon(&mut self, points: &[Point], fill: &str, alpha: f64) -> Result<(), Self::Error>;
    /// Closed outline; `dash` is the dash segment length, `None` for solid.
    fn stroke_polygon(&mut self, points: &[Point], stroke: &str, width: f64, dash: Option<f64>) -> Result<(), Self::Error>;
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str) -> Result<(), Self::Error>;
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &str, width: f64) -> Result<(), Self::Error>;
    fn line(&mut self, a: Point, b: Point, stroke: &str, width: f64) -> Result<(), Self::Error>;
    /// Text centered on `at`.
    fn text(&mut self, at: Point, text: &str, fill: &str) -> Result<(), Self::Error>;
}

/// Read-only view of everything a frame needs.
pub struct Scene<'a> {
    pub workspace: &'a WorkspaceController,
    pub camera: &'a Camera,
    pub ui: &'a UiState,
    /// Viewport width in CSS pixels.
    pub viewport_w: f64,
    /// Viewport height in CSS pixels.
    pub viewport_h: f64,
    pub dpr: f64,
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns the first error reported by `surface`.
pub fn draw_scene<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    surface.clear(scene.viewport_w, scene.viewport_h, scene.dpr)?;
    draw_links(surface, scene)?;
    draw_plaquettes(surface, scene)?;
    draw_qubits(surface, scene)
}

/// Fill color for a qubit of `role`.
#[must_use]
pub fn role_fill(role: QubitRole) -> &'static str {
    match role {
        QubitRole::None => "#ffffff",
        QubitRole::XData => "#d94b4b",
        QubitRole::ZData => "#5cb85c",
        QubitRole::Ancilla => "#1f1a17",
    }
}

fn role_label(role: QubitRole) -> Option<&'static str> {
    match role {
        QubitRole::None => None,
        QubitRole::XData => Some("X"),
        QubitRole::ZData => Some("Z"),
        QubitRole::Ancilla => Some("A"),
    }
}

// =============================================================
// Layers
// =============================================================

fn draw_links<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let grid = scene.workspace.grid();
    // Right and Down links cover every edge exactly once.
    for node in grid.iter() {
        for dir in [Direction::Right, Direction::Down] {
            let Some(other) = node.neighbor(dir).and_then(|n| grid.position(n)) else {
                continue;
            };
            let a = scene.camera.world_to_screen(node.position);
            let b = scene.camera.world_to_screen(other);
            surface.line(a, b, LINK_STROKE, 1.0)?;
        }
    }
    Ok(())
}

fn draw_plaquettes<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let selected = scene.workspace.selected();
    for plaquette in scene.workspace.plaquettes() {
        let outline: Vec<Point> = plaquette
            .boundary
            .iter()
            .map(|p| scene.camera.world_to_screen(*p))
            .collect();
        surface.fill_polygon(&outline, &plaquette.color.to_css(), PLAQUETTE_ALPHA)?;
        surface.stroke_polygon(&outline, OUTLINE_STROKE, 1.5, None)?;
        if selected == Some(plaquette.id) {
            surface.stroke_polygon(&outline, SELECTION_STROKE, 2.0, Some(SELECTION_DASH_PX))?;
        }
    }
    Ok(())
}

fn draw_qubits<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let zoom = scene.camera.zoom;
    let radius = QUBIT_RADIUS * zoom;
    let selection = scene.workspace.selection();
    for node in scene.workspace.grid().iter() {
        let center = scene.camera.world_to_screen(node.position);
        surface.fill_circle(center, radius, role_fill(node.role))?;
        surface.stroke_circle(center, radius, QUBIT_STROKE, 1.0)?;
        if selection.contains(node.id) {
            surface.stroke_circle(center, radius + 3.0, SELECTION_STROKE, 2.0)?;
        } else if scene.ui.hover_qubit == Some(node.id) {
            surface.stroke_circle(center, radius + 3.0, SELECTION_STROKE, 1.0)?;
        }
        if zoom >= LABEL_MIN_ZOOM {
            if let Some(label) = role_label(node.role) {
                surface.text(center, label, LABEL_FILL)?;
            }
        }
    }
    Ok(())
}

// =============================================================
// Canvas 2D
// =============================================================

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64, dpr: f64) -> Result<(), JsValue> {
        self.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        self.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], fill: &str, alpha: f64) -> Result<(), JsValue> {
        self.save();
        trace_polygon(self, points);
        self.set_global_alpha(alpha);
        self.set_fill_style_str(fill);
        self.fill();
        self.restore();
        Ok(())
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: &str, width: f64, dash: Option<f64>) -> Result<(), JsValue> {
        self.save();
        if let Some(len) = dash {
            let dash_array = js_sys::Array::new();
            dash_array.push(&len.into());
            dash_array.push(&len.into());
            self.set_line_dash(&dash_array)?;
        }
        trace_polygon(self, points);
        self.set_stroke_style_str(stroke);
        self.set_line_width(width);
        self.stroke();
        self.restore();
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
        self.set_fill_style_str(fill);
        self.fill();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &str, width: f64) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
        self.set_stroke_style_str(stroke);
        self.set_line_width(width);
        self.stroke();
        Ok(())
    }

    fn line(&mut self, a: Point, b: Point, stroke: &str, width: f64) -> Result<(), JsValue> {
        self.begin_path();
        self.move_to(a.x, a.y);
        self.line_to(b.x, b.y);
        self.set_stroke_style_str(stroke);
        self.set_line_width(width);
        self.stroke();
        Ok(())
    }

    fn text(&mut self, at: Point, text: &str, fill: &str) -> Result<(), JsValue> {
        self.set_font("bold 9px sans-serif");
        self.set_text_align("center");
        self.set_text_baseline("middle");
        self.set_fill_style_str(fill);
        self.fill_text(text, at.x, at.y)
    }
}

fn trace_polygon(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    ctx.begin_path();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        ctx.move_to(first.x, first.y);
    }
    for p in iter {
        ctx.line_to(p.x, p.y);
    }
    ctx.close_path();
}
