//! Editor engine: turns pointer, wheel and key events into workspace mutations.
//!
//! [`EngineCore`] holds everything that does not need the browser, so the
//! whole interaction model is testable natively. [`Engine`] adds the canvas
//! element and its 2D context and forwards to the core.
//!
//! Every handler returns the [`Action`]s the host should react to (toasts,
//! cursor changes, persistence hooks, redraws). Failures never escape as
//! errors: they become `Action::Notify` and leave the workspace unchanged.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::Camera;
use crate::consts::{DRAG_THRESHOLD_PX, ZOOM_STEP};
use crate::extend::direction_from_drag;
use crate::geometry::Point;
use crate::hit::{self, Hit};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::lattice::{GridModel, LatticeConfig, LatticeError, QubitId, QubitRole};
use crate::plaquette::{Color, PlaquetteId};
use crate::render;
use crate::workspace::{WorkspaceController, WorkspaceError};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The qubit selection now holds exactly these qubits, in click order.
    SelectionChanged(Vec<QubitId>),
    RoleChanged { qubit: QubitId, role: QubitRole },
    PlaquetteCreated(PlaquetteId),
    PlaquetteRemoved(PlaquetteId),
    PlaquetteSelected(Option<PlaquetteId>),
    PlaquetteCommitted(PlaquetteId),
    /// User-facing message, shown as a transient toast.
    Notify(String),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    pub workspace: WorkspaceController,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new(workspace: WorkspaceController) -> Self {
        Self {
            workspace,
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    /// Build a core over a fresh checkerboard lattice.
    ///
    /// # Errors
    ///
    /// Any [`LatticeError`] from building the grid.
    pub fn with_lattice(config: &LatticeConfig) -> Result<Self, LatticeError> {
        Ok(Self::new(WorkspaceController::new(GridModel::checkerboard(config)?)))
    }

    // --- Tool / viewport ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || modifiers.alt {
            self.input = InputState::Panning { last_screen: screen_pt };
            return vec![Action::SetCursor("grabbing".into())];
        }

        let world = self.camera.screen_to_world(screen_pt);
        match hit::hit_test(world, self.workspace.grid(), self.workspace.plaquettes(), &self.camera) {
            Some(Hit::Qubit(id)) => self.click_qubit(id),
            Some(Hit::Plaquette(id)) => {
                self.input = InputState::DraggingPlaquette { id, origin_screen: screen_pt, clones: 0 };
                let mut actions = vec![Action::SetCursor("grabbing".into())];
                if self.workspace.selected() != Some(id) {
                    actions.extend(self.apply(|ws| ws.select_plaquette(Some(id)).map(|()| {
                        vec![Action::PlaquetteSelected(Some(id)), Action::RenderNeeded]
                    })));
                }
                actions
            }
            None => {
                self.input = InputState::Panning { last_screen: screen_pt };
                let mut actions = vec![Action::SetCursor("grabbing".into())];
                if self.workspace.selected().is_some() {
                    actions.extend(self.apply(|ws| {
                        ws.select_plaquette(None)
                            .map(|()| vec![Action::PlaquetteSelected(None), Action::RenderNeeded])
                    }));
                }
                actions
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input.clone() {
            InputState::Idle => self.update_hover(screen_pt),
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingPlaquette { id, origin_screen, clones } => {
                let dx = screen_pt.x - origin_screen.x;
                let dy = screen_pt.y - origin_screen.y;
                let Some(dir) = direction_from_drag(dx, dy, DRAG_THRESHOLD_PX) else {
                    return Vec::new();
                };
                match self.workspace.extend_plaquette(id, dir) {
                    Ok(clone) => {
                        self.input =
                            InputState::DraggingPlaquette { id: clone, origin_screen: screen_pt, clones: clones + 1 };
                        vec![
                            Action::PlaquetteCreated(clone),
                            Action::PlaquetteSelected(Some(clone)),
                            Action::RenderNeeded,
                        ]
                    }
                    Err(e) => {
                        // Re-base so the same failure isn't reported on every move.
                        self.input = InputState::DraggingPlaquette { id, origin_screen: screen_pt, clones };
                        vec![notify(&e)]
                    }
                }
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let was_idle = matches!(self.input, InputState::Idle);
        self.input = InputState::Idle;
        if was_idle {
            Vec::new()
        } else {
            vec![Action::SetCursor("default".into())]
        }
    }

    // --- Wheel ---

    /// Ctrl/Meta + wheel zooms about the pointer; plain wheel pans.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.ctrl || modifiers.meta {
            let factor = ZOOM_STEP.powf(-delta.dy / 100.0);
            self.camera.zoom_at(screen_pt, factor);
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        vec![Action::RenderNeeded]
    }

    // --- Keys ---

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        match key.normalized().as_str() {
            "Enter" => self.build(),
            "Escape" => self.clear(),
            "Delete" | "Backspace" => self.remove_selected(),
            "c" => self.apply(|ws| {
                let id = ws.commit_plaquette()?;
                Ok(vec![Action::PlaquetteCommitted(id), Action::RenderNeeded])
            }),
            "r" => self.rotate_selected(),
            _ => Vec::new(),
        }
    }

    // --- Commands ---

    /// Recolor the selected plaquette.
    pub fn recolor_selected(&mut self, color: Color) -> Vec<Action> {
        self.apply(|ws| {
            let old = ws.selected().ok_or(WorkspaceError::NoPlaquetteSelected)?;
            let new = ws.recolor_plaquette(old, color)?;
            Ok(replaced(old, new))
        })
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn selected_plaquette(&self) -> Option<PlaquetteId> {
        self.workspace.selected()
    }

    // --- Internals ---

    /// Run a workspace operation, turning its error into a toast.
    fn apply<F>(&mut self, op: F) -> Vec<Action>
    where
        F: FnOnce(&mut WorkspaceController) -> Result<Vec<Action>, WorkspaceError>,
    {
        match op(&mut self.workspace) {
            Ok(actions) => actions,
            Err(e) => vec![notify(&e)],
        }
    }

    fn click_qubit(&mut self, id: QubitId) -> Vec<Action> {
        match self.ui.tool {
            Tool::Select => self.apply(|ws| {
                ws.toggle_qubit(id)?;
                Ok(vec![Action::SelectionChanged(ws.selection().as_slice().to_vec()), Action::RenderNeeded])
            }),
            Tool::AssignRole => self.apply(|ws| {
                let role = ws.cycle_role(id)?;
                Ok(vec![Action::RoleChanged { qubit: id, role }, Action::RenderNeeded])
            }),
        }
    }

    fn build(&mut self) -> Vec<Action> {
        self.apply(|ws| {
            let id = ws.build_plaquette()?;
            Ok(vec![
                Action::PlaquetteCreated(id),
                Action::PlaquetteSelected(Some(id)),
                Action::SelectionChanged(Vec::new()),
                Action::RenderNeeded,
            ])
        })
    }

    fn clear(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        let before: Vec<PlaquetteId> = self.workspace.plaquettes().iter().map(|p| p.id).collect();
        let had_selected = self.workspace.selected().is_some();
        self.workspace.clear_session();

        let mut actions: Vec<Action> = before
            .into_iter()
            .filter(|id| self.workspace.plaquette(*id).is_none())
            .map(Action::PlaquetteRemoved)
            .collect();
        if had_selected && self.workspace.selected().is_none() {
            actions.push(Action::PlaquetteSelected(None));
        }
        actions.push(Action::SelectionChanged(Vec::new()));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn remove_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.workspace.selected() else {
            return Vec::new();
        };
        self.apply(|ws| {
            ws.remove_plaquette(id)?;
            Ok(vec![Action::PlaquetteRemoved(id), Action::PlaquetteSelected(None), Action::RenderNeeded])
        })
    }

    fn rotate_selected(&mut self) -> Vec<Action> {
        self.apply(|ws| {
            let old = ws.selected().ok_or(WorkspaceError::NoPlaquetteSelected)?;
            let new = ws.rotate_plaquette(old)?;
            Ok(replaced(old, new))
        })
    }

    fn update_hover(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        let hover = match hit::hit_test(world, self.workspace.grid(), &[], &self.camera) {
            Some(Hit::Qubit(id)) => Some(id),
            _ => None,
        };
        if hover == self.ui.hover_qubit {
            return Vec::new();
        }
        self.ui.hover_qubit = hover;
        let cursor = if hover.is_some() { "pointer" } else { "default" };
        vec![Action::SetCursor(cursor.into()), Action::RenderNeeded]
    }
}

fn notify(err: &WorkspaceError) -> Action {
    log::warn!("workspace operation failed: {err}");
    Action::Notify(err.to_string())
}

fn replaced(old: PlaquetteId, new: PlaquetteId) -> Vec<Action> {
    vec![
        Action::PlaquetteRemoved(old),
        Action::PlaquetteCreated(new),
        Action::PlaquetteSelected(Some(new)),
        Action::RenderNeeded,
    ]
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, drawing through its 2D context.
    ///
    /// # Errors
    ///
    /// Fails if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, core: EngineCore) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("2d context has an unexpected type"))?;
        Ok(Self { canvas, ctx, core })
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the backing store to match the device pixel ratio.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn recolor_selected(&mut self, color: Color) -> Vec<Action> {
        self.core.recolor_selected(color)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let scene = render::Scene {
            workspace: &self.core.workspace,
            camera: &self.core.camera,
            ui: &self.core.ui,
            viewport_w: self.core.viewport_width,
            viewport_h: self.core.viewport_height,
            dpr: self.core.dpr,
        };
        render::draw_scene(&mut self.ctx, &scene)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn selected_plaquette(&self) -> Option<PlaquetteId> {
        self.core.selected_plaquette()
    }
}
