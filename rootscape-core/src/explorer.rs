//! Top-level controller owning the view state and its collaborators.
//!
//! Every input event is handled synchronously and triggers at most one full
//! refresh, so collaborators never observe a half-applied gesture.

use crate::config::ExplorerConfig;
use crate::handles::{HandleRegistry, OverlayPainter};
use crate::interaction::{Gesture, GestureInput, InteractionMachine, Update};
use crate::refresh::{refresh_view, LabelSink, ShaderParams};
use crate::view::ViewState;

pub struct Explorer<S, O, L> {
    state: ViewState,
    machine: InteractionMachine,
    handles: HandleRegistry,
    shader: S,
    overlay: O,
    labels: L,
}

impl<S, O, L> Explorer<S, O, L>
where
    S: ShaderParams,
    O: OverlayPainter,
    L: LabelSink,
{
    /// Upload the initial parameters and draw the first frame.
    ///
    /// `canvas_size` is in device pixels and must be non-zero.
    pub fn new(
        config: &ExplorerConfig,
        canvas_size: (u32, u32),
        shader: S,
        overlay: O,
        labels: L,
    ) -> Self {
        let mut explorer = Self {
            state: config.initial_state(canvas_size),
            machine: InteractionMachine::new(config.interaction),
            handles: HandleRegistry::new(config.handle),
            shader,
            overlay,
            labels,
        };

        explorer.shader.set_colors(&explorer.state.colors);
        explorer.shader.set_roots(&explorer.state.roots);
        explorer.shader.set_iterations(explorer.state.view.iterations);
        explorer.refresh();

        log::info!(
            "Explorer ready: {} roots on a {}x{} canvas",
            explorer.state.roots.len(),
            canvas_size.0,
            canvas_size.1
        );
        explorer
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }

    pub fn gesture(&self) -> Gesture {
        self.machine.gesture()
    }

    pub fn shader(&self) -> &S {
        &self.shader
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }

    pub fn pointer_down(&mut self, input: GestureInput) {
        self.machine
            .pointer_down(input, &self.state.view, &self.handles);
    }

    pub fn pointer_move(&mut self, input: GestureInput) -> Update {
        let update =
            self.machine
                .pointer_move(input, &mut self.state.view, &mut self.state.roots);
        self.apply(update);
        update
    }

    pub fn pointer_up(&mut self) {
        self.machine.pointer_up();
    }

    pub fn wheel(&mut self, input: GestureInput, delta_y: f64) -> Update {
        let update = self.machine.wheel(input, delta_y, &mut self.state.view);
        self.apply(update);
        update
    }

    /// Follow a change of the visible area, given in CSS pixels.
    ///
    /// The caller skips zero-sized layouts.
    pub fn resize(&mut self, css_width: f64, css_height: f64) {
        self.state.view.resize_css(css_width, css_height);
        log::debug!("resized canvas to {:?}", self.state.view.canvas_size);
        self.refresh();
    }

    /// Apply an already clamped iteration count and redraw.
    ///
    /// Only the shader depends on the iteration count, so handles and labels
    /// are left alone.
    pub fn set_iterations(&mut self, iterations: u32) {
        self.state.view.iterations = iterations;
        self.shader.set_iterations(iterations);
        self.shader.request_redraw();
    }

    fn apply(&mut self, update: Update) {
        match update {
            Update::Unchanged => {}
            Update::ViewMoved => self.refresh(),
            Update::RootMoved(_) => {
                self.shader.set_roots(&self.state.roots);
                self.refresh();
            }
        }
    }

    fn refresh(&mut self) {
        refresh_view(
            &self.state.view,
            &self.state.roots,
            &self.state.colors,
            &mut self.handles,
            &mut self.shader,
            &mut self.overlay,
            &mut self.labels,
        );
    }
}
