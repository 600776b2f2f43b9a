//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! The result is a complete frame as a string; writing it to the terminal is
//! the caller's concern.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Renders the current state into a frame `cols` columns wide.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, cols)
}

/// Renders a pre-computed view model with the layout matching its body.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, cols: usize) -> String {
    let mut out = String::new();
    match &vm.body {
        Body::Grid(grid) => components::render_grid_mode(&mut out, vm, grid, cols),
        Body::Details(details) => components::render_details_mode(&mut out, vm, details, cols),
    }
    out
}
