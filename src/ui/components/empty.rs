//! Empty state component renderer.
//!
//! Renders the message shown when a grid has no cards to display.

use crate::ui::helpers::{centered, DIM, RESET};
use crate::ui::viewmodel::EmptyState;
use std::fmt::Write;

/// Renders the empty state message and, if present, its subtitle.
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE
/// [left padding] subtitle
/// ```
pub fn render_empty_state(out: &mut String, empty: &EmptyState, cols: usize) {
    out.push('\n');
    let _ = writeln!(out, "{}", centered(&empty.message, cols));

    if !empty.subtitle.is_empty() {
        let _ = writeln!(out, "{DIM}{}{RESET}", centered(&empty.subtitle, cols));
    }
}
