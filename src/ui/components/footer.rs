//! Footer component renderer.
//!
//! Renders keybinding hints in dim text, centered and truncated to the
//! terminal width.

use crate::ui::helpers::{centered, DIM, RESET};
use crate::ui::viewmodel::FooterInfo;
use std::fmt::Write;

/// Renders the footer help line.
///
/// Help text wider than `cols` is truncated so it never wraps.
pub fn render_footer(out: &mut String, footer: &FooterInfo, cols: usize) {
    let help_text: String = footer.keybindings.chars().take(cols).collect();
    let _ = writeln!(out, "{DIM}{}{RESET}", centered(&help_text, cols));
}
