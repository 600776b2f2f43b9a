//! Filter bar component renderer.
//!
//! Renders the search term, the three attribute selects, and the sort order.

use crate::ui::helpers::{BOLD, DIM, RESET};
use crate::ui::viewmodel::FilterBarInfo;
use std::fmt::Write;

/// Renders the filter bar as two lines: search and order, then attribute selects.
///
/// An unset select shows its "All ..." label; option counts hint at what the
/// select offers.
pub fn render_filter_bar(out: &mut String, bar: &FilterBarInfo) {
    let search = if bar.search.is_empty() {
        format!("{DIM}Search by name...{RESET}")
    } else {
        bar.search.clone()
    };
    let _ = writeln!(out, " Search: [{search}]   Order: {BOLD}{}{RESET}", bar.order.label());

    let _ = write!(out, " ");
    for select in &bar.filters {
        let value = select.selected.as_deref().unwrap_or(&select.any_label);
        let _ = write!(out, "[{value} {DIM}({}){RESET}] ", select.options.len());
    }
    out.push('\n');
}
