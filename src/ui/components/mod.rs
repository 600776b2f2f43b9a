//! Composable UI component renderers.
//!
//! Each component appends its part of the screen to a `String` buffer so the
//! whole frame can be written in one go.
//!
//! # Components
//!
//! - [`header`]: Title bar and navigation tabs
//! - [`filter_bar`]: Search term, attribute selects, sort order
//! - [`grid`]: Record cards and the pager
//! - [`details`]: Detail view in its loading, failed, or loaded phase
//! - [`empty`]: Empty state message
//! - [`footer`]: Keybinding hints
//!
//! # Layout Modes
//!
//! - [`render_grid_mode`]: Header + Filter bar + Cards + Pager + Footer
//! - [`render_details_mode`]: Header + Details + Footer

mod details;
mod empty;
mod filter_bar;
mod footer;
mod grid;
mod header;

pub use empty::render_empty_state;

use crate::ui::helpers::{BOLD, DIM, RESET};
use crate::ui::viewmodel::{DetailsView, GridView, UIViewModel};
use std::fmt::Write;

use details::render_details;
use filter_bar::render_filter_bar;
use footer::render_footer;
use grid::{render_cards, render_pager};
use header::render_header;

/// Appends a horizontal border line.
fn render_border(out: &mut String, cols: usize) {
    let _ = writeln!(out, "{DIM}{}{RESET}", "─".repeat(cols));
}

/// Renders the list or favorites layout.
///
/// Layout structure:
/// ```text
/// [Header]
/// [Border]
/// [Heading]
/// [Filter bar - 2 lines]
/// [Notice, if any]
/// [Cards | Loading | Empty state]
/// [Pager, if any]
/// [Border]
/// [Footer]
/// ```
pub fn render_grid_mode(out: &mut String, vm: &UIViewModel, grid: &GridView, cols: usize) {
    render_header(out, &vm.header, cols);
    render_border(out, cols);

    let _ = writeln!(out, "{BOLD}{}{RESET}", grid.heading);
    render_filter_bar(out, &grid.filter_bar);

    if let Some(notice) = &grid.notice {
        let _ = writeln!(out, " ! {notice} Press r to retry.");
    }

    if grid.loading && grid.cards.is_empty() {
        let _ = writeln!(out, "{DIM}Loading...{RESET}");
    } else if let Some(empty) = &grid.empty_state {
        render_empty_state(out, empty, cols);
    } else {
        render_cards(out, &grid.cards);
        if grid.loading {
            let _ = writeln!(out, "{DIM}Loading...{RESET}");
        }
    }

    if let Some(pager) = &grid.pager {
        render_pager(out, pager);
    }

    render_border(out, cols);
    render_footer(out, &vm.footer, cols);
}

/// Renders the detail layout.
pub fn render_details_mode(out: &mut String, vm: &UIViewModel, details: &DetailsView, cols: usize) {
    render_header(out, &vm.header, cols);
    render_border(out, cols);
    render_details(out, details, cols);
    render_border(out, cols);
    render_footer(out, &vm.footer, cols);
}
