//! Header component renderer.
//!
//! Renders the centered title followed by the navigation tabs. The active tab
//! is shown in reverse video.

use crate::ui::helpers::{centered, BOLD, RESET, REVERSE};
use crate::ui::viewmodel::HeaderInfo;
use std::fmt::Write;

/// Renders the header title line and the navigation line.
///
/// # Layout
///
/// ```text
///                 Pokédex
///  Pokémon List   My Favorites (2)
/// ```
pub fn render_header(out: &mut String, header: &HeaderInfo, cols: usize) {
    let _ = writeln!(out, "{BOLD}{}{RESET}", centered(&header.title, cols));

    for entry in &header.nav {
        if entry.active {
            let _ = write!(out, " {REVERSE} {} {RESET}", entry.label);
        } else {
            let _ = write!(out, "  {} ", entry.label);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::NavEntry;

    #[test]
    fn active_tab_is_reversed() {
        let header = HeaderInfo {
            title: "Pokédex".into(),
            nav: vec![
                NavEntry { label: "Pokémon List".into(), active: false },
                NavEntry { label: "My Favorites (0)".into(), active: true },
            ],
        };
        let mut out = String::new();
        render_header(&mut out, &header, 20);

        assert!(out.contains("Pokédex"));
        assert!(out.contains(&format!("{REVERSE} My Favorites (0) {RESET}")));
        assert!(!out.contains(&format!("{REVERSE} Pokémon List")));
    }
}
