//! Detail view component renderer.

use crate::ui::helpers::{centered, BOLD, DIM, RESET};
use crate::ui::viewmodel::{DetailsPanel, DetailsView};
use std::fmt::Write;

/// Renders the detail view in its current phase.
pub fn render_details(out: &mut String, details: &DetailsView, cols: usize) {
    match details {
        DetailsView::Loading { name } => {
            let _ = writeln!(out, "\n{}", centered(name, cols));
            let _ = writeln!(out, "{DIM}{}{RESET}", centered("Loading Pokémon details...", cols));
        }
        DetailsView::Failed { message, back_label } => {
            let _ = writeln!(out, "\n{}", centered(message, cols));
            let _ = writeln!(out, "{}", centered(&format!("[{back_label} (b)]"), cols));
        }
        DetailsView::Loaded(panel) => render_panel(out, panel),
    }
}

fn render_panel(out: &mut String, panel: &DetailsPanel) {
    let star = if panel.is_favorite {
        "★ Remove from favorites"
    } else {
        "☆ Add to favorites"
    };

    let _ = writeln!(out, "{BOLD}#{:03} {}{RESET}   {star} (*)", panel.id, panel.name);
    let _ = writeln!(out, "{DIM}{}{RESET}", panel.portrait.resolved());
    out.push('\n');

    let width = panel
        .attributes
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);
    for row in &panel.attributes {
        let _ = writeln!(out, " {:<width$}  {}", row.label, row.value);
    }

    if panel.gallery.is_empty() {
        return;
    }

    let _ = writeln!(out, "\n{BOLD}Images{RESET}");
    for item in &panel.gallery {
        let _ = writeln!(out, " {:<16} {DIM}{}{RESET}", item.label, item.image.resolved());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{AttributeRow, GalleryItem, ImageSource};

    #[test]
    fn panel_lists_attributes_and_gallery() {
        let panel = DetailsPanel {
            id: 1,
            name: "Bulbasaur".into(),
            is_favorite: false,
            portrait: ImageSource::gallery("https://img/1.png"),
            attributes: vec![AttributeRow::new("Height", "0.7 m")],
            gallery: vec![GalleryItem {
                label: "Front".into(),
                image: ImageSource::gallery("https://img/1.png"),
            }],
        };
        let mut out = String::new();
        render_details(&mut out, &DetailsView::Loaded(Box::new(panel)), 40);

        assert!(out.contains("#001 Bulbasaur"));
        assert!(out.contains("Height  0.7 m"));
        assert!(out.contains("Front"));
        assert!(out.contains("Add to favorites"));
    }
}
