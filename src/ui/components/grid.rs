//! Card grid component renderer.
//!
//! Renders one line per card: cursor marker, identifier, highlighted name,
//! favorite star, and the image URL to display.

use crate::ui::helpers::{self, BOLD, DIM, RESET, REVERSE};
use crate::ui::viewmodel::{CardItem, PagerInfo};
use std::fmt::Write;

/// Renders all cards in order.
pub fn render_cards(out: &mut String, cards: &[CardItem]) {
    for card in cards {
        render_card(out, card);
    }
}

fn render_card(out: &mut String, card: &CardItem) {
    let marker = if card.is_selected { '>' } else { ' ' };
    let star = if card.is_favorite { '★' } else { '☆' };

    if card.is_selected {
        out.push_str(REVERSE);
    }
    let _ = write!(out, "{marker} #{:03} ", card.id);
    if card.is_selected {
        // Underlined matches would be lost inside reverse video.
        out.push_str(&card.name);
        out.push_str(RESET);
    } else {
        helpers::write_highlighted(out, &card.name, &card.highlight_ranges);
    }
    let _ = writeln!(out, " {star}  {DIM}{}{RESET}", card.image.resolved());
}

/// Renders the pager line. Disabled buttons are dimmed.
pub fn render_pager(out: &mut String, pager: &PagerInfo) {
    let prev = if pager.prev_enabled {
        format!("{BOLD}< Prev (p){RESET}")
    } else {
        format!("{DIM}< Prev{RESET}")
    };
    let next = if pager.next_enabled {
        format!("{BOLD}(n) Next >{RESET}")
    } else {
        format!("{DIM}Next >{RESET}")
    };
    let _ = writeln!(out, " {prev}   {}   {next}", pager.label());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::ImageSource;

    fn card(selected: bool) -> CardItem {
        CardItem {
            id: 25,
            name: "Pikachu".into(),
            image: ImageSource {
                primary: None,
                fallback: "https://placehold.co/96x96/ADD8E6/000000?text=P".into(),
            },
            is_favorite: true,
            is_selected: selected,
            highlight_ranges: vec![(0, 4)],
        }
    }

    #[test]
    fn card_line_shows_id_star_and_fallback() {
        let mut out = String::new();
        render_cards(&mut out, &[card(false)]);

        assert!(out.contains("#025"));
        assert!(out.contains('★'));
        assert!(out.contains("text=P"));
        assert!(out.contains(helpers::UNDERLINE));
    }

    #[test]
    fn selected_card_is_reversed_without_highlight() {
        let mut out = String::new();
        render_cards(&mut out, &[card(true)]);

        assert!(out.starts_with(REVERSE));
        assert!(!out.contains(helpers::UNDERLINE));
    }
}
