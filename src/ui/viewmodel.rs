//! View model types representing renderable UI state.
//!
//! View models are computed from application state and contain display-ready
//! data only: capitalized names, image sources with their fallbacks, highlight
//! ranges, and enabled flags for the pager.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic.

use crate::catalog::{FilterField, SortOrder};
use crate::domain::Record;

const PLACEHOLDER_HOST: &str = "https://placehold.co";
const CARD_PLACEHOLDER_COLORS: &str = "ADD8E6/000000";
const GALLERY_PLACEHOLDER: &str = "https://placehold.co/96x96/E0E0E0/000000?text=No+Image";

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Title and navigation tabs.
    pub header: HeaderInfo,

    /// Card grid or detail panel.
    pub body: Body,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Main area of the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Grid(GridView),
    Details(DetailsView),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Navigation tabs in display order.
    pub nav: Vec<NavEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub active: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text. May be empty.
    pub subtitle: String,
}

/// An image reference with the URL to use when the primary is absent or fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub primary: Option<String>,
    pub fallback: String,
}

impl ImageSource {
    /// Card image: the record's front image, else a 96x96 placeholder with its initial.
    #[must_use]
    pub fn card(record: &Record) -> Self {
        Self {
            primary: record.image.clone(),
            fallback: placeholder(96, CARD_PLACEHOLDER_COLORS, &record.initial()),
        }
    }

    /// Detail portrait: same as the card image at 200x200.
    #[must_use]
    pub fn portrait(record: &Record) -> Self {
        Self {
            primary: record.image.clone(),
            fallback: placeholder(200, CARD_PLACEHOLDER_COLORS, &record.initial()),
        }
    }

    /// Gallery tile for a present image slot.
    #[must_use]
    pub fn gallery(src: &str) -> Self {
        Self {
            primary: Some(src.to_string()),
            fallback: GALLERY_PLACEHOLDER.to_string(),
        }
    }

    /// URL to display: the primary when present, otherwise the fallback.
    #[must_use]
    pub fn resolved(&self) -> &str {
        self.primary.as_deref().unwrap_or(&self.fallback)
    }
}

fn placeholder(size: u32, colors: &str, text: &str) -> String {
    format!("{PLACEHOLDER_HOST}/{size}x{size}/{colors}?text={text}")
}

/// List or favorites screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub heading: String,
    pub filter_bar: FilterBarInfo,
    pub cards: Vec<CardItem>,

    /// Present when there are no cards and nothing is loading.
    pub empty_state: Option<EmptyState>,

    /// Present in the list view once more than one page exists.
    pub pager: Option<PagerInfo>,

    /// Non-blocking failure notice, e.g. a page that could not be loaded.
    pub notice: Option<String>,

    /// A page fetch is in flight.
    pub loading: bool,
}

/// One record card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub id: u32,

    /// Display name, first letter capitalized.
    pub name: String,

    pub image: ImageSource,
    pub is_favorite: bool,
    pub is_selected: bool,

    /// Character ranges of the display name matching the search term.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Search box, attribute selects, and order select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub search: String,
    pub filters: Vec<FilterSelect>,
    pub order: SortOrder,
    pub order_options: Vec<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelect {
    pub field: FilterField,

    /// Label of the "no filter" entry, e.g. "All abilities".
    pub any_label: String,

    pub selected: Option<String>,

    /// Distinct values of the shown records in first-appearance order.
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerInfo {
    pub current: u32,
    pub total: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PagerInfo {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }
}

/// Detail screen in one of its phases.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsView {
    Loading { name: String },
    Failed { message: String, back_label: String },
    Loaded(Box<DetailsPanel>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsPanel {
    pub id: u32,
    pub name: String,
    pub is_favorite: bool,
    pub portrait: ImageSource,
    pub attributes: Vec<AttributeRow>,

    /// Only the image slots the record actually has.
    pub gallery: Vec<GalleryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub label: String,
    pub value: String,
}

impl AttributeRow {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub label: String,
    pub image: ImageSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_use_initial() {
        let record = Record::new(1, "bulbasaur", "bulbasaur");
        assert_eq!(
            ImageSource::card(&record).resolved(),
            "https://placehold.co/96x96/ADD8E6/000000?text=B"
        );
        assert_eq!(
            ImageSource::portrait(&record).fallback,
            "https://placehold.co/200x200/ADD8E6/000000?text=B"
        );
    }

    #[test]
    fn primary_wins_when_present() {
        let record = Record::new(1, "bulbasaur", "bulbasaur").with_image("https://img/1.png");
        assert_eq!(ImageSource::card(&record).resolved(), "https://img/1.png");
    }

    #[test]
    fn pager_label() {
        let pager = PagerInfo {
            current: 3,
            total: 66,
            prev_enabled: true,
            next_enabled: true,
        };
        assert_eq!(pager.label(), "Page 3 of 66");
    }
}
