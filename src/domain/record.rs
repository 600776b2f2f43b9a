//! Catalog record models at two levels of completeness.
//!
//! A [`Record`] is the summary form shown on list cards and stored in the
//! favorites collection. [`RecordDetails`] is the detail form fetched on demand
//! for the detail view and never cached.

use serde::{Deserialize, Serialize};

/// Summary form of a catalog entry.
///
/// Built when a page is enriched and immutable afterwards. The serialized shape
/// (`id`, `name`, `image`, `abilities`, `types`, `species`) is also the
/// persisted favorites format, so field names must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier assigned by the web service.
    pub id: u32,

    /// Display name, unique per identifier.
    pub name: String,

    /// Default front sprite URL, if the service has one.
    #[serde(default)]
    pub image: Option<String>,

    /// Ability names in service order.
    #[serde(default)]
    pub abilities: Vec<String>,

    /// Type names in service order.
    #[serde(default)]
    pub types: Vec<String>,

    /// Species name.
    #[serde(default)]
    pub species: String,
}

impl Record {
    /// Creates a record with no image, abilities, or types.
    ///
    /// # Examples
    ///
    /// ```
    /// use dexview::Record;
    ///
    /// let record = Record::new(25, "pikachu", "pikachu");
    /// assert_eq!(record.id, 25);
    /// assert!(record.image.is_none());
    /// ```
    pub fn new(id: u32, name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
            abilities: Vec::new(),
            types: Vec::new(),
            species: species.into(),
        }
    }

    /// Sets the sprite URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the ability names.
    #[must_use]
    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the type names.
    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Upper-cased first letter of the name, used for placeholder glyphs.
    ///
    /// Returns `"?"` for an empty name.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }
}

/// Named image slots shown in the detail gallery, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Front,
    Back,
    FrontShiny,
    BackShiny,
    DreamWorld,
    OfficialArtwork,
}

impl ImageSlot {
    /// All six slots in gallery order.
    pub const ALL: [Self; 6] = [
        Self::Front,
        Self::Back,
        Self::FrontShiny,
        Self::BackShiny,
        Self::DreamWorld,
        Self::OfficialArtwork,
    ];

    /// Caption shown under the slot's image.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
            Self::FrontShiny => "Front Shiny",
            Self::BackShiny => "Back Shiny",
            Self::DreamWorld => "Dream World",
            Self::OfficialArtwork => "Official Artwork",
        }
    }
}

/// Image references carried by the detail form. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front: Option<String>,
    pub back: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
    pub dream_world: Option<String>,
    pub official_artwork: Option<String>,
}

impl Sprites {
    /// Returns the reference stored in a slot.
    #[must_use]
    pub fn get(&self, slot: ImageSlot) -> Option<&str> {
        match slot {
            ImageSlot::Front => self.front.as_deref(),
            ImageSlot::Back => self.back.as_deref(),
            ImageSlot::FrontShiny => self.front_shiny.as_deref(),
            ImageSlot::BackShiny => self.back_shiny.as_deref(),
            ImageSlot::DreamWorld => self.dream_world.as_deref(),
            ImageSlot::OfficialArtwork => self.official_artwork.as_deref(),
        }
    }

    /// Present slots with their references, in gallery order.
    pub fn present(&self) -> impl Iterator<Item = (ImageSlot, &str)> {
        ImageSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|src| (slot, src)))
    }
}

/// Detail form of a catalog entry: a superset of [`Record`].
///
/// Height and weight keep the service's units (decimetres and hectograms).
/// Conversion to metres and kilograms happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetails {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Absent for some entries in the service data.
    pub base_experience: Option<u32>,
    pub order: i32,
    pub abilities: Vec<String>,
    pub types: Vec<String>,
    pub species: String,
    pub sprites: Sprites,
}

impl RecordDetails {
    /// Projects the detail form onto the summary form used by list cards.
    #[must_use]
    pub fn summary(&self) -> Record {
        Record {
            id: self.id,
            name: self.name.clone(),
            image: self.sprites.front.clone(),
            abilities: self.abilities.clone(),
            types: self.types.clone(),
            species: self.species.clone(),
        }
    }
}
