//! Wire shapes of the consumed web service.
//!
//! Only the fields the viewer reads are modeled. Unknown fields are ignored by
//! serde, so additions on the service side never break decoding.

use crate::domain::{RecordDetails, Sprites};
use serde::Deserialize;

/// One page of the `/pokemon` listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageListing {
    /// Total number of records the service reports across all pages.
    pub count: u32,

    /// Names and detail URLs for the requested window.
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// A `{ name, url }` reference used throughout the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
struct FrontImage {
    front_default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OtherSprites {
    #[serde(default)]
    dream_world: FrontImage,
    #[serde(default, rename = "official-artwork")]
    official_artwork: FrontImage,
}

#[derive(Debug, Default, Deserialize)]
struct SpritePayload {
    front_default: Option<String>,
    back_default: Option<String>,
    front_shiny: Option<String>,
    back_shiny: Option<String>,
    #[serde(default)]
    other: OtherSprites,
}

/// Detail payload served by `/pokemon/{id}/` and by each listing URL.
#[derive(Debug, Deserialize)]
pub struct RecordPayload {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    base_experience: Option<u32>,
    #[serde(default)]
    order: i32,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    species: NamedResource,
    #[serde(default)]
    sprites: SpritePayload,
}

impl From<RecordPayload> for RecordDetails {
    fn from(payload: RecordPayload) -> Self {
        let sprites = payload.sprites;
        Self {
            id: payload.id,
            name: payload.name,
            height: payload.height,
            weight: payload.weight,
            base_experience: payload.base_experience,
            order: payload.order,
            abilities: payload.abilities.into_iter().map(|slot| slot.ability.name).collect(),
            types: payload.types.into_iter().map(|slot| slot.kind.name).collect(),
            species: payload.species.name,
            sprites: Sprites {
                front: sprites.front_default,
                back: sprites.back_default,
                front_shiny: sprites.front_shiny,
                back_shiny: sprites.back_shiny,
                dream_world: sprites.other.dream_world.front_default,
                official_artwork: sprites.other.official_artwork.front_default,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PIKACHU: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "height": 4,
        "weight": 60,
        "base_experience": 112,
        "order": 35,
        "is_default": true,
        "abilities": [
            {"ability": {"name": "static", "url": "https://pokeapi.co/api/v2/ability/9/"}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "lightning-rod", "url": "https://pokeapi.co/api/v2/ability/31/"}, "is_hidden": true, "slot": 3}
        ],
        "types": [{"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}],
        "species": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/"},
        "sprites": {
            "front_default": "https://img/25.png",
            "back_default": "https://img/back/25.png",
            "front_shiny": "https://img/shiny/25.png",
            "back_shiny": null,
            "other": {
                "dream_world": {"front_default": "https://img/dw/25.svg"},
                "official-artwork": {"front_default": "https://img/art/25.png", "front_shiny": "x"}
            }
        }
    }"#;

    #[test]
    fn detail_payload_flattens_nested_names() {
        let payload: RecordPayload = serde_json::from_str(PIKACHU).unwrap();
        let details = RecordDetails::from(payload);

        assert_eq!(details.abilities, vec!["static", "lightning-rod"]);
        assert_eq!(details.types, vec!["electric"]);
        assert_eq!(details.species, "pikachu");
        assert_eq!(details.base_experience, Some(112));
        assert_eq!(details.sprites.back_shiny, None);
        assert_eq!(details.sprites.dream_world.as_deref(), Some("https://img/dw/25.svg"));
        assert_eq!(
            details.sprites.official_artwork.as_deref(),
            Some("https://img/art/25.png")
        );
    }

    #[test]
    fn missing_sprite_block_decodes_to_empty_sprites() {
        let payload: RecordPayload = serde_json::from_str(
            r#"{"id": 10001, "name": "deoxys-attack", "base_experience": null,
                "species": {"name": "deoxys", "url": ""}}"#,
        )
        .unwrap();
        let details = RecordDetails::from(payload);

        assert_eq!(details.sprites, Sprites::default());
        assert_eq!(details.base_experience, None);
        assert!(details.abilities.is_empty());
    }

    #[test]
    fn listing_decodes_count_and_results() {
        let listing: PageListing = serde_json::from_str(
            r#"{"count": 1302, "next": "n", "previous": null,
                "results": [{"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"}]}"#,
        )
        .unwrap();

        assert_eq!(listing.count, 1302);
        assert_eq!(listing.results.len(), 1);
        assert_eq!(listing.results[0].name, "bulbasaur");
    }
}
