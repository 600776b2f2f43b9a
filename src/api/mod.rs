//! Consumed web-service contract.
//!
//! - `wire`: JSON shapes returned by the service
//! - `client`: the [`CatalogApi`] trait and its HTTP implementation

pub mod client;
pub mod wire;

pub use client::{CatalogApi, PokeApiClient};
pub use wire::{NamedResource, PageListing};
