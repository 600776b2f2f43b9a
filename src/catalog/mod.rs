//! Catalog state and list projection.
//!
//! # Modules
//!
//! - [`pagination`]: fixed page size, page count, and bounded navigation
//! - [`favorites`]: identifier-keyed favorites collection
//! - [`projection`]: search, filters, and sort order for the list views
//! - [`session`]: the catalog session tying pages and favorites together

pub mod favorites;
pub mod pagination;
pub mod projection;
pub mod session;

pub use favorites::Favorites;
pub use pagination::{Pagination, PAGE_SIZE};
pub use projection::{FilterField, FilterOptions, ListQuery, SortOrder};
pub use session::{CatalogSession, LoadedPage, PageFailure, PendingPage};
