//! User interface rendering layer with component-based architecture.
//!
//! This module transforms view models into ANSI-styled text frames through
//! composable rendering components.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared formatting utilities (capitalization, units, highlighting)

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{Body, DetailsView, EmptyState, FooterInfo, GridView, HeaderInfo, UIViewModel};
