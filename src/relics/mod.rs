//! Relic identifiers, definitions and behavior.
//!
//! - `RelicId` / `RelicDefinition`: the immutable catalog entry
//! - `RelicCatalog`: definitions by identifier, loadable from JSON
//! - `RecipeBook`: the step list each identifier executes

mod catalog;
mod definition;
mod recipes;

pub use catalog::{CatalogError, RelicCatalog, RelicOverride};
pub use definition::{
    Generation, RelicCategory, RelicDefinition, RelicFamily, RelicId, TargetingMode,
};
pub use recipes::{recipe_for, RecipeBook};
