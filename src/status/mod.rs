//! Status effects carried by units.
//!
//! - `StatusKind`: the ~50 kinds, classified buff/debuff
//! - `StatusEffectInstance`: one application with magnitude and duration
//! - `StatusCollection`: per-unit storage, owned by the unit

mod collection;
mod kind;

pub use collection::{StatusCollection, StatusEffectInstance, StatusMagnitude};
pub use kind::{MagnitudeKind, StatusKind};
