//! Fluent builders over the controller and clip models.
//!
//! Builders borrow the object under construction mutably and hand out
//! narrower builders (`layer -> state -> transition`) that borrow from it,
//! so all mutation stays confined to the controller being built.

mod animator;
mod clip;
mod layer;
mod state;
mod transition;

pub use animator::{AnimatorBuilder, AnimatorParameter};
pub use clip::{ClipBuilder, PathResolver};
pub use layer::LayerBuilder;
pub use state::StateBuilder;
pub use transition::{Conditioned, TransitionBuilder};
