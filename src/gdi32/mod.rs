//! GDI: device contexts, drawing and the objects selected into them.
//!
//! Created objects come back in [`crate::guard::Guard`]s. Drop order
//! matters: a selection guard must drop before the object it selected, and
//! both before the DC.

mod dc;
mod objects;

pub use dc::*;
pub use objects::*;
