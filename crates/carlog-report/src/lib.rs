//! Text rendering shell for carlog
//!
//! Wires configuration, the event-log source and the evaluator together and
//! renders the results as plain text tables or JSON.

mod render;
mod source;

pub use render::*;
pub use source::*;
