//! The Aseprite subprocess: locating it and running it in batch mode.

mod invoke;
mod locate;

pub use invoke::{Invocation, RunOutcome, REQUIRED_PARAMS};
pub use locate::{locate, EditorPaths};
