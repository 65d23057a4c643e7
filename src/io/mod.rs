//! Filesystem helpers for the generated site.
//!
//! - staged, atomic page writes (`output`)
//! - static asset copying (`assets`)

pub mod assets;
pub mod output;

pub use assets::*;
pub use output::*;
