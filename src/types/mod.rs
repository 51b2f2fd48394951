//! Core types for uiforge.

pub mod generation;
pub mod invocation;
pub mod stream;
pub mod usage;

pub use generation::*;
pub use invocation::*;
pub use stream::*;
pub use usage::*;
