//! Configuration types
//!
//! Board-agnostic configuration structures. Values are plain data with
//! sensible defaults; `validate()` rejects combinations the runtime
//! cannot honour.

pub mod types;

pub use types::*;
