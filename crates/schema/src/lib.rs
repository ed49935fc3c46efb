//! JSON-Schema compilation and `lastModified` range extraction for the
//! Graffiti object store's read path.

#![warn(missing_docs)]

pub mod cache;
pub mod compiled;
pub mod range;

pub use cache::compile_cached;
pub use compiled::CompiledSchema;
pub use range::{extract_last_modified_range, LastModifiedRange, UNBOUNDED_END};
