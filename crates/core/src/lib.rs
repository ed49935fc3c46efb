//! Core types for the Graffiti object store
//!
//! This crate defines the foundational types shared by every other
//! `graffiti-*` crate:
//! - [`Channel`]: the channel-tag alias used by [`Object::channels`]
//! - [`Object`]: the persisted record (actor-owned JSON value + channels)
//! - [`Session`]: the `{actor}` token handed to every engine call
//! - [`ObjectUrl`]: the codec between `(actor, id)` pairs and opaque urls
//! - [`Error`]: the unified error taxonomy
//! - [`Storage`]: the trait the storage backend must implement

#![warn(missing_docs)]

pub mod error;
pub mod limits;
pub mod object;
pub mod traits;
pub mod url;

pub use error::{Error, Result};
pub use limits::Limits;
pub use object::{Channel, Object, PartialObject, Session};
pub use traits::{Storage, StorageInfo, StoredRow};
pub use url::{decode_object_url, encode_object_url, generate_id, ObjectUrl};
