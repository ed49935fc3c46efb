//! Error taxonomy for the Graffiti object store
//!
//! A single flat `Error` enum is used across every layer, following the
//! same shape as the rest of the crate family: one variant per error
//! *kind* (not per call site), `thiserror`-derived messages, and small
//! `is_*` classification helpers for callers that branch on error kind
//! rather than matching the full enum.
//!
//! `NotFound` is deliberately the only way to report "missing" *and*
//! "exists but invisible under access control" — callers must not be
//! able to distinguish the two, or the engine would leak the presence of
//! access-controlled objects to callers who cannot see them.

use thiserror::Error;

/// Result type alias used throughout the Graffiti crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all Graffiti object store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The target url does not exist, is tombstoned, or is not visible to
    /// the caller; or an unrecognized cursor was supplied to `continue`.
    #[error("not found: {0}")]
    NotFound(String),

    /// A write was attempted against an object not owned by the session's
    /// actor (`delete` on another actor's object), or a cursor bound to a
    /// different actor than the session was passed to `continue`.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The read succeeded but the object failed the compiled schema
    /// predicate.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The supplied JSON-Schema failed to compile.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A url failed to decode: missing scheme prefix, or a separator
    /// count other than exactly one.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A `post` payload exceeded one of the engine's configured [size
    /// limits](crate::Limits). An ambient addition alongside the core
    /// error kinds; every production embeddable store needs bounded
    /// inputs.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl Error {
    /// Build a `NotFound` error. Used for both "missing" and "invisible"
    /// call sites — see the module docs for why these must not be
    /// distinguishable.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Error::NotFound(detail.into())
    }

    /// Build a `Forbidden` error.
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Error::Forbidden(detail.into())
    }

    /// Build a `SchemaMismatch` error.
    pub fn schema_mismatch(detail: impl Into<String>) -> Self {
        Error::SchemaMismatch(detail.into())
    }

    /// Build an `InvalidSchema` error.
    pub fn invalid_schema(detail: impl Into<String>) -> Self {
        Error::InvalidSchema(detail.into())
    }

    /// Build an `InvalidUrl` error.
    pub fn invalid_url(detail: impl Into<String>) -> Self {
        Error::InvalidUrl(detail.into())
    }

    /// Build a `LimitExceeded` error.
    pub fn limit_exceeded(detail: impl Into<String>) -> Self {
        Error::LimitExceeded(detail.into())
    }

    /// True for the "not found" kind (missing, tombstoned, invisible, or
    /// an unrecognized cursor).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for the "forbidden" kind (write to another actor's object, or
    /// a cursor bound to a different actor).
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Forbidden(_))
    }

    /// True when the object read succeeded but failed the schema
    /// predicate.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Error::SchemaMismatch(_))
    }

    /// True when the error originates in schema compilation rather than
    /// evaluation.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self, Error::InvalidSchema(_))
    }

    /// True when the error originates in url decoding.
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Error::InvalidUrl(_))
    }

    /// True when a `post` payload exceeded a configured size limit.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, Error::LimitExceeded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_contains_detail() {
        let err = Error::not_found("graffiti:object/a/b");
        assert!(err.to_string().contains("graffiti:object/a/b"));
        assert!(err.is_not_found());
    }

    #[test]
    fn forbidden_classification() {
        let err = Error::forbidden("actor mismatch");
        assert!(err.is_forbidden());
        assert!(!err.is_not_found());
    }

    #[test]
    fn schema_mismatch_classification() {
        let err = Error::schema_mismatch("missing required field 'x'");
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn invalid_schema_classification() {
        let err = Error::invalid_schema("type must be a string");
        assert!(err.is_invalid_schema());
    }

    #[test]
    fn invalid_url_classification() {
        let err = Error::invalid_url("missing scheme prefix");
        assert!(err.is_invalid_url());
    }

    #[test]
    fn limit_exceeded_classification() {
        let err = Error::limit_exceeded("value exceeds max_value_bytes");
        assert!(err.is_limit_exceeded());
    }

    #[test]
    fn classifications_are_mutually_exclusive() {
        let errs: Vec<Error> = vec![
            Error::not_found("x"),
            Error::forbidden("x"),
            Error::schema_mismatch("x"),
            Error::invalid_schema("x"),
            Error::invalid_url("x"),
            Error::limit_exceeded("x"),
        ];
        for err in &errs {
            let flags = [
                err.is_not_found(),
                err.is_forbidden(),
                err.is_schema_mismatch(),
                err.is_invalid_schema(),
                err.is_invalid_url(),
                err.is_limit_exceeded(),
            ];
            assert_eq!(flags.iter().filter(|b| **b).count(), 1);
        }
    }
}
