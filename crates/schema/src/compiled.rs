//! A compiled schema predicate over candidate objects.

use graffiti_core::{Error, Object, Result};

/// A JSON-Schema compiled once and evaluated many times against candidate
/// objects. Never raises at evaluation time (spec.md §4.2) — a candidate
/// either satisfies the predicate or it doesn't.
pub struct CompiledSchema {
    validator: jsonschema::Validator,
}

impl CompiledSchema {
    /// Compile `schema`. Fails with [`Error::InvalidSchema`] if the schema
    /// itself is malformed; this is the only point at which schema
    /// compilation can fail.
    pub fn compile(schema: &serde_json::Value) -> Result<Self> {
        let validator = jsonschema::options()
            .build(schema)
            .map_err(|e| Error::invalid_schema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Evaluate the compiled predicate against a candidate object.
    ///
    /// spec.md §4.2: the schema "describes a full object (including
    /// optional `properties.lastModified` with numeric bounds)". The
    /// candidate handed to the validator is the object's `value` with
    /// `lastModified` merged in as a top-level field, so a schema can
    /// combine a `lastModified` bound with payload-shape constraints in
    /// one document without nesting payload fields under a `value` key.
    pub fn matches(&self, object: &Object) -> bool {
        let mut candidate = object.value.clone();
        if let Some(map) = candidate.as_object_mut() {
            map.insert("lastModified".to_string(), object.last_modified.into());
        }
        self.validator.is_valid(&candidate)
    }
}
