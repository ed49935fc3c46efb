//! Process-wide memoization of compiled schemas (SPEC_FULL.md §4.2).
//!
//! `discover`/`continue` frequently re-run with the exact same schema
//! value; compiling a `jsonschema::Validator` is not free, so this cache
//! keeps one compiled instance alive per distinct schema, keyed by its
//! canonical JSON string. Mirrors the teacher's pattern of a static,
//! lock-guarded shared cache rather than re-deriving per call.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::trace;

use graffiti_core::Result;

use crate::compiled::CompiledSchema;

static CACHE: Lazy<RwLock<HashMap<String, Arc<CompiledSchema>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Compile `schema`, or return the already-compiled instance for an
/// identical schema value seen before. Compilation failures are not
/// cached — a transient caller error shouldn't poison future lookups.
pub fn compile_cached(schema: &serde_json::Value) -> Result<Arc<CompiledSchema>> {
    let key = schema.to_string();

    if let Some(hit) = CACHE.read().get(&key) {
        trace!("schema cache hit");
        return Ok(Arc::clone(hit));
    }

    let compiled = Arc::new(CompiledSchema::compile(schema)?);
    CACHE.write().insert(key, Arc::clone(&compiled));
    Ok(compiled)
}

/// Number of distinct schemas currently memoized. Exposed for tests and
/// diagnostics; not part of the engine's public contract.
pub fn cached_len() -> usize {
    CACHE.read().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeated_compiles_of_the_same_schema_reuse_the_cache_entry() {
        let schema = json!({"type": "object", "properties": {"k": {"type": "string"}}});
        let before = cached_len();
        let a = compile_cached(&schema).unwrap();
        let b = compile_cached(&schema).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cached_len(), before + 1);
    }

    #[test]
    fn compile_failure_is_not_cached() {
        let schema = json!({"type": "not-a-real-type", "unique-marker-xyz": true});
        let before = cached_len();
        assert!(compile_cached(&schema).is_err());
        assert_eq!(cached_len(), before);
    }
}
