//! Range extraction over `properties.lastModified` (spec.md §4.2).

const PAD_WIDTH: usize = 15;
/// Sentinel ordered above any 15-digit decimal string.
pub const UNBOUNDED_END: &str = "\u{FFFF}";

fn pad15(value: u64) -> String {
    format!("{:0width$}", value, width = PAD_WIDTH)
}

/// `[startSuffix, endSuffix]` derived from a schema's `lastModified` bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastModifiedRange {
    /// Inclusive lower suffix, or `""` when unbounded below.
    pub start_suffix: String,
    /// Inclusive upper suffix, or [`UNBOUNDED_END`] when unbounded above.
    pub end_suffix: String,
}

impl Default for LastModifiedRange {
    fn default() -> Self {
        Self {
            start_suffix: String::new(),
            end_suffix: UNBOUNDED_END.to_string(),
        }
    }
}

/// Walk `schema.properties.lastModified` for `minimum`, `exclusiveMinimum`,
/// `maximum`, `exclusiveMaximum` JSON numbers and derive a 15-digit
/// zero-padded decimal suffix range. Absent or malformed bounds fall back
/// to the unbounded defaults, never to an error — range extraction is a
/// best-effort narrowing, not a validation step.
pub fn extract_last_modified_range(schema: &serde_json::Value) -> LastModifiedRange {
    let Some(last_modified) = schema
        .get("properties")
        .and_then(|p| p.get("lastModified"))
    else {
        return LastModifiedRange::default();
    };

    let min_inclusive = last_modified.get("minimum").and_then(as_f64).map(|v| v.ceil());
    let min_exclusive = last_modified
        .get("exclusiveMinimum")
        .and_then(as_f64)
        .map(|v| v.floor() + 1.0);
    let max_inclusive = last_modified.get("maximum").and_then(as_f64).map(|v| v.floor());
    let max_exclusive = last_modified
        .get("exclusiveMaximum")
        .and_then(as_f64)
        .map(|v| v.ceil() - 1.0);

    let start = [min_inclusive, min_exclusive]
        .into_iter()
        .flatten()
        .fold(None::<f64>, |acc, v| Some(acc.map_or(v, |a| a.max(v))));
    let end = [max_inclusive, max_exclusive]
        .into_iter()
        .flatten()
        .fold(None::<f64>, |acc, v| Some(acc.map_or(v, |a| a.min(v))));

    LastModifiedRange {
        start_suffix: start
            .map(|v| pad15(v.max(0.0) as u64))
            .unwrap_or_default(),
        end_suffix: end
            .map(|v| pad15(v.max(0.0) as u64))
            .unwrap_or_else(|| UNBOUNDED_END.to_string()),
    }
}

fn as_f64(value: &serde_json::Value) -> Option<f64> {
    value.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_bounds_is_fully_unbounded() {
        let range = extract_last_modified_range(&json!({"type": "object"}));
        assert_eq!(range, LastModifiedRange::default());
    }

    #[test]
    fn inclusive_minimum_and_maximum() {
        let schema = json!({
            "properties": {"lastModified": {"minimum": 15, "maximum": 25}}
        });
        let range = extract_last_modified_range(&schema);
        assert_eq!(range.start_suffix, pad15(15));
        assert_eq!(range.end_suffix, pad15(25));
    }

    #[test]
    fn exclusive_minimum_rounds_up_to_next_integer() {
        let schema = json!({"properties": {"lastModified": {"exclusiveMinimum": 14}}});
        let range = extract_last_modified_range(&schema);
        assert_eq!(range.start_suffix, pad15(15));
    }

    #[test]
    fn exclusive_maximum_rounds_down_to_prior_integer() {
        let schema = json!({"properties": {"lastModified": {"exclusiveMaximum": 26}}});
        let range = extract_last_modified_range(&schema);
        assert_eq!(range.end_suffix, pad15(25));
    }

    #[test]
    fn tighter_of_inclusive_and_exclusive_bound_wins() {
        let schema = json!({
            "properties": {
                "lastModified": {"minimum": 10, "exclusiveMinimum": 14}
            }
        });
        let range = extract_last_modified_range(&schema);
        assert_eq!(range.start_suffix, pad15(15));
    }

    #[test]
    fn fractional_exclusive_bounds_floor_and_ceil_correctly() {
        let schema = json!({
            "properties": {"lastModified": {"exclusiveMinimum": 14.2, "exclusiveMaximum": 25.9}}
        });
        let range = extract_last_modified_range(&schema);
        assert_eq!(range.start_suffix, pad15(15));
        assert_eq!(range.end_suffix, pad15(25));
    }
}
