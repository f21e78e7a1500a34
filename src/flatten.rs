//! Undoes the same-name nesting of compiled aggregations in a backend response.
//!
//! An aggregation `role` compiled through the nested scope `contribution`
//! comes back as
//!
//! ```json
//! { "role": { "doc_count": 4, "role": { "buckets": [ ... ] } } }
//! ```
//!
//! and is flattened to
//!
//! ```json
//! { "role": { "buckets": [ ... ] } }
//! ```
//!
//! Only levels reached by repeatedly descending into the aggregation's own
//! name are removed. Buckets, counts and every other key are left alone.

use serde_json::{Map, Value};
use tracing::trace;

/// Collapse every top-level aggregation to its innermost same-name level.
///
/// Returns the input unchanged when no aggregation repeats its name.
pub fn flatten_aggregations(mut aggregations: Map<String, Value>) -> Map<String, Value> {
    for (name, aggregation) in aggregations.iter_mut() {
        let mut levels = 0;
        while let Some(inner) = aggregation.get_mut(name.as_str()).map(Value::take) {
            *aggregation = inner;
            levels += 1;
        }
        if levels > 0 {
            trace!(name = name.as_str(), levels, "flattened aggregation");
        }
    }
    aggregations
}

/// Flatten the `aggregations` member of a full backend response.
///
/// Responses without an `aggregations` object pass through unchanged.
pub fn flatten_response(response: Value) -> Value {
    match response {
        Value::Object(mut body) => {
            if let Some(Value::Object(aggregations)) = body.get_mut("aggregations") {
                let taken = std::mem::take(aggregations);
                *aggregations = flatten_aggregations(taken);
            }
            Value::Object(body)
        }
        other => other,
    }
}
