//! Field classifier: which model fields become generated attributes.
use serde::Serialize;
use tracing::debug;

use crate::model::{FieldModel, FieldValue};

/// Every field of a model, bucketed by tag. Each list keeps model order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    pub included: Vec<&'a str>,
    pub callables: Vec<&'a str>,
    pub composites: Vec<&'a str>,
}

/// Names of the primitive fields, in model order.
pub fn classify(model: &FieldModel) -> Vec<&str> {
    partition(model).included
}

pub fn partition(model: &FieldModel) -> Classification<'_> {
    let mut out = Classification::default();
    for (name, value) in model.iter() {
        match value {
            FieldValue::Callable => {
                debug!(field = name, "skipping callable field");
                out.callables.push(name);
            }
            FieldValue::Composite(_) => {
                // nested structures are not generated (yet)
                debug!(field = name, kind = value.kind_name(), "skipping composite field");
                out.composites.push(name);
            }
            FieldValue::Primitive(_) => out.included.push(name),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_model_includes_nothing() {
        assert!(classify(&FieldModel::new()).is_empty());
    }

    #[test]
    fn primitives_kept_in_order_and_others_dropped() {
        let model = FieldModel::new()
            .with("b", 1)
            .callable("onClick")
            .with("a", "x")
            .with("nested", FieldValue::Composite(json!({"k": 1})))
            .with("flag", false)
            .with("list", FieldValue::Composite(json!([1, 2])))
            .with("nothing", crate::model::Primitive::Null);

        assert_eq!(classify(&model), ["b", "a", "flag", "nothing"]);
    }

    #[test]
    fn partition_covers_every_field_once() {
        let doc = json!({"x": 1, "bounds": {"n": 1}, "tags": [], "y": "s"});
        let model = FieldModel::from_json(&doc).unwrap().callable("handler");
        let parts = partition(&model);
        assert_eq!(parts.included, ["x", "y"]);
        assert_eq!(parts.composites, ["bounds", "tags"]);
        assert_eq!(parts.callables, ["handler"]);
        let total = parts.included.len() + parts.composites.len() + parts.callables.len();
        assert_eq!(total, model.len());
    }
}
