use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    error::PatchError,
    patch::{
        patch_operation::PatchOperation,
        patch_path::{PatchPath, PathSegment},
    },
};

/// Applies `operations` in order. On error the document may be partially
/// patched.
#[instrument(skip_all, level = "debug")]
pub fn apply_patch(document: &mut Value, operations: &[PatchOperation]) -> Result<(), PatchError> {
    for operation in operations {
        debug!("{} {}", operation.name(), operation.path());
        apply_operation(document, operation)?;
    }

    Ok(())
}

fn apply_operation(document: &mut Value, operation: &PatchOperation) -> Result<(), PatchError> {
    let path = operation.path();
    let mut segments = path.segments()?;
    let last = segments
        .pop()
        .ok_or_else(|| PatchError::InvalidPath(path.to_string()))?;

    let parent = segments
        .iter()
        .try_fold(document, |current, segment| child_mut(current, segment, path))?;

    match operation {
        PatchOperation::Add { value, .. } => add(parent, &last, value.clone(), path),
        PatchOperation::Replace { value, .. } => {
            *child_mut(parent, &last, path)? = value.clone();
            Ok(())
        }
        PatchOperation::Remove { .. } => remove(parent, &last, path),
    }
}

fn has_id(value: &Value, id: &str) -> bool {
    value.get("id").and_then(Value::as_str) == Some(id)
}

fn array_index(key: &str, path: &PatchPath) -> Result<usize, PatchError> {
    key.parse::<usize>()
        .map_err(|_| PatchError::InvalidPath(path.to_string()))
}

fn child_mut<'a>(
    value: &'a mut Value,
    segment: &PathSegment,
    path: &PatchPath,
) -> Result<&'a mut Value, PatchError> {
    let not_found = || PatchError::PathNotFound(path.to_string());

    match (value, segment) {
        (Value::Array(items), PathSegment::Id(id)) => items
            .iter_mut()
            .find(|item| has_id(item, id))
            .ok_or_else(not_found),
        (Value::Array(items), PathSegment::Key(key)) => {
            let index = array_index(key, path)?;
            items.get_mut(index).ok_or_else(not_found)
        }
        (Value::Object(map), PathSegment::Key(key)) => map.get_mut(key).ok_or_else(not_found),
        _ => Err(not_found()),
    }
}

fn add(
    parent: &mut Value,
    segment: &PathSegment,
    value: Value,
    path: &PatchPath,
) -> Result<(), PatchError> {
    match (parent, segment) {
        (Value::Object(map), PathSegment::Key(key)) => {
            map.insert(key.clone(), value);
        }
        (Value::Array(items), PathSegment::Key(key)) if key == "-" => items.push(value),
        (Value::Array(items), PathSegment::Key(key)) => {
            let index = array_index(key, path)?;
            if index > items.len() {
                return Err(PatchError::PathNotFound(path.to_string()));
            }
            items.insert(index, value);
        }
        // Adding over an identified element replaces it, otherwise it is appended.
        (Value::Array(items), PathSegment::Id(id)) => {
            match items.iter_mut().find(|item| has_id(item, id)) {
                Some(item) => *item = value,
                None => items.push(value),
            }
        }
        _ => return Err(PatchError::PathNotFound(path.to_string())),
    }

    Ok(())
}

fn remove(parent: &mut Value, segment: &PathSegment, path: &PatchPath) -> Result<(), PatchError> {
    let removed = match (parent, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.shift_remove(key).is_some(),
        (Value::Array(items), PathSegment::Id(id)) => {
            match items.iter().position(|item| has_id(item, id)) {
                Some(index) => {
                    items.remove(index);
                    true
                }
                None => false,
            }
        }
        (Value::Array(items), PathSegment::Key(key)) => {
            let index = array_index(key, path)?;
            if index < items.len() {
                items.remove(index);
                true
            } else {
                false
            }
        }
        _ => false,
    };

    if removed {
        Ok(())
    } else {
        Err(PatchError::PathNotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_utils::input_value;

    fn operation(value: Value) -> PatchOperation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_add_and_replace() {
        let mut document = input_value();

        apply_patch(
            &mut document,
            &[
                operation(json!({
                    "op": "add",
                    "path": "/vehicles/[id=V1]/shifts/[id=V1-S2]/itinerary",
                    "value": [{ "id": "A", "kind": "VISIT" }],
                })),
                operation(json!({
                    "op": "replace",
                    "path": "/vehicles/[id=V2]/shifts/0/endLocation",
                    "value": [1.0, 2.0],
                })),
                operation(json!({
                    "op": "add",
                    "path": "/visits/-",
                    "value": { "id": "H" },
                })),
            ],
        )
        .unwrap();

        assert_eq!(
            document["vehicles"][0]["shifts"][1]["itinerary"],
            json!([{ "id": "A", "kind": "VISIT" }])
        );
        assert_eq!(document["vehicles"][1]["shifts"][0]["endLocation"], json!([1.0, 2.0]));
        assert_eq!(document["visits"][5]["id"], "H");
    }

    #[test]
    fn test_remove() {
        let mut document = input_value();

        apply_patch(
            &mut document,
            &[
                operation(json!({ "op": "remove", "path": "/visits/[id=B]/requiredVehicles" })),
                operation(json!({ "op": "remove", "path": "/visits/[id=C]" })),
            ],
        )
        .unwrap();

        assert!(document["visits"][1].get("requiredVehicles").is_none());
        assert_eq!(document["visits"].as_array().unwrap().len(), 4);
        assert_eq!(document["visits"][2]["id"], "D");
    }

    #[test]
    fn test_replace_missing_member() {
        let mut document = input_value();
        let result = apply_patch(
            &mut document,
            &[operation(json!({
                "op": "replace",
                "path": "/vehicles/[id=V1]/shifts/[id=V1-S2]/endLocation",
                "value": [1.0, 2.0],
            }))],
        );

        assert!(matches!(result, Err(PatchError::PathNotFound(_))));
    }

    #[test]
    fn test_unknown_selector() {
        let mut document = input_value();
        let result = apply_patch(
            &mut document,
            &[operation(json!({
                "op": "add",
                "path": "/vehicles/[id=V9]/shifts/[id=V9-S1]/itinerary",
                "value": [],
            }))],
        );

        assert!(matches!(result, Err(PatchError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_index() {
        let mut document = input_value();
        let result = apply_patch(
            &mut document,
            &[operation(json!({ "op": "remove", "path": "/visits/first" }))],
        );

        assert!(matches!(result, Err(PatchError::InvalidPath(_))));
    }
}
