use serde_json::{Map, Value};

/// Deep-merge `update` into `target`.
///
/// Objects merge key by key; any other value (arrays included) replaces
/// what was there.
pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (slot, Value::Object(update_map)) => {
            let mut fresh = Map::with_capacity(update_map.len());
            for (key, value) in update_map {
                let mut merged = Value::Null;
                merge_values(&mut merged, value);
                fresh.insert(key.clone(), merged);
            }
            *slot = Value::Object(fresh);
        }
        (slot, _) => *slot = update.clone(),
    }
}
