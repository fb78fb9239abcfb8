//! Item record and the input rules applied to it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

pub type ItemId = i64;

/// Raw client payload: any JSON object.
pub type ItemPayload = Map<String, Value>;

/// A stored item.
///
/// Only `id` is typed. Every other field, `name` and `description` included,
/// lives in `fields` so that arbitrary client fields round-trip unchanged.
/// `fields` never contains an `id` key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Build an item from a payload, discarding any client-supplied `id`.
    pub fn from_payload(id: ItemId, payload: ItemPayload) -> Self {
        // filter rather than `remove`, which reorders an order-preserving map
        let fields = payload.into_iter().filter(|(key, _)| key != "id").collect();
        Self { id, fields }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overlay every payload field onto this item. `id` is never taken from the payload.
    pub fn merge(&mut self, payload: ItemPayload) {
        for (key, value) in payload {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

/// The two items the store starts with.
pub fn seed_items() -> Vec<Item> {
    [
        (1, "Item 1", "This is the first item"),
        (2, "Item 2", "Another item for testing"),
    ]
    .into_iter()
    .map(|(id, name, description)| {
        let mut fields = Map::new();
        fields.insert("name".into(), Value::from(name));
        fields.insert("description".into(), Value::from(description));
        Item { id, fields }
    })
    .collect()
}

/// Create-time check: `name` and `description` must both be present and truthy.
pub fn validate_new(payload: &ItemPayload) -> Result<(), ServiceError> {
    let present = |key: &str| payload.get(key).is_some_and(is_truthy);
    if !present("name") || !present("description") {
        return Err(ServiceError::missing_required_fields());
    }
    Ok(())
}

/// `null`, `false`, `0` and `""` count as missing; arrays and objects never do.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse an id path segment.
///
/// Leading whitespace and an optional sign are accepted, then the leading run of
/// decimal digits is taken and the rest ignored (`"12abc"` is `12`). `None` means
/// the segment can match no item.
pub fn parse_item_id(raw: &str) -> Option<ItemId> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = rest[..end].parse::<ItemId>().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> ItemPayload {
        match v {
            Value::Object(m) => m,
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn item_serializes_flat_with_extra_fields() {
        let item = Item::from_payload(7, payload(json!({"id": 99, "name": "a", "description": "b", "tags": ["x"]})));
        assert_eq!(item.id, 7);
        assert!(item.field("id").is_none());
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"id": 7, "name": "a", "description": "b", "tags": ["x"]})
        );
    }

    #[test]
    fn fields_keep_client_order() {
        let item = Item::from_payload(3, payload(json!({"name": "a", "id": 9, "description": "b", "color": "red"})));
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"id":3,"name":"a","description":"b","color":"red"}"#
        );

        let mut seeded = seed_items().remove(0);
        seeded.merge(payload(json!({"size": 2, "name": "New"})));
        assert_eq!(
            serde_json::to_string(&seeded).unwrap(),
            r#"{"id":1,"name":"New","description":"This is the first item","size":2}"#
        );
    }

    #[test]
    fn merge_overlays_and_keeps_id() {
        let mut item = seed_items().remove(0);
        item.merge(payload(json!({"name": "New", "id": 42, "color": "red"})));
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"id": 1, "name": "New", "description": "This is the first item", "color": "red"})
        );
    }

    #[test]
    fn validation_requires_truthy_name_and_description() {
        assert!(validate_new(&payload(json!({"name": "a", "description": "b"}))).is_ok());
        assert!(validate_new(&payload(json!({"name": ["x"], "description": 3}))).is_ok());

        for bad in [
            json!({"description": "x"}),
            json!({"name": "a"}),
            json!({"name": "", "description": "b"}),
            json!({"name": "a", "description": null}),
            json!({"name": 0, "description": "b"}),
            json!({"name": false, "description": "b"}),
            json!({}),
        ] {
            assert_eq!(
                validate_new(&payload(bad)),
                Err(ServiceError::missing_required_fields())
            );
        }
    }

    #[test]
    fn parse_item_id_takes_leading_integer() {
        assert_eq!(parse_item_id("1"), Some(1));
        assert_eq!(parse_item_id("  42"), Some(42));
        assert_eq!(parse_item_id("12abc"), Some(12));
        assert_eq!(parse_item_id("3.9"), Some(3));
        assert_eq!(parse_item_id("-5"), Some(-5));
        assert_eq!(parse_item_id("abc"), None);
        assert_eq!(parse_item_id(""), None);
        assert_eq!(parse_item_id("-"), None);
        assert_eq!(parse_item_id("99999999999999999999999"), None);
    }

    #[test]
    fn seed_has_two_items_in_order() {
        let seed = seed_items();
        assert_eq!(seed.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(seed[1].field("name"), Some(&json!("Item 2")));
    }
}
