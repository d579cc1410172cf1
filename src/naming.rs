//! Key casing conversion between the backend's snake_case payloads and the
//! camelCase models used on this side.
//!
//! Only mapping keys are rewritten. Sequences keep their length and order,
//! mapping keys keep their document order and every scalar comes back
//! untouched. When two keys rewrite to the same spelling the later one wins.
//! The input is never mutated; a fresh tree is built on every call.

use rocket::serde::json::{serde_json::Map, Value};

/// A rule rewriting a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCasing {
    /// `spare_capacity` / `spare-capacity` -> `spareCapacity`
    SnakeToCamel,
    /// `spareCapacity` -> `spare_capacity`
    CamelToSnake,
}

impl KeyCasing {
    pub fn rewrite(self, key: &str) -> String {
        match self {
            KeyCasing::SnakeToCamel => to_camel_case(key),
            KeyCasing::CamelToSnake => to_snake_case(key),
        }
    }

    /// Rebuild `value` with every mapping key rewritten, at any depth.
    pub fn convert(self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (self.rewrite(k), self.convert(v)))
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.convert(v)).collect()),
            scalar => scalar.clone(),
        }
    }
}

/// Drop every `-` or `_` that is directly followed by an ASCII letter and
/// uppercase that letter. Matches never overlap, so `a__b` becomes `a_B`.
pub fn to_camel_case(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '-' || ch == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphabetic() {
                    result.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        result.push(ch);
    }

    result
}

/// Prefix every ASCII uppercase letter with `_` and lowercase it.
/// A leading capital yields a leading underscore (`A` -> `_a`).
pub fn to_snake_case(key: &str) -> String {
    let mut result = String::with_capacity(key.len() + 4);

    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            result.push('_');
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}

pub fn keys_to_camel(value: &Value) -> Value {
    KeyCasing::SnakeToCamel.convert(value)
}

pub fn keys_to_snake(value: &Value) -> Value {
    KeyCasing::CamelToSnake.convert(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::serde::json::json;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("spare_capacity_history"), "spareCapacityHistory");
        assert_eq!(to_camel_case("already-has-dashes"), "alreadyHasDashes");
        assert_eq!(to_camel_case("charge_State"), "chargeState");
        assert_eq!(to_camel_case("lastUpdated"), "lastUpdated");
    }

    #[test]
    fn test_to_camel_case_separator_edges() {
        assert_eq!(to_camel_case("_leading"), "Leading");
        assert_eq!(to_camel_case("trailing_"), "trailing_");
        assert_eq!(to_camel_case("a__b"), "a_B");
        assert_eq!(to_camel_case("a-_b"), "a-B");
        assert_eq!(to_camel_case("value_1"), "value_1");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("chargeState"), "charge_state");
        assert_eq!(to_snake_case("spareCapacityHistory"), "spare_capacity_history");
        assert_eq!(to_snake_case("A"), "_a");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_keys_to_camel_nested() {
        let raw = json!({
            "charge_state": "Charging",
            "spare_capacity_history": [
                {"timestamp": 1, "value": 250},
                {"timestamp": 2, "value": -100}
            ],
            "nested": {"inner_key": {"deep_er": null}}
        });

        let converted = keys_to_camel(&raw);

        assert_eq!(
            converted,
            json!({
                "chargeState": "Charging",
                "spareCapacityHistory": [
                    {"timestamp": 1, "value": 250},
                    {"timestamp": 2, "value": -100}
                ],
                "nested": {"innerKey": {"deepEr": null}}
            })
        );
        // the input is left as it was
        assert!(raw.get("charge_state").is_some());
    }

    #[test]
    fn test_keys_to_camel_keeps_sequences_and_values() {
        assert_eq!(
            keys_to_camel(&json!({"spare_capacity_history": [1, 2, 3]})),
            json!({"spareCapacityHistory": [1, 2, 3]})
        );
        assert_eq!(
            keys_to_camel(&json!([["snake_value", {"a_b": "c_d"}]])),
            json!([["snake_value", {"aB": "c_d"}]])
        );
    }

    #[test]
    fn test_scalars_are_identity() {
        for value in [
            json!("already-has-dashes"),
            json!(null),
            json!(true),
            json!(12.5),
            json!(-3),
        ] {
            assert_eq!(keys_to_camel(&value), value);
            assert_eq!(keys_to_snake(&value), value);
        }
    }

    #[test]
    fn test_keys_to_snake() {
        assert_eq!(
            keys_to_snake(&json!({"chargeState": "Charging"})),
            json!({"charge_state": "Charging"})
        );
        assert_eq!(keys_to_snake(&json!({"A": 1})), json!({"_a": 1}));
        assert_eq!(
            keys_to_snake(&json!({"forceCharge": true, "list": [{"requestTime": "now"}]})),
            json!({"force_charge": true, "list": [{"request_time": "now"}]})
        );
    }

    #[test]
    fn test_camel_is_stable_after_round_trip() {
        let samples = [
            json!({"a_b": 1, "c-d": [{"e__f": 2}], "_g": {"H_i": 3}}),
            json!([{"spare_capacity": 1}, {"x": {"y_z_": []}}]),
            json!({"already": {"camelCase": "value_kept"}}),
        ];

        for sample in samples {
            let camel = keys_to_camel(&sample);
            assert_eq!(keys_to_camel(&keys_to_snake(&camel)), camel);
        }
    }

    #[test]
    fn test_colliding_keys_keep_the_last_one() {
        let converted = keys_to_camel(&json!({"a_b": 1, "a-b": 2}));
        let map = converted.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["aB"], json!(2));

        let converted = keys_to_camel(&json!({"a-b": 1, "a_b": 2}));
        assert_eq!(converted, json!({"aB": 2}));
    }

    #[test]
    fn test_key_order_is_preserved() {
        let converted = keys_to_camel(&json!({
            "vehicle_charge": 1,
            "current_load": 2,
            "battery_charge": 3
        }));
        let keys: Vec<&str> = converted
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["vehicleCharge", "currentLoad", "batteryCharge"]);
    }
}
