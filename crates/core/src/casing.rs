//! Key-case conversion for JSON payloads.
//!
//! The public API speaks lowerCamelCase while every handler, model and SQL
//! column is snake_case. [`convert_keys`] rewrites the keys of a JSON value
//! from one convention to the other, recursing through nested objects and
//! arrays. Scalars are returned untouched.
//!
//! Word splitting is deterministic:
//!
//! - `_`, `-` and spaces separate words and are dropped
//! - a lowercase letter or digit followed by an uppercase letter starts a new word
//! - a letter followed by a digit starts a new word (`addressLine1` -> `address`,
//!   `Line`, `1`); digits followed by lowercase letters stay together (`2x`)
//! - inside an uppercase run, the last capital starts a new word when a
//!   lowercase letter follows it (`HTTPServer` -> `HTTP`, `Server`)
//!
//! Leading underscores are kept verbatim so keys such as `_meta` survive.
//!
//! Converting snake_case keys to camelCase and back restores the original
//! spelling when every letter-only word has at least two characters and a
//! word starting with a digit never follows a digit-only word (`a_1_2`
//! collapses to `a_12`). When two source
//! keys map to the same target key, the one visited last wins.

use serde_json::{Map, Value};

/// Target naming convention for object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// `created_at`
    Snake,
    /// `createdAt`
    Camel,
}

/// Recursively convert every object key in `value` to `case`.
///
/// Arrays keep their length and order. Any other value is returned as-is.
pub fn convert_keys(value: Value, case: Case) -> Value {
    match value {
        Value::Object(map) => {
            let mut converted = Map::with_capacity(map.len());
            for (key, inner) in map {
                converted.insert(convert_key(&key, case), convert_keys(inner, case));
            }
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_keys(item, case))
                .collect(),
        ),
        other => other,
    }
}

/// Convert a single key to `case`.
pub fn convert_key(key: &str, case: Case) -> String {
    match case {
        Case::Snake => to_snake_case(key),
        Case::Camel => to_camel_case(key),
    }
}

/// `perPage` -> `per_page`, `HTTPServer` -> `http_server`.
pub fn to_snake_case(key: &str) -> String {
    let (prefix, rest) = split_prefix(key);
    let words = split_words(rest);
    if words.is_empty() {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len() + words.len());
    out.push_str(prefix);
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push('_');
        }
        out.push_str(&word.to_lowercase());
    }
    out
}

/// `per_page` -> `perPage`, `user_id` -> `userId`.
pub fn to_camel_case(key: &str) -> String {
    let (prefix, rest) = split_prefix(key);
    let words = split_words(rest);
    if words.is_empty() {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    out.push_str(prefix);
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            capitalize_into(word, &mut out);
        }
    }
    out
}

fn split_prefix(key: &str) -> (&str, &str) {
    let rest = key.trim_start_matches('_');
    (&key[..key.len() - rest.len()], rest)
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '_' | '-' | ' ')
}

fn split_words(input: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(idx, ch)) in chars.iter().enumerate() {
        if is_separator(ch) {
            if let Some(s) = start.take() {
                words.push(&input[s..idx]);
            }
            continue;
        }

        let Some(s) = start else {
            start = Some(idx);
            continue;
        };

        let prev = chars[i - 1].1;
        let starts_word = if ch.is_uppercase() {
            let next = chars.get(i + 1).map(|&(_, c)| c);
            prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase))
        } else {
            ch.is_numeric() && prev.is_alphabetic()
        };
        if starts_word {
            words.push(&input[s..idx]);
            start = Some(idx);
        }
    }

    if let Some(s) = start {
        words.push(&input[s..]);
    }
    words
}

fn capitalize_into(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn camel_to_snake() {
        assert_eq!(to_snake_case("perPage"), "per_page");
        assert_eq!(to_snake_case("createdAt"), "created_at");
        assert_eq!(to_snake_case("userID"), "user_id");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("version2Beta"), "version_2_beta");
    }

    #[test]
    fn digit_words_survive_a_round_trip() {
        assert_eq!(to_camel_case("address_line_1"), "addressLine1");
        assert_eq!(to_snake_case("addressLine1"), "address_line_1");
        assert_eq!(to_camel_case("image_2x"), "image2x");
        assert_eq!(to_snake_case("image2x"), "image_2x");

        let input = json!({ "address_line_1": 1, "image_2x": 2 });
        let camel = convert_keys(input.clone(), Case::Camel);
        assert_eq!(camel, json!({ "addressLine1": 1, "image2x": 2 }));
        assert_eq!(convert_keys(camel, Case::Snake), input);
    }

    #[test]
    fn snake_to_camel() {
        assert_eq!(to_camel_case("per_page"), "perPage");
        assert_eq!(to_camel_case("thumb_url"), "thumbUrl");
        assert_eq!(to_camel_case("last_page"), "lastPage");
        assert_eq!(to_camel_case("x-request-id"), "xRequestId");
    }

    #[test]
    fn already_converted_keys_are_stable() {
        assert_eq!(to_snake_case("current_page"), "current_page");
        assert_eq!(to_camel_case("currentPage"), "currentPage");
        assert_eq!(to_camel_case("total"), "total");
    }

    #[test]
    fn leading_underscores_preserved() {
        assert_eq!(to_camel_case("_private_field"), "_privateField");
        assert_eq!(to_snake_case("__typeName"), "__type_name");
    }

    #[test]
    fn keys_without_words_pass_through() {
        assert_eq!(to_snake_case(""), "");
        assert_eq!(to_camel_case("___"), "___");
    }

    #[test]
    fn nested_objects_and_arrays() {
        let input = json!({
            "data": [{ "file_name": "a.png", "thumb_url": null }],
            "meta": { "per_page": 15, "current_page": 1 },
        });
        let expected = json!({
            "data": [{ "fileName": "a.png", "thumbUrl": null }],
            "meta": { "perPage": 15, "currentPage": 1 },
        });
        assert_eq!(convert_keys(input, Case::Camel), expected);
    }

    #[test]
    fn nested_arrays_keep_order_and_length() {
        let input = json!([[{ "mediaId": 1 }], [], [{ "mediaId": 2 }, 3]]);
        let expected = json!([[{ "media_id": 1 }], [], [{ "media_id": 2 }, 3]]);
        assert_eq!(convert_keys(input, Case::Snake), expected);
    }

    #[test]
    fn scalars_pass_through() {
        for value in [json!(null), json!(true), json!(4.5), json!("someValue")] {
            assert_eq!(convert_keys(value.clone(), Case::Snake), value);
        }
    }

    #[test]
    fn string_values_are_not_rewritten() {
        let input = json!({ "sortBy": "createdAt" });
        assert_eq!(
            convert_keys(input, Case::Snake),
            json!({ "sort_by": "createdAt" })
        );
    }

    #[test]
    fn colliding_keys_collapse_to_one() {
        let input = json!({ "userId": 1, "user_id": 2 });
        let converted = convert_keys(input, Case::Snake);
        let map = converted.as_object().unwrap();
        assert_eq!(map.len(), 1);
        let value = map["user_id"].as_i64().unwrap();
        assert!(value == 1 || value == 2);
    }

    fn snake_key() -> impl Strategy<Value = String> {
        "[a-z]{2,5}(_[0-9]{1,3}([a-z]{1,3})?)?(_[a-z]{2,5}(_[0-9]{1,3})?){0,3}"
    }

    fn json_tree() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z _]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map(snake_key(), inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn snake_key_round_trips_through_camel(key in snake_key()) {
            prop_assert_eq!(to_snake_case(&to_camel_case(&key)), key);
        }

        #[test]
        fn json_round_trips_through_camel(value in json_tree()) {
            let camel = convert_keys(value.clone(), Case::Camel);
            prop_assert_eq!(convert_keys(camel, Case::Snake), value);
        }
    }
}
