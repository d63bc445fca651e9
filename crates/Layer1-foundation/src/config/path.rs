//! Path Selector - 점(.) 구분 경로로 값 읽기/쓰기

use crate::value::{JsonMap, JsonValue};

/// 경로 문자열을 세그먼트로 분리
///
/// 빈 경로만 세그먼트 0개이고, `a..b`의 빈 세그먼트는 그대로 키 `""`로 취급합니다.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(move |_| !path.is_empty())
}

/// `a.b.c` 경로의 값 조회
///
/// 세그먼트가 없거나 현재 값이 일반 객체가 아니면(배열/원시값 포함) `None`.
/// 빈 경로는 문서 전체를 반환합니다.
pub fn get_path_value<'a>(doc: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = doc;
    for segment in segments(path) {
        match current {
            JsonValue::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

/// `a.b.c` 경로에 값 설정
///
/// 입력 문서는 변경하지 않고 깊은 복사본을 반환합니다.
/// 없거나 객체가 아닌 중간 세그먼트는 빈 객체로 대체됩니다.
/// 빈 경로는 문서 전체를 `value`로 교체합니다.
pub fn set_path_value(doc: &JsonValue, path: &str, value: JsonValue) -> JsonValue {
    let parts: Vec<&str> = segments(path).collect();
    let Some((leaf, parents)) = parts.split_last() else {
        return value;
    };

    let mut root = doc.clone();
    let mut current = &mut root;
    for segment in parents {
        current = ensure_object(current)
            .entry(segment.to_string())
            .or_insert_with(|| JsonValue::Object(JsonMap::new()));
    }
    ensure_object(current).insert(leaf.to_string(), value);
    root
}

fn ensure_object(value: &mut JsonValue) -> &mut JsonMap<String, JsonValue> {
    if !value.is_object() {
        *value = JsonValue::Object(JsonMap::new());
    }
    match value {
        JsonValue::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested_value() {
        let doc = json!({"output": {"format": "json"}});
        assert_eq!(get_path_value(&doc, "output.format"), Some(&json!("json")));
    }

    #[test]
    fn test_get_missing_intermediate() {
        let doc = json!({"output": {}});
        assert_eq!(get_path_value(&doc, "missing.deep.key"), None);
        assert_eq!(get_path_value(&doc, "output.format.x"), None);
    }

    #[test]
    fn test_get_stops_at_arrays_and_primitives() {
        let doc = json!({"profiles": [{"name": "a"}], "n": 3});
        assert_eq!(get_path_value(&doc, "profiles.0"), None);
        assert_eq!(get_path_value(&doc, "n.x"), None);
        assert_eq!(get_path_value(&doc, "profiles"), Some(&json!([{"name": "a"}])));
    }

    #[test]
    fn test_get_empty_path_returns_document() {
        let doc = json!({"a": 1});
        assert_eq!(get_path_value(&doc, ""), Some(&doc));
    }

    #[test]
    fn test_empty_segment_is_a_missing_key() {
        let doc = json!({"a": {"b": 1}});
        assert_eq!(get_path_value(&doc, "a..b"), None);
        assert_eq!(get_path_value(&doc, "a."), None);
        assert_eq!(get_path_value(&doc, "a.b"), Some(&json!(1)));

        let updated = set_path_value(&doc, "a..b", json!(2));
        assert_eq!(updated, json!({"a": {"b": 1, "": {"b": 2}}}));
    }

    #[test]
    fn test_set_does_not_mutate_input() {
        let doc = json!({"a": {"b": 1}});
        let updated = set_path_value(&doc, "a.b", json!(2));
        assert_eq!(doc, json!({"a": {"b": 1}}));
        assert_eq!(updated, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_set_vivifies_intermediates() {
        let doc = json!({"a": 5});
        let updated = set_path_value(&doc, "a.b.c", json!(true));
        assert_eq!(updated, json!({"a": {"b": {"c": true}}}));

        let updated = set_path_value(&json!({}), "x.y", json!(null));
        assert_eq!(updated, json!({"x": {"y": null}}));
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let values = [
            json!("text"),
            json!(12.5),
            json!(false),
            JsonValue::Null,
            json!({"nested": [1, 2]}),
        ];
        for value in values {
            let doc = set_path_value(&json!({"ai": {}}), "ai.defaults.key", value.clone());
            assert_eq!(get_path_value(&doc, "ai.defaults.key"), Some(&value));
        }
    }
}
