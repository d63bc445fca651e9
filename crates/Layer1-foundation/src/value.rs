//! Structured Value - 재귀적인 "JSON 모양" 값
//!
//! 설정, 플러그인 payload, envelope의 data에 공통으로 사용합니다.

pub use serde_json::{Map as JsonMap, Value as JsonValue};

/// 일반 객체(배열/원시값이 아닌)인지 확인
pub fn is_plain_object(value: &JsonValue) -> bool {
    matches!(value, JsonValue::Object(_))
}

/// CLI 입력 문자열을 값으로 해석
///
/// JSON으로 파싱되면 그 값을, 아니면 원문 문자열을 그대로 사용합니다.
/// (`"json"` → `json`, `42` → 42, `json` → "json")
pub fn decode_loose(raw: &str) -> JsonValue {
    serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}

/// 값 종류 이름 (에러 메시지용)
pub fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
