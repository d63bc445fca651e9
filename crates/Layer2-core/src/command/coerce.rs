//! Coerce - argv 문자열을 타입 값으로 바꾸는 serde 헬퍼
//!
//! 플래그 값은 항상 문자열이거나 `true`로 들어오므로,
//! 숫자/불리언 필드는 `deserialize_with`로 이 헬퍼를 지정합니다.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct Flags {
//!     #[serde(default, deserialize_with = "coerce::optional_number")]
//!     timeout_ms: Option<u64>,
//! }
//! ```

use serde::de::{self, Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Typed(T),
    Text(String),
}

/// 숫자 또는 숫자 문자열
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Loose::<T>::deserialize(deserializer)? {
        Loose::Typed(value) => Ok(value),
        Loose::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("expected a number, got '{}': {}", text, e))),
    }
}

/// `Option` 필드용 [`number`]
pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    number(deserializer).map(Some)
}

/// 불리언 또는 `true`/`false`/`1`/`0` 문자열
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::<bool>::deserialize(deserializer)? {
        Loose::Typed(value) => Ok(value),
        Loose::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(de::Error::custom(format!("expected a boolean, got '{}'", text))),
        },
    }
}
