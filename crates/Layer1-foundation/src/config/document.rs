//! Config Document - 버전 2 설정 문서 스키마

use crate::format::OutputFormat;
use crate::value::{JsonMap, JsonValue};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// 현재 설정 문서 버전
pub const CONFIG_VERSION: u32 = 2;

/// 기본 API URL (default 프로필)
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

// ============================================================================
// ConfigDocument
// ============================================================================

/// 사용자 설정 문서 (version = 2)
///
/// 고정 구조는 `deny_unknown_fields`로 검증하고,
/// `ai.providers` / `ai.defaults`만 자유 형식 맵으로 둡니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigDocument {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: u32,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default = "default_profiles")]
    pub profiles: Vec<Profile>,

    #[serde(default)]
    pub ai: AiSettings,

    #[serde(default)]
    pub telemetry: TelemetrySettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            auth: AuthSettings::default(),
            profiles: default_profiles(),
            ai: AiSettings::default(),
            telemetry: TelemetrySettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl ConfigDocument {
    /// 구조화된 값을 검증하여 문서로 변환
    pub fn from_value(value: JsonValue) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::Validation(format!("Invalid config document: {}", e)))
    }

    /// 경로 연산용 구조화된 값으로 변환
    pub fn to_value(&self) -> JsonValue {
        // 모든 필드가 JSON 표현 가능한 타입이라 실패하지 않음
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }

    /// 이름으로 프로필 조회
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

fn deserialize_version<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u32::deserialize(deserializer)?;
    if version != CONFIG_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported config version {}, expected {}",
            version, CONFIG_VERSION
        )));
    }
    Ok(version)
}

fn default_profiles() -> Vec<Profile> {
    vec![Profile {
        name: "default".to_string(),
        api_url: DEFAULT_API_URL.to_string(),
    }]
}

// ============================================================================
// Sections
// ============================================================================

/// 인증 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSettings {
    pub provider: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            provider: "workos".to_string(),
        }
    }
}

/// API 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub api_url: String,
}

/// AI 설정 (자유 형식)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiSettings {
    #[serde(default)]
    pub providers: JsonMap<String, JsonValue>,
    #[serde(default)]
    pub defaults: JsonMap<String, JsonValue>,
}

/// 텔레메트리 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub enabled: bool,
}

/// 출력 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}
