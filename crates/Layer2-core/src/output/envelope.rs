//! Envelope - 명령 결과 래퍼
//!
//! 모든 명령 결과는 성공/실패 envelope 중 하나로 감싸집니다.

use chrono::{SecondsFormat, Utc};
use hominem_foundation::{CliFailure, ErrorCategory, JsonValue, EXIT_SUCCESS};
use serde::{Deserialize, Serialize};

/// 현재 시각 (RFC 3339, UTC, 밀리초)
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 성공 envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub timestamp: String,
    pub data: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 실패 envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureEnvelope {
    pub ok: bool,
    pub command: String,
    pub timestamp: String,
    pub code: String,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// 성공 또는 실패
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success(SuccessEnvelope),
    Failure(FailureEnvelope),
}

impl Envelope {
    pub fn success(command: impl Into<String>, data: JsonValue, message: Option<String>) -> Self {
        Envelope::Success(SuccessEnvelope {
            ok: true,
            command: command.into(),
            timestamp: timestamp_now(),
            data,
            message,
        })
    }

    pub fn failure(command: impl Into<String>, failure: CliFailure) -> Self {
        Envelope::Failure(FailureEnvelope {
            ok: false,
            command: command.into(),
            timestamp: timestamp_now(),
            code: failure.code,
            category: failure.category,
            message: failure.message,
            details: failure.details,
            hint: failure.hint,
            request_id: None,
        })
    }

    /// 빌더 패턴: 실패에 request id 첨부 (성공에는 영향 없음)
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        if let Envelope::Failure(ref mut failure) = self {
            failure.request_id = Some(request_id.into());
        }
        self
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn command(&self) -> &str {
        match self {
            Envelope::Success(s) => &s.command,
            Envelope::Failure(f) => &f.command,
        }
    }

    /// 프로세스 종료 코드
    pub fn exit_code(&self) -> i32 {
        match self {
            Envelope::Success(_) => EXIT_SUCCESS,
            Envelope::Failure(f) => f.category.exit_code(),
        }
    }
}
