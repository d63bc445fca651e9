//! CliFailure - 분류된 명령 실패
//!
//! `code`는 프로그램이 매칭하는 안정적인 식별자,
//! `category`는 프로세스 종료 코드를 결정합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// 성공 시 종료 코드
pub const EXIT_SUCCESS: i32 = 0;

/// 실패 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// 잘못된 명령 호출 자체
    Usage,
    /// 인증 정보 없음/만료/무효
    Auth,
    /// args/flags/output 스키마 위반
    Validation,
    /// 외부 원인 (네트워크, 서브프로세스, 파일시스템, 플러그인)
    Dependency,
    /// 분류되지 않은 모든 것
    Internal,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 5] = [
        ErrorCategory::Usage,
        ErrorCategory::Auth,
        ErrorCategory::Validation,
        ErrorCategory::Dependency,
        ErrorCategory::Internal,
    ];

    /// category → exit code 고정 테이블
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Usage => 2,
            ErrorCategory::Auth => 3,
            ErrorCategory::Validation => 4,
            ErrorCategory::Dependency => 5,
            ErrorCategory::Internal => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Usage => "usage",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Dependency => "dependency",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자에게 노출되는 실패 값
///
/// 명령의 `run`은 예상 가능한 모든 실패를 이 타입으로 반환해야
/// 런타임이 결정적으로 분류할 수 있습니다.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct CliFailure {
    pub code: String,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliFailure {
    pub fn new(
        category: ErrorCategory,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            category,
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn usage(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Usage, code, message)
    }

    pub fn auth(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Auth, code, message)
    }

    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, code, message)
    }

    pub fn dependency(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Dependency, code, message)
    }

    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Internal, code, message)
    }

    /// 빌더 패턴: 상세 정보 설정
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// 빌더 패턴: 힌트 설정
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// 카테고리 강제 변경 (플러그인 에러 재분류용)
    pub fn with_category(mut self, category: ErrorCategory) -> Self {
        self.category = category;
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exit_code_table() {
        let expected = [
            (ErrorCategory::Usage, 2),
            (ErrorCategory::Auth, 3),
            (ErrorCategory::Validation, 4),
            (ErrorCategory::Dependency, 5),
            (ErrorCategory::Internal, 10),
        ];
        for (category, code) in expected {
            assert_eq!(category.exit_code(), code, "category {}", category);
            assert_ne!(category.exit_code(), EXIT_SUCCESS);
        }
    }

    #[test]
    fn test_category_serializes_lowercase() {
        for category in ErrorCategory::ALL {
            let value = serde_json::to_value(category).unwrap();
            assert_eq!(value, json!(category.as_str()));
        }
    }

    #[test]
    fn test_failure_builder() {
        let failure = CliFailure::dependency("PLUGIN_RPC_TIMEOUT", "timed out")
            .with_hint("raise --timeout-ms")
            .with_details(json!({"timeoutMs": 10}));

        assert_eq!(failure.exit_code(), 5);
        assert_eq!(failure.hint.as_deref(), Some("raise --timeout-ms"));
        assert_eq!(failure.to_string(), "PLUGIN_RPC_TIMEOUT: timed out");
    }

    #[test]
    fn test_failure_omits_empty_optionals() {
        let value = serde_json::to_value(CliFailure::usage("X", "y")).unwrap();
        assert!(value.get("details").is_none());
        assert!(value.get("hint").is_none());
    }
}
