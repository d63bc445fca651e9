//! Error types for hominem
//!
//! 두 가지 에러 타입을 분리해서 관리:
//! - [`Error`]: 내부 plumbing 에러 (I/O, JSON, 설정 파일)
//! - [`CliFailure`]: 사용자에게 노출되는 분류된 실패 (category → exit code)

mod failure;

pub use failure::{CliFailure, ErrorCategory, EXIT_SUCCESS};

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// 내부 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot resolve home directory")]
    HomeDirUnavailable,

    // ========================================================================
    // 저장소 관련
    // ========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 외부 원인(파일시스템, 직렬화 대상 등)으로 발생한 에러인지 확인
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Json(_) | Error::Storage(_) | Error::HomeDirUnavailable
        )
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

impl From<Error> for CliFailure {
    fn from(err: Error) -> Self {
        match &err {
            Error::Validation(message) => CliFailure::validation("VALIDATION_ERROR", message),
            Error::NotFound(_) => CliFailure::dependency("NOT_FOUND", err.to_string()),
            _ if err.is_external() => CliFailure::dependency("IO_ERROR", err.to_string()),
            _ => CliFailure::internal("INTERNAL_ERROR", err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_dependency() {
        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let failure: CliFailure = err.into();
        assert_eq!(failure.category, ErrorCategory::Dependency);
        assert_eq!(failure.code, "IO_ERROR");
    }

    #[test]
    fn test_internal_error_maps_to_internal() {
        let failure: CliFailure = Error::from("boom").into();
        assert_eq!(failure.category, ErrorCategory::Internal);
        assert!(failure.message.contains("boom"));
    }

    #[test]
    fn test_validation_error_keeps_message() {
        let failure: CliFailure = Error::Validation("bad version".into()).into();
        assert_eq!(failure.category, ErrorCategory::Validation);
        assert_eq!(failure.message, "bad version");
    }
}
