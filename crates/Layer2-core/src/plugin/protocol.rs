//! Plugin Protocol - 한 줄 JSON 요청/응답
//!
//! ```text
//! host → stdin : {"id":"…","method":"…","params":…}\n
//! plugin → stdout: {"id":"…","result":…}
//!               or {"id":"…","error":{"code":"…","message":"…","details":…}}
//! ```

use hominem_foundation::{CliFailure, ErrorCategory, JsonValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// 요청 (필드 순서: id, method, params)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

impl RpcRequest {
    /// 랜덤 id로 요청 생성
    pub fn new(method: impl Into<String>, params: Option<JsonValue>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method: method.into(),
            params,
        }
    }

    /// 개행으로 끝나는 한 줄
    pub fn to_line(&self) -> Result<String, CliFailure> {
        serde_json::to_string(self)
            .map(|line| line + "\n")
            .map_err(|e| CliFailure::internal("INTERNAL_ERROR", format!("Cannot encode request: {}", e)))
    }
}

/// 플러그인 에러 본문
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

/// 응답 - 성공 스키마를 먼저 시도
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcResponse {
    Success { id: String, result: JsonValue },
    Failure { id: String, error: RpcErrorBody },
}

impl RpcResponse {
    pub fn id(&self) -> &str {
        match self {
            RpcResponse::Success { id, .. } | RpcResponse::Failure { id, .. } => id,
        }
    }

    /// 결과 또는 `dependency` 실패로 변환
    pub fn into_result(self) -> Result<JsonValue, CliFailure> {
        match self {
            RpcResponse::Success { result, .. } => Ok(result),
            RpcResponse::Failure { error, .. } => {
                let mut failure =
                    CliFailure::new(ErrorCategory::Dependency, error.code, error.message);
                failure.details = error.details;
                Err(failure)
            }
        }
    }
}

/// stdout의 첫 줄을 응답으로 해석하고 결과 반환
pub fn parse_response(stdout: &str, expected_id: &str) -> Result<JsonValue, CliFailure> {
    let line = stdout.lines().next().map(str::trim).unwrap_or_default();
    if line.is_empty() {
        return Err(CliFailure::dependency(
            "PLUGIN_RPC_EMPTY",
            "Plugin exited without writing a response",
        ));
    }

    let response: RpcResponse = serde_json::from_str(line).map_err(|e| {
        CliFailure::dependency("PLUGIN_RPC_INVALID", format!("Invalid plugin response: {}", e))
            .with_details(json!({ "line": line }))
    })?;

    if response.id() != expected_id {
        return Err(CliFailure::dependency(
            "PLUGIN_RPC_INVALID",
            "Plugin response id does not match the request",
        )
        .with_details(json!({ "expected": expected_id, "actual": response.id() })));
    }

    response.into_result()
}
