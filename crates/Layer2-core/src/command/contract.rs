//! Command Contract - 명령 계약
//!
//! 명령 작성자는 [`Command`]를 타입 있는 args/flags/output으로 구현하고,
//! 런타임은 타입이 지워진 [`CommandContract`]만 다룹니다.
//!
//! ```text
//! JsonMap(args) ─┐
//!                ├─ bind() ─▶ BoundCommand ─ execute(ctx) ─▶ JsonValue
//! JsonMap(flags)─┘  (args/flags 검증)          (output 검증)
//! ```

use super::context::ExecutionContext;
use async_trait::async_trait;
use futures::future::BoxFuture;
use hominem_foundation::{JsonMap, JsonValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Meta
// ============================================================================

/// 명령 메타데이터 (도움말/envelope에 사용)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandMeta {
    /// 공백으로 구분된 라우트 이름 (예: "config get")
    pub name: String,
    pub summary: String,
    pub description: String,
    /// 위치 인자 이름 (순서대로 바인딩)
    pub arg_names: Vec<String>,
    /// 도움말에 표시할 플래그 이름 (kebab-case)
    pub flag_names: Vec<String>,
}

impl CommandMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn args(mut self, names: &[&str]) -> Self {
        self.arg_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn flags(mut self, names: &[&str]) -> Self {
        self.flag_names = names.iter().map(|n| n.to_string()).collect();
        self
    }
}

// ============================================================================
// Schema issues
// ============================================================================

/// 검증 실패 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSource {
    Args,
    Flags,
    Output,
}

/// 스키마 검증 이슈
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaIssue {
    pub source: IssueSource,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(source: IssueSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            IssueSource::Args => "args",
            IssueSource::Flags => "flags",
            IssueSource::Output => "output",
        };
        write!(f, "{}: {}", source, self.message)
    }
}

// ============================================================================
// Typed command
// ============================================================================

/// 검증된 명령 입력
#[derive(Debug, Clone)]
pub struct CommandInput<A, F> {
    pub args: A,
    pub flags: F,
}

/// 인자/플래그가 없는 명령용
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}

/// 타입 있는 명령
///
/// `run`이 [`hominem_foundation::CliFailure`]를 반환하면 그 분류를 그대로 쓰고,
/// 그 외의 에러는 `internal`로 분류됩니다.
#[async_trait]
pub trait Command: Send + Sync + 'static {
    type Args: DeserializeOwned + Send + 'static;
    type Flags: DeserializeOwned + Send + 'static;
    type Output: Serialize + Send + 'static;

    fn meta(&self) -> CommandMeta;

    async fn run(
        &self,
        input: CommandInput<Self::Args, Self::Flags>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<Self::Output>;
}

// ============================================================================
// Erased contract
// ============================================================================

/// 실행 단계 실패
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// `run`이 반환한 에러
    #[error(transparent)]
    Run(anyhow::Error),
    /// 출력 검증 실패
    #[error("output failed validation ({} issues)", .0.len())]
    Output(Vec<SchemaIssue>),
}

/// args/flags가 바인딩된 실행 대기 명령
pub trait BoundCommand: Send {
    fn execute<'a>(
        self: Box<Self>,
        ctx: &'a ExecutionContext,
    ) -> BoxFuture<'a, Result<JsonValue, ExecuteError>>;
}

/// 런타임이 보는 명령 계약
pub trait CommandContract: Send + Sync {
    fn meta(&self) -> &CommandMeta;

    /// args/flags 검증 - 실패 시 모든 이슈 반환
    fn bind(
        &self,
        args: JsonMap<String, JsonValue>,
        flags: JsonMap<String, JsonValue>,
    ) -> Result<Box<dyn BoundCommand>, Vec<SchemaIssue>>;
}

/// [`Command`] → [`CommandContract`] 어댑터
pub struct Contract<C: Command> {
    meta: CommandMeta,
    command: Arc<C>,
}

impl<C: Command> Contract<C> {
    pub fn new(command: C) -> Self {
        Self {
            meta: command.meta(),
            command: Arc::new(command),
        }
    }
}

/// 타입 지운 계약 생성
pub fn contract<C: Command>(command: C) -> Arc<dyn CommandContract> {
    Arc::new(Contract::new(command))
}

fn decode<T: DeserializeOwned>(
    source: IssueSource,
    map: JsonMap<String, JsonValue>,
    issues: &mut Vec<SchemaIssue>,
) -> Option<T> {
    match serde_json::from_value(JsonValue::Object(map)) {
        Ok(value) => Some(value),
        Err(e) => {
            issues.push(SchemaIssue::new(source, e.to_string()));
            None
        }
    }
}

impl<C: Command> CommandContract for Contract<C> {
    fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    fn bind(
        &self,
        args: JsonMap<String, JsonValue>,
        flags: JsonMap<String, JsonValue>,
    ) -> Result<Box<dyn BoundCommand>, Vec<SchemaIssue>> {
        let mut issues = Vec::new();
        let args = decode::<C::Args>(IssueSource::Args, args, &mut issues);
        let flags = decode::<C::Flags>(IssueSource::Flags, flags, &mut issues);

        match (args, flags) {
            (Some(args), Some(flags)) => Ok(Box::new(Bound {
                command: Arc::clone(&self.command),
                input: CommandInput { args, flags },
            })),
            _ => Err(issues),
        }
    }
}

struct Bound<C: Command> {
    command: Arc<C>,
    input: CommandInput<C::Args, C::Flags>,
}

impl<C: Command> BoundCommand for Bound<C> {
    fn execute<'a>(
        self: Box<Self>,
        ctx: &'a ExecutionContext,
    ) -> BoxFuture<'a, Result<JsonValue, ExecuteError>> {
        Box::pin(async move {
            let Bound { command, input } = *self;
            let output = command.run(input, ctx).await.map_err(ExecuteError::Run)?;
            serde_json::to_value(&output).map_err(|e| {
                ExecuteError::Output(vec![SchemaIssue::new(IssueSource::Output, e.to_string())])
            })
        })
    }
}
