//! hominem-core: Core Runtime for hominem
//!
//! Layer2 - 명령 디스패치 레이어
//!
//! # 주요 모듈
//!
//! - `argv`: 원시 인자 → 명령 경로 / 위치 인자 / 플래그 / 전역 플래그
//! - `command`: 명령 계약 (`Command` trait), 실행 컨텍스트, stdio
//! - `registry`: 라우트 테이블 + 최장 접두사 매칭
//! - `output`: envelope와 text/json/ndjson 렌더러
//! - `help`: 도움말 텍스트
//! - `plugin`: 매니페스트 검증 + 1회성 stdio 서브프로세스 호출
//! - `runtime`: 디스패처 상태 머신
//!
//! # 사용 예시
//!
//! ```ignore
//! use hominem_core::{CommandRegistry, CommandRoute, RunOptions, Runtime, contract};
//!
//! let registry = CommandRegistry::new()
//!     .with_route(CommandRoute::new("system doctor", "Check the environment", || {
//!         contract(DoctorCommand)
//!     }));
//!
//! let code = Runtime::new(registry)
//!     .run(std::env::args().skip(1), RunOptions::process())
//!     .await;
//! std::process::exit(code);
//! ```

pub mod argv;
pub mod command;
pub mod help;
pub mod output;
pub mod plugin;
pub mod registry;
pub mod runtime;

// Re-exports: Argv
pub use argv::{parse_argv, GlobalFlags, ParseResult};

// Re-exports: Command
pub use command::{
    contract, coerce, BoundCommand, CaptureBuffer, Command, CommandContract, CommandInput,
    CommandMeta, Contract, Empty, ExecuteError, ExecutionContext, IssueSource, SchemaIssue, Stdio,
    Telemetry,
};

// Re-exports: Registry
pub use registry::{CommandRegistry, CommandRoute, ContractLoader, RouteMatch};

// Re-exports: Output
pub use output::{Envelope, FailureEnvelope, Renderer, SuccessEnvelope};

// Re-exports: Plugin
pub use plugin::{
    LoadedPlugin, PluginInvoker, PluginManifest, PluginPermission, RpcRequest, RpcResponse,
};

// Re-exports: Runtime
pub use runtime::{RunOptions, Runtime, DEFAULT_BINARY_NAME};

// Re-exports: Foundation (명령 작성자 편의)
pub use hominem_foundation::{CliFailure, ErrorCategory, JsonMap, JsonValue, OutputFormat};
