//! Command 모듈 - 명령 계약과 실행 컨텍스트

pub mod coerce;
mod context;
mod contract;
mod stdio;

pub use context::{ExecutionContext, Telemetry};
pub use contract::{
    contract, BoundCommand, Command, CommandContract, CommandInput, CommandMeta, Contract, Empty,
    ExecuteError, IssueSource, SchemaIssue,
};
pub use stdio::{CaptureBuffer, Stdio};
