//! hominem-cli: automation-first command line
//!
//! Layer4 - 바이너리 레이어
//!
//! - `routes`: 정적 라우트 테이블
//! - `commands`: config / system / data / files leaf 명령

pub mod commands;
pub mod routes;

pub use routes::command_registry;

use hominem_core::{RunOptions, Runtime};

/// 인자 목록으로 한 번 실행하고 exit code 반환
pub async fn run<I, S>(argv: I, options: RunOptions) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Runtime::new(command_registry()).run(argv, options).await
}
