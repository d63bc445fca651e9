//! Runtime - 명령 디스패처
//!
//! ```text
//! ParseArgv → ResolveRoute → LoadContract ─(--help)─▶ Help, exit 0
//!                                  │
//!                                  ▼
//!            BindArgs → Validate → BuildContext → Execute → ValidateOutput
//!                                                              │
//!                                                              ▼
//!                                                   Render envelope, exit code
//! ```
//!
//! 모든 실패는 하나의 envelope로 렌더링되며 exit code는 category로 결정됩니다.

use crate::argv::{parse_argv, to_camel_case};
use crate::command::{ExecuteError, ExecutionContext, SchemaIssue, Stdio};
use crate::help::{render_command_help, render_global_help};
use crate::output::{Envelope, Renderer};
use crate::registry::CommandRegistry;
use futures::FutureExt;
use hominem_foundation::{CliFailure, JsonMap, JsonValue, OutputFormat, EXIT_SUCCESS};
use serde_json::json;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 기본 바이너리 이름 (도움말/힌트용)
pub const DEFAULT_BINARY_NAME: &str = "hominem";

// ============================================================================
// RunOptions
// ============================================================================

/// 호출 단위 옵션 - 호스트(바이너리/테스트)가 주입
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub binary_name: String,
    /// 없으면 프로세스 cwd
    pub cwd: Option<PathBuf>,
    /// 없으면 프로세스 환경 변수
    pub env: Option<HashMap<String, String>>,
    pub stdio: Stdio,
    /// Ctrl-C 리스너 설치 여부
    pub listen_for_interrupt: bool,
}

impl RunOptions {
    pub fn new(stdio: Stdio) -> Self {
        Self {
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            cwd: None,
            env: None,
            stdio,
            listen_for_interrupt: false,
        }
    }

    /// 프로세스 값 그대로 (바이너리용)
    pub fn process() -> Self {
        Self::new(Stdio::inherit()).with_interrupt_listener(true)
    }

    pub fn with_binary_name(mut self, name: impl Into<String>) -> Self {
        self.binary_name = name.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_interrupt_listener(mut self, enabled: bool) -> Self {
        self.listen_for_interrupt = enabled;
        self
    }
}

// ============================================================================
// Runtime
// ============================================================================

/// 디스패처
#[derive(Debug, Clone)]
pub struct Runtime {
    registry: CommandRegistry,
}

impl Runtime {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// 한 번의 호출 실행 - 프로세스 exit code 반환
    pub async fn run<I, S>(&self, argv: I, options: RunOptions) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stdio = options.stdio.clone();

        let parsed = match parse_argv(argv) {
            Ok(parsed) => parsed,
            Err(failure) => {
                debug!("Argv rejected: {}", failure);
                return emit(
                    &Renderer::new(OutputFormat::Text),
                    Envelope::failure("", failure),
                    &stdio,
                );
            }
        };

        let globals = parsed.globals.clone();
        let renderer = Renderer::new(globals.format).with_quiet(globals.quiet);

        if parsed.command_tokens.is_empty() {
            write_help(&stdio, &render_global_help(&options.binary_name, &self.registry));
            return EXIT_SUCCESS;
        }

        let command_path = parsed.command_tokens.join(" ");
        let Some(matched) = self.registry.resolve(&parsed.command_tokens) else {
            debug!("No route for '{}'", command_path);
            let failure = CliFailure::usage(
                "UNKNOWN_COMMAND",
                format!("Unknown command: {}", command_path),
            )
            .with_hint(format!("Run `{} --help` to list commands", options.binary_name));
            return emit(&renderer, Envelope::failure(command_path, failure), &stdio);
        };

        debug!("Resolved route '{}'", matched.route.name());
        let contract = matched.route.load();
        let meta = contract.meta().clone();

        if globals.help {
            write_help(&stdio, &render_command_help(&options.binary_name, &meta));
            return EXIT_SUCCESS;
        }

        let positional: Vec<String> = matched
            .extra_args
            .into_iter()
            .chain(parsed.positional_args)
            .collect();
        let args = bind_positional(&meta.arg_names, &positional);
        let flags = camel_case_keys(parsed.flags);

        let bound = match contract.bind(args, flags) {
            Ok(bound) => bound,
            Err(issues) => {
                debug!("Input validation failed for '{}'", meta.name);
                let failure = validation_failure("Invalid command input", &issues);
                return emit(&renderer, Envelope::failure(&meta.name, failure), &stdio);
            }
        };

        let cancellation = CancellationToken::new();
        let _interrupt = options
            .listen_for_interrupt
            .then(|| InterruptListener::spawn(cancellation.clone()));

        let cwd = options
            .cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let env = options
            .env
            .clone()
            .unwrap_or_else(|| std::env::vars().collect());

        let ctx = ExecutionContext::new(cwd, env, stdio.clone())
            .with_output_format(globals.format)
            .with_switches(globals.quiet, globals.verbose, globals.interactive)
            .with_cancellation(cancellation);
        let request_id = ctx.request_id().to_string();

        debug!("Executing '{}' (request {})", meta.name, request_id);

        let outcome = AssertUnwindSafe(bound.execute(&ctx)).catch_unwind().await;
        let envelope = match outcome {
            Ok(Ok(data)) => {
                let message = Some(meta.summary.clone()).filter(|s| !s.is_empty());
                Envelope::success(&meta.name, data, message)
            }
            Ok(Err(ExecuteError::Output(issues))) => Envelope::failure(
                &meta.name,
                validation_failure("Command output failed validation", &issues),
            )
            .with_request_id(&request_id),
            Ok(Err(ExecuteError::Run(error))) => {
                Envelope::failure(&meta.name, classify(error)).with_request_id(&request_id)
            }
            Err(panic) => Envelope::failure(
                &meta.name,
                CliFailure::internal("INTERNAL_ERROR", panic_message(panic.as_ref())),
            )
            .with_request_id(&request_id),
        };

        debug!(
            "Finished '{}' (request {}, exit {})",
            meta.name,
            request_id,
            envelope.exit_code()
        );
        emit(&renderer, envelope, &stdio)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Ctrl-C → 취소 토큰. drop 시 리스너 제거
struct InterruptListener(JoinHandle<()>);

impl InterruptListener {
    fn spawn(token: CancellationToken) -> Self {
        Self(tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Interrupt received, cancelling");
                token.cancel();
            }
        }))
    }
}

impl Drop for InterruptListener {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// 위치 인자를 이름과 순서대로 짝지음 (빈 값/남는 값은 버림)
pub fn bind_positional(names: &[String], values: &[String]) -> JsonMap<String, JsonValue> {
    names
        .iter()
        .zip(values)
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name.clone(), JsonValue::String(value.clone())))
        .collect()
}

fn camel_case_keys(flags: JsonMap<String, JsonValue>) -> JsonMap<String, JsonValue> {
    flags
        .into_iter()
        .map(|(key, value)| (to_camel_case(&key), value))
        .collect()
}

fn validation_failure(message: &str, issues: &[SchemaIssue]) -> CliFailure {
    CliFailure::validation("VALIDATION_ERROR", message).with_details(json!({ "issues": issues }))
}

/// 실행 에러 분류 - 분류된 실패는 그대로, 나머지는 internal
fn classify(error: anyhow::Error) -> CliFailure {
    if let Some(failure) = error.chain().find_map(|e| e.downcast_ref::<CliFailure>()) {
        return failure.clone();
    }
    CliFailure::internal("INTERNAL_ERROR", error.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("Command panicked: {}", detail)
}

fn write_help(stdio: &Stdio, text: &str) {
    if let Err(e) = stdio.write_out(text) {
        debug!("Failed to write help: {}", e);
    }
}

fn emit(renderer: &Renderer, envelope: Envelope, stdio: &Stdio) -> i32 {
    if let Err(e) = renderer.emit(&envelope, stdio) {
        debug!("Failed to write envelope: {}", e);
    }
    envelope.exit_code()
}
