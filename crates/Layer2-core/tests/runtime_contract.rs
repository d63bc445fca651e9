//! Runtime 통합 테스트 - 디스패처 계약 검증
//!
//! `cargo test -p hominem-core --test runtime_contract`

use async_trait::async_trait;
use hominem_core::{
    coerce, contract, CliFailure, Command, CommandInput, CommandMeta, CommandRegistry,
    CommandRoute, Empty, ExecutionContext, RunOptions, Runtime, Stdio,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Stub commands
// ============================================================================

#[derive(Debug, Deserialize)]
struct EchoArgs {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EchoFlags {
    #[serde(default, deserialize_with = "coerce::optional_number")]
    repeat_count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EchoOutput {
    name: String,
    repeat_count: u32,
    format: String,
}

struct Echo {
    name: &'static str,
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl Command for Echo {
    type Args = EchoArgs;
    type Flags = EchoFlags;
    type Output = EchoOutput;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new(self.name)
            .summary("Echo a name")
            .description("Returns its input.")
            .args(&["name"])
            .flags(&["repeat-count"])
    }

    async fn run(
        &self,
        input: CommandInput<EchoArgs, EchoFlags>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<EchoOutput> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(EchoOutput {
            name: input.args.name,
            repeat_count: input.flags.repeat_count.unwrap_or(1),
            format: ctx.output_format.to_string(),
        })
    }
}

enum Behavior {
    Classified,
    Unclassified,
    Panic,
}

struct Failing(Behavior);

#[async_trait]
impl Command for Failing {
    type Args = Empty;
    type Flags = Empty;
    type Output = Empty;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("fail").summary("Always fails")
    }

    async fn run(
        &self,
        _input: CommandInput<Empty, Empty>,
        _ctx: &ExecutionContext,
    ) -> anyhow::Result<Empty> {
        match self.0 {
            Behavior::Classified => Err(CliFailure::auth("AUTH_REQUIRED", "Please log in")
                .with_hint("run auth login")
                .into()),
            Behavior::Unclassified => Err(anyhow::anyhow!("disk on fire")),
            Behavior::Panic => panic!("invariant broken"),
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    runtime: Runtime,
    runs: Arc<AtomicUsize>,
}

fn harness() -> Harness {
    let runs = Arc::new(AtomicUsize::new(0));
    let (short, long) = (Arc::clone(&runs), Arc::clone(&runs));

    let registry = CommandRegistry::new()
        .with_route(CommandRoute::new("demo", "Demo domain", move || {
            contract(Echo {
                name: "demo",
                runs: Arc::clone(&short),
            })
        }))
        .with_route(CommandRoute::new("demo echo", "Echo a name", move || {
            contract(Echo {
                name: "demo echo",
                runs: Arc::clone(&long),
            })
        }))
        .with_route(CommandRoute::new("fail auth", "Fails", || {
            contract(Failing(Behavior::Classified))
        }))
        .with_route(CommandRoute::new("fail boom", "Fails", || {
            contract(Failing(Behavior::Unclassified))
        }))
        .with_route(CommandRoute::new("fail panic", "Fails", || {
            contract(Failing(Behavior::Panic))
        }));

    Harness {
        runtime: Runtime::new(registry),
        runs,
    }
}

struct Output {
    code: i32,
    stdout: String,
    stderr: String,
}

async fn run(harness: &Harness, argv: &[&str]) -> Output {
    let (stdio, out, err) = Stdio::captured();
    let options = RunOptions::new(stdio)
        .with_cwd(std::env::temp_dir())
        .with_env(Default::default());
    let code = harness.runtime.run(argv.iter().copied(), options).await;
    Output {
        code,
        stdout: out.contents(),
        stderr: err.contents(),
    }
}

fn parse(text: &str) -> Value {
    serde_json::from_str(text.trim()).expect("valid JSON envelope")
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_command_in_every_format() {
    let h = harness();

    let text = run(&h, &["nope", "x"]).await;
    assert_eq!(text.code, 2);
    assert!(text.stdout.is_empty());
    assert!(text.stderr.starts_with("UNKNOWN_COMMAND: "));

    for format in ["json", "ndjson"] {
        let out = run(&h, &["nope", "--format", format]).await;
        assert_eq!(out.code, 2);
        assert!(out.stdout.is_empty());

        let envelope = parse(&out.stderr);
        assert_eq!(envelope["ok"], json!(false));
        assert_eq!(envelope["code"], json!("UNKNOWN_COMMAND"));
        assert_eq!(envelope["category"], json!("usage"));
        assert!(envelope.get("requestId").is_none());
    }
}

#[tokio::test]
async fn test_longest_prefix_route_runs() {
    let h = harness();
    let out = run(&h, &["demo", "echo", "ada", "--format", "json"]).await;

    assert_eq!(out.code, 0, "stderr: {}", out.stderr);
    let envelope = parse(&out.stdout);
    assert_eq!(envelope["command"], json!("demo echo"));
    assert_eq!(envelope["data"]["name"], json!("ada"));
    assert_eq!(envelope["data"]["format"], json!("json"));
    assert_eq!(envelope["message"], json!("Echo a name"));
}

#[tokio::test]
async fn test_shorter_route_receives_extra_tokens() {
    let h = harness();
    let out = run(&h, &["demo", "grace", "--format", "json"]).await;

    assert_eq!(out.code, 0);
    let envelope = parse(&out.stdout);
    assert_eq!(envelope["command"], json!("demo"));
    assert_eq!(envelope["data"]["name"], json!("grace"));
}

#[tokio::test]
async fn test_flags_are_camel_cased_and_globals_not_forwarded() {
    let h = harness();
    let out = run(
        &h,
        &["demo", "echo", "ada", "--repeat-count", "3", "--verbose", "--format=ndjson"],
    )
    .await;

    assert_eq!(out.code, 0, "stderr: {}", out.stderr);
    assert_eq!(parse(&out.stdout)["data"]["repeatCount"], json!(3));
}

#[tokio::test]
async fn test_help_does_not_run_command() {
    let h = harness();
    let out = run(&h, &["demo", "echo", "--help", "--format", "json"]).await;

    assert_eq!(out.code, 0);
    assert_eq!(h.runs.load(Ordering::SeqCst), 0);
    assert!(out.stdout.starts_with("demo echo - Echo a name\n"));
    assert!(out.stdout.contains("hominem demo echo <name> [--flags]"));
    assert!(out.stderr.is_empty());
}

#[tokio::test]
async fn test_empty_path_prints_global_help() {
    let h = harness();
    for argv in [&[][..], &["--help"][..], &["--format", "json"][..]] {
        let out = run(&h, argv).await;
        assert_eq!(out.code, 0);
        assert!(out.stdout.contains("COMMANDS"));
        assert!(out.stdout.contains("demo echo"));
    }
    assert_eq!(h.runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_json_and_ndjson_carry_same_fields() {
    let h = harness();
    let json_out = run(&h, &["demo", "echo", "ada", "--format", "json"]).await;
    let ndjson_out = run(&h, &["demo", "echo", "ada", "--format", "ndjson"]).await;

    assert_eq!(ndjson_out.stdout.trim_end().lines().count(), 1);

    let mut a = parse(&json_out.stdout);
    let mut b = parse(&ndjson_out.stdout);
    a.as_object_mut().unwrap().remove("timestamp");
    b.as_object_mut().unwrap().remove("timestamp");
    a["data"].as_object_mut().unwrap().remove("format");
    b["data"].as_object_mut().unwrap().remove("format");
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_text_success_and_quiet() {
    let h = harness();

    let out = run(&h, &["demo", "echo", "ada"]).await;
    assert_eq!(out.code, 0);
    assert!(out.stdout.starts_with("Echo a name\n{"));

    let quiet = run(&h, &["demo", "echo", "ada", "--quiet"]).await;
    assert!(quiet.stdout.starts_with('{'));
}

#[tokio::test]
async fn test_missing_arg_is_validation_failure() {
    let h = harness();
    let out = run(&h, &["demo", "echo", "--format", "json"]).await;

    assert_eq!(out.code, 4);
    assert_eq!(h.runs.load(Ordering::SeqCst), 0);
    let envelope = parse(&out.stderr);
    assert_eq!(envelope["code"], json!("VALIDATION_ERROR"));
    assert_eq!(envelope["category"], json!("validation"));
    assert_eq!(envelope["details"]["issues"][0]["source"], json!("args"));
}

#[tokio::test]
async fn test_bad_flag_is_validation_failure() {
    let h = harness();
    let out = run(&h, &["demo", "echo", "ada", "--repeat-count", "lots", "--format", "json"]).await;

    assert_eq!(out.code, 4);
    assert_eq!(parse(&out.stderr)["details"]["issues"][0]["source"], json!("flags"));

    let unknown = run(&h, &["demo", "echo", "ada", "--bogus", "--format", "json"]).await;
    assert_eq!(unknown.code, 4);
}

#[tokio::test]
async fn test_classified_failure_keeps_category() {
    let h = harness();
    let out = run(&h, &["fail", "auth", "--format", "json"]).await;

    assert_eq!(out.code, 3);
    let envelope = parse(&out.stderr);
    assert_eq!(envelope["code"], json!("AUTH_REQUIRED"));
    assert_eq!(envelope["hint"], json!("run auth login"));
    assert_eq!(envelope["command"], json!("fail"));
    assert!(envelope["requestId"].as_str().is_some());
}

#[tokio::test]
async fn test_unclassified_failure_is_internal() {
    let h = harness();
    let out = run(&h, &["fail", "boom", "--format", "json"]).await;

    assert_eq!(out.code, 10);
    let envelope = parse(&out.stderr);
    assert_eq!(envelope["code"], json!("INTERNAL_ERROR"));
    assert_eq!(envelope["message"], json!("disk on fire"));
}

#[tokio::test]
async fn test_panic_is_internal() {
    let h = harness();
    let out = run(&h, &["fail", "panic", "--format", "ndjson"]).await;

    assert_eq!(out.code, 10);
    let envelope = parse(&out.stderr);
    assert_eq!(envelope["category"], json!("internal"));
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .contains("invariant broken"));
}

#[tokio::test]
async fn test_invalid_format_is_usage_in_text() {
    let h = harness();
    let out = run(&h, &["demo", "echo", "ada", "--format", "yaml"]).await;

    assert_eq!(out.code, 2);
    assert!(out.stderr.starts_with("INVALID_FORMAT: "));
    assert_eq!(h.runs.load(Ordering::SeqCst), 0);
}
