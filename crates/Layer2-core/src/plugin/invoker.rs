//! Plugin Invoker - 서브프로세스 1회 호출
//!
//! 호출마다 새 프로세스를 띄워 요청 한 줄을 쓰고 stdin을 닫은 뒤,
//! 종료(프로세스 종료 + 두 스트림 EOF) / 타임아웃 중 먼저 오는 쪽으로 결과를 결정합니다.
//!
//! - 타임아웃 시 종료 신호는 한 번만 보냄 (SIGTERM, 에스컬레이션 없음)
//! - stdout/stderr는 별도 task로 동시에 버퍼링

use super::manifest::{load_plugin, LoadedPlugin};
use super::protocol::{parse_response, RpcRequest};
use hominem_foundation::{CliFailure, JsonValue};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 런타임 바이너리 재정의 환경 변수
pub const ENV_PLUGIN_RUNTIME: &str = "HOMINEM_PLUGIN_RUNTIME";

/// 플러그인 프로세스에 전달되는 이름 환경 변수
pub const ENV_PLUGIN_NAME: &str = "HOMINEM_PLUGIN_NAME";

/// 기본 타임아웃
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 플러그인 호출기
#[derive(Debug, Clone)]
pub struct PluginInvoker {
    runtime_binary: Option<PathBuf>,
    runtime_args: Vec<String>,
    timeout: Duration,
    env: HashMap<String, String>,
}

impl Default for PluginInvoker {
    fn default() -> Self {
        Self::new()
    }
}

enum Outcome {
    Closed {
        status: std::io::Result<ExitStatus>,
        stdout: String,
        stderr: String,
    },
    TimedOut,
}

impl PluginInvoker {
    /// 프로세스 환경 기준
    pub fn new() -> Self {
        Self::from_env(std::env::vars().collect())
    }

    /// 캡처된 환경 기준 (런타임 재정의 조회용)
    pub fn from_env(env: HashMap<String, String>) -> Self {
        Self {
            runtime_binary: None,
            runtime_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            env,
        }
    }

    /// 빌더 패턴: 런타임 바이너리 지정
    pub fn with_runtime_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.runtime_binary = Some(binary.into());
        self
    }

    /// 빌더 패턴: entry 앞에 붙는 런타임 인자
    pub fn with_runtime_args(mut self, args: Vec<String>) -> Self {
        self.runtime_args = args;
        self
    }

    /// 빌더 패턴: 타임아웃
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 런타임 바이너리 결정: 파라미터 → 환경 변수 → 현재 실행 파일
    pub fn resolve_runtime(&self) -> Result<PathBuf, CliFailure> {
        if let Some(binary) = &self.runtime_binary {
            return Ok(binary.clone());
        }
        if let Some(binary) = self
            .env
            .get(ENV_PLUGIN_RUNTIME)
            .filter(|v| !v.trim().is_empty())
        {
            return Ok(PathBuf::from(binary));
        }
        std::env::current_exe().map_err(|e| {
            CliFailure::dependency(
                "PLUGIN_SPAWN_FAILED",
                format!("Cannot determine plugin runtime: {}", e),
            )
        })
    }

    /// 플러그인 루트를 검증하고 메서드 호출
    pub async fn invoke(
        &self,
        plugin_root: &Path,
        method: &str,
        params: Option<JsonValue>,
    ) -> Result<JsonValue, CliFailure> {
        let plugin = load_plugin(plugin_root)?;
        self.invoke_loaded(&plugin, method, params).await
    }

    /// 이미 검증된 플러그인 호출
    pub async fn invoke_loaded(
        &self,
        plugin: &LoadedPlugin,
        method: &str,
        params: Option<JsonValue>,
    ) -> Result<JsonValue, CliFailure> {
        let runtime = self.resolve_runtime()?;
        let request = RpcRequest::new(method, params);
        let line = request.to_line()?;

        let mut args = self.runtime_args.clone();
        args.push(plugin.entry.display().to_string());

        info!(
            "Spawning plugin '{}' via {} (method {}, request {})",
            plugin.manifest.name,
            runtime.display(),
            method,
            request.id
        );

        let mut child = Command::new(&runtime)
            .args(&args)
            .current_dir(&plugin.root)
            .env(ENV_PLUGIN_NAME, &plugin.manifest.name)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                CliFailure::dependency(
                    "PLUGIN_SPAWN_FAILED",
                    format!("Failed to spawn plugin runtime '{}': {}", runtime.display(), e),
                )
                .with_details(json!({
                    "runtimeBinary": runtime.display().to_string(),
                    "args": args,
                }))
            })?;

        let mut stdout_reader = spawn_reader(child.stdout.take());
        let mut stderr_reader = spawn_reader(child.stderr.take());
        let mut stdin = child.stdin.take();

        let outcome = {
            let exchange = async {
                if let Some(mut pipe) = stdin.take() {
                    if let Err(e) = pipe.write_all(line.as_bytes()).await {
                        debug!("Plugin stdin write failed: {}", e);
                    }
                    drop(pipe);
                }
                let status = child.wait().await;
                // 두 스트림 EOF까지 타임아웃에 포함 (자손 프로세스가 파이프를 잡고 있을 수 있음)
                let stdout = drain(&mut stdout_reader).await;
                let stderr = drain(&mut stderr_reader).await;
                Outcome::Closed {
                    status,
                    stdout,
                    stderr,
                }
            };

            tokio::select! {
                outcome = exchange => outcome,
                _ = tokio::time::sleep(self.timeout) => Outcome::TimedOut,
            }
        };

        let (status, stdout, stderr) = match outcome {
            Outcome::TimedOut => {
                warn!(
                    "Plugin '{}' timed out after {}ms",
                    plugin.manifest.name,
                    self.timeout.as_millis()
                );
                terminate(&mut child);
                stdout_reader.abort();
                stderr_reader.abort();
                return Err(CliFailure::dependency(
                    "PLUGIN_RPC_TIMEOUT",
                    format!(
                        "Plugin '{}' did not respond within {}ms",
                        plugin.manifest.name,
                        self.timeout.as_millis()
                    ),
                )
                .with_details(json!({ "timeoutMs": self.timeout.as_millis() as u64 })));
            }
            Outcome::Closed {
                status,
                stdout,
                stderr,
            } => (status, stdout, stderr),
        };

        let status = status.map_err(|e| {
            CliFailure::dependency(
                "PLUGIN_PROCESS_FAILED",
                format!("Failed to wait for plugin process: {}", e),
            )
        })?;

        if !status.success() {
            debug!("Plugin exited with {}", status);
            return Err(CliFailure::dependency(
                "PLUGIN_PROCESS_FAILED",
                format!("Plugin '{}' exited with {}", plugin.manifest.name, status),
            )
            .with_details(json!({
                "stderr": stderr,
                "stdout": stdout,
                "runtimeBinary": runtime.display().to_string(),
                "args": args,
                "exitCode": status.code(),
            })));
        }

        parse_response(&stdout, &request.id)
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            if let Err(e) = pipe.read_to_end(&mut buf).await {
                debug!("Plugin stream read failed: {}", e);
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

async fn drain(reader: &mut JoinHandle<String>) -> String {
    reader.await.unwrap_or_default()
}

/// 종료 신호 1회
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            // SAFETY: pid는 아직 회수되지 않은 자식 프로세스
            let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
            if rc != 0 {
                debug!("SIGTERM to {} failed: {}", pid, std::io::Error::last_os_error());
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = child.start_kill() {
            debug!("Failed to terminate plugin: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_resolution_order() {
        let env = HashMap::from([(ENV_PLUGIN_RUNTIME.to_string(), "/opt/node".to_string())]);

        let explicit = PluginInvoker::from_env(env.clone()).with_runtime_binary("/bin/sh");
        assert_eq!(explicit.resolve_runtime().unwrap(), PathBuf::from("/bin/sh"));

        let from_env = PluginInvoker::from_env(env);
        assert_eq!(from_env.resolve_runtime().unwrap(), PathBuf::from("/opt/node"));

        let fallback = PluginInvoker::from_env(HashMap::new());
        assert_eq!(
            fallback.resolve_runtime().unwrap(),
            std::env::current_exe().unwrap()
        );
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(PluginInvoker::from_env(HashMap::new()).timeout(), DEFAULT_TIMEOUT);
    }
}
