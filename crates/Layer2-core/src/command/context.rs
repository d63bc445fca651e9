//! Execution Context - 명령 실행 환경
//!
//! 한 번의 호출 동안만 존재하며 불변입니다.
//! 취소 신호만 외부(인터럽트 리스너)에서 바뀝니다.

use super::stdio::Stdio;
use chrono::{DateTime, Utc};
use hominem_foundation::{CliFailure, ConfigStore, OutputFormat};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// 호출 단위 텔레메트리
#[derive(Debug, Clone)]
pub struct Telemetry {
    pub request_id: String,
    pub started_at: DateTime<Utc>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

/// 명령에 전달되는 실행 컨텍스트
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub cwd: PathBuf,
    pub env: HashMap<String, String>,
    pub stdio: Stdio,
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub interactive: bool,
    pub telemetry: Telemetry,
    cancellation: CancellationToken,
}

impl ExecutionContext {
    pub fn new(cwd: impl Into<PathBuf>, env: HashMap<String, String>, stdio: Stdio) -> Self {
        Self {
            cwd: cwd.into(),
            env,
            stdio,
            output_format: OutputFormat::default(),
            quiet: false,
            verbose: false,
            interactive: false,
            telemetry: Telemetry::new(),
            cancellation: CancellationToken::new(),
        }
    }

    /// 빌더 패턴: 출력 모드
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// 빌더 패턴: 전역 플래그
    pub fn with_switches(mut self, quiet: bool, verbose: bool, interactive: bool) -> Self {
        self.quiet = quiet;
        self.verbose = verbose;
        self.interactive = interactive;
        self
    }

    /// 빌더 패턴: 취소 토큰 (인터럽트 리스너와 공유)
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn request_id(&self) -> &str {
        &self.telemetry.request_id
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// 취소되었으면 `ABORTED` 실패
    pub fn ensure_active(&self) -> Result<(), CliFailure> {
        if self.is_cancelled() {
            return Err(CliFailure::dependency("ABORTED", "Command was interrupted"));
        }
        Ok(())
    }

    /// 환경 변수 조회 (캡처된 값)
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// cwd 기준 경로 해석
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// 사용자 설정 저장소
    pub fn config_store(&self) -> Result<ConfigStore, CliFailure> {
        ConfigStore::from_env(&self.env).map_err(CliFailure::from)
    }
}
