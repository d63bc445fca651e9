//! Command Route - 라우트 테이블 항목

use crate::command::CommandContract;
use std::fmt;
use std::sync::Arc;

/// 계약 지연 로더
pub type ContractLoader = Arc<dyn Fn() -> Arc<dyn CommandContract> + Send + Sync>;

/// 라우트 항목
///
/// 계약은 매칭된 라우트에 대해서만 로드됩니다.
#[derive(Clone)]
pub struct CommandRoute {
    /// 명령 경로 토큰 (예: ["system", "plugin", "call"])
    pub id: Vec<String>,
    pub summary: String,
    pub description: String,
    loader: ContractLoader,
}

impl CommandRoute {
    /// `id`는 공백으로 구분된 경로 문자열
    pub fn new<F>(id: &str, summary: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Arc<dyn CommandContract> + Send + Sync + 'static,
    {
        Self {
            id: id.split_whitespace().map(str::to_string).collect(),
            summary: summary.into(),
            description: String::new(),
            loader: Arc::new(loader),
        }
    }

    /// 빌더 패턴: 설명 설정
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 공백으로 연결한 경로
    pub fn name(&self) -> String {
        self.id.join(" ")
    }

    pub fn depth(&self) -> usize {
        self.id.len()
    }

    /// 계약 로드
    pub fn load(&self) -> Arc<dyn CommandContract> {
        (self.loader)()
    }

    /// 토큰 시퀀스의 접두사인지
    pub fn is_prefix_of(&self, tokens: &[String]) -> bool {
        tokens.len() >= self.id.len() && self.id.iter().zip(tokens).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for CommandRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRoute")
            .field("id", &self.id)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}
