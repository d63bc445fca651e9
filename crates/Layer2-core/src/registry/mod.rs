//! # Command Registry
//!
//! 정적 라우트 테이블과 최장 접두사 매칭
//!
//! ```text
//! tokens: [system, plugin, call, ./p, ping]
//!           └──── route ────┘  └ extra ┘
//! ```
//!
//! 매칭되지 않은 꼬리 토큰은 `extra_args`로 돌려주어
//! 위치 인자 앞에 붙입니다.

mod route;

pub use route::{CommandRoute, ContractLoader};

use tracing::debug;

/// 라우트 해석 결과
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a CommandRoute,
    /// 라우트가 소비한 토큰 수
    pub consumed: usize,
    /// 소비되지 않은 경로 토큰 (순서 유지)
    pub extra_args: Vec<String>,
}

/// 라우트 레지스트리
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    routes: Vec<CommandRoute>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 라우트 등록 - 같은 id가 이미 있으면 무시하고 `false`
    pub fn register(&mut self, route: CommandRoute) -> bool {
        if route.id.is_empty() || self.find_exact(&route.id).is_some() {
            debug!("Skipping duplicate or empty route '{}'", route.name());
            return false;
        }
        self.routes.push(route);
        true
    }

    /// 빌더 패턴: 라우트 추가
    pub fn with_route(mut self, route: CommandRoute) -> Self {
        self.register(route);
        self
    }

    /// 등록 순서대로 모든 라우트
    pub fn routes(&self) -> &[CommandRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// 정확히 일치하는 라우트
    pub fn find_exact<S: AsRef<str>>(&self, id: &[S]) -> Option<&CommandRoute> {
        self.routes.iter().find(|route| {
            route.id.len() == id.len() && route.id.iter().zip(id).all(|(a, b)| a == b.as_ref())
        })
    }

    /// 최장 접두사 매칭
    ///
    /// 길이가 같은 라우트가 여럿이면 먼저 등록된 것이 이깁니다.
    pub fn resolve(&self, tokens: &[String]) -> Option<RouteMatch<'_>> {
        let mut best: Option<&CommandRoute> = None;
        for route in &self.routes {
            if !route.is_prefix_of(tokens) {
                continue;
            }
            if best.map_or(true, |b| route.depth() > b.depth()) {
                best = Some(route);
            }
        }

        best.map(|route| RouteMatch {
            route,
            consumed: route.depth(),
            extra_args: tokens[route.depth()..].to_vec(),
        })
    }

    /// 바로 아래 단계 라우트 (도메인 루트의 하위 명령 목록용)
    pub fn children<S: AsRef<str>>(&self, prefix: &[S]) -> Vec<&CommandRoute> {
        self.routes
            .iter()
            .filter(|route| {
                route.depth() == prefix.len() + 1
                    && route.id.iter().zip(prefix).all(|(a, b)| a == b.as_ref())
            })
            .collect()
    }

    /// 접두사 아래의 모든 라우트 (접두사 자신 제외)
    pub fn descendants<S: AsRef<str>>(&self, prefix: &[S]) -> Vec<&CommandRoute> {
        self.routes
            .iter()
            .filter(|route| {
                route.depth() > prefix.len()
                    && route.id.iter().zip(prefix).all(|(a, b)| a == b.as_ref())
            })
            .collect()
    }

    /// 최상위 도메인 이름 (등록 순서, 중복 제거)
    pub fn domains(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for route in &self.routes {
            let head = route.id[0].as_str();
            if !seen.contains(&head) {
                seen.push(head);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{contract, Command, CommandInput, CommandMeta, Empty, ExecutionContext};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Noop(&'static str);

    #[async_trait]
    impl Command for Noop {
        type Args = Empty;
        type Flags = Empty;
        type Output = Empty;

        fn meta(&self) -> CommandMeta {
            CommandMeta::new(self.0)
        }

        async fn run(
            &self,
            _input: CommandInput<Empty, Empty>,
            _ctx: &ExecutionContext,
        ) -> anyhow::Result<Empty> {
            Ok(Empty {})
        }
    }

    fn route(id: &'static str) -> CommandRoute {
        CommandRoute::new(id, format!("{} summary", id), move || contract(Noop(id)))
    }

    fn tokens(input: &str) -> Vec<String> {
        input.split_whitespace().map(str::to_string).collect()
    }

    fn registry() -> CommandRegistry {
        CommandRegistry::new()
            .with_route(route("system"))
            .with_route(route("system plugin call"))
            .with_route(route("system plugin inspect"))
            .with_route(route("config"))
            .with_route(route("config get"))
    }

    #[test]
    fn test_longest_prefix_wins() {
        let registry = registry();
        let matched = registry
            .resolve(&tokens("system plugin call ./p ping"))
            .unwrap();

        assert_eq!(matched.route.name(), "system plugin call");
        assert_eq!(matched.consumed, 3);
        assert_eq!(matched.extra_args, tokens("./p ping"));
    }

    #[test]
    fn test_falls_back_to_shorter_route() {
        let registry = registry();
        let matched = registry.resolve(&tokens("system plugin")).unwrap();
        assert_eq!(matched.route.name(), "system");
        assert_eq!(matched.extra_args, tokens("plugin"));
    }

    #[test]
    fn test_no_match() {
        assert!(registry().resolve(&tokens("nope")).is_none());
        assert!(registry().resolve(&[]).is_none());
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut registry = registry();
        assert!(!registry.register(route("config get")));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_children_and_domains() {
        let registry = registry();
        let names: Vec<_> = registry
            .children(&["system", "plugin"])
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["system plugin call", "system plugin inspect"]);

        let names: Vec<_> = registry.children(&["config"]).iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["config get"]);

        assert_eq!(registry.domains(), vec!["system", "config"]);

        let nested: Vec<_> = registry
            .descendants(&["system"])
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(nested, vec!["system plugin call", "system plugin inspect"]);
        assert!(registry.children(&["system"]).is_empty());
    }

    #[test]
    fn test_loader_runs_only_on_load() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let registry = CommandRegistry::new().with_route(CommandRoute::new("x", "x", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            contract(Noop("x"))
        }));

        let matched = registry.resolve(&tokens("x y")).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        assert_eq!(matched.route.load().meta().name, "x");
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
