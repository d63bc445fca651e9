//! Domain root - 도메인 이름만 입력했을 때 하위 명령 목록

use crate::routes::command_registry;
use async_trait::async_trait;
use hominem_core::{Command, CommandInput, CommandMeta, Empty, ExecutionContext};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Subcommand {
    pub id: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct DomainListing {
    pub domain: String,
    pub subcommands: Vec<Subcommand>,
}

/// 도메인 루트 명령
pub struct DomainRoot {
    domain: &'static str,
    summary: &'static str,
    description: &'static str,
}

impl DomainRoot {
    pub fn new(domain: &'static str, summary: &'static str, description: &'static str) -> Self {
        Self {
            domain,
            summary,
            description,
        }
    }
}

#[async_trait]
impl Command for DomainRoot {
    type Args = Empty;
    type Flags = Empty;
    type Output = DomainListing;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new(self.domain)
            .summary(self.summary)
            .description(self.description)
    }

    async fn run(
        &self,
        _input: CommandInput<Empty, Empty>,
        _ctx: &ExecutionContext,
    ) -> anyhow::Result<DomainListing> {
        let registry = command_registry();
        let subcommands = registry
            .descendants(&[self.domain])
            .into_iter()
            .map(|route| Subcommand {
                id: route.name(),
                summary: route.summary.clone(),
            })
            .collect();

        Ok(DomainListing {
            domain: self.domain.to_string(),
            subcommands,
        })
    }
}
