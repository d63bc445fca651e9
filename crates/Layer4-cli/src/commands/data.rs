//! data 명령 - 로컬 설정 기반 데이터 조회

use async_trait::async_trait;
use hominem_core::{Command, CommandInput, CommandMeta, Empty, ExecutionContext};
use hominem_foundation::{load_config_v2, Profile};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfilesOutput {
    pub profiles: Vec<Profile>,
}

pub struct DataProfiles;

#[async_trait]
impl Command for DataProfiles {
    type Args = Empty;
    type Flags = Empty;
    type Output = ProfilesOutput;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("data profiles")
            .summary("List configured data profiles")
            .description("Reads configured profiles from local config v2.")
    }

    async fn run(
        &self,
        _input: CommandInput<Empty, Empty>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<ProfilesOutput> {
        Ok(ProfilesOutput {
            profiles: load_config_v2(&ctx.env).profiles,
        })
    }
}
