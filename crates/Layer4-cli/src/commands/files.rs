//! files 명령 - 텍스트 파일 미리보기

use async_trait::async_trait;
use hominem_core::{coerce, CliFailure, Command, CommandInput, CommandMeta, ExecutionContext};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::ErrorKind;

/// 기본 줄 수
pub const DEFAULT_HEAD_LINES: usize = 10;

fn default_lines() -> usize {
    DEFAULT_HEAD_LINES
}

#[derive(Debug, Deserialize)]
pub struct HeadArgs {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct HeadFlags {
    #[serde(default = "default_lines", deserialize_with = "coerce::number")]
    pub lines: usize,
}

#[derive(Debug, Serialize)]
pub struct HeadOutput {
    pub path: String,
    pub lines: Vec<String>,
}

pub struct FilesHead;

#[async_trait]
impl Command for FilesHead {
    type Args = HeadArgs;
    type Flags = HeadFlags;
    type Output = HeadOutput;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("files head")
            .summary("Preview top lines from a file")
            .description("Reads first N lines from a text file.")
            .args(&["path"])
            .flags(&["lines"])
    }

    async fn run(
        &self,
        input: CommandInput<HeadArgs, HeadFlags>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<HeadOutput> {
        let path = ctx.resolve_path(&input.args.path);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            let code = if e.kind() == ErrorKind::NotFound {
                "FILE_NOT_FOUND"
            } else {
                "FILE_READ_FAILED"
            };
            CliFailure::dependency(code, format!("Cannot read {}: {}", path.display(), e))
                .with_details(json!({ "path": path.display().to_string() }))
        })?;

        let lines = content
            .lines()
            .take(input.flags.lines)
            .map(str::to_string)
            .collect();

        Ok(HeadOutput {
            path: path.display().to_string(),
            lines,
        })
    }
}
