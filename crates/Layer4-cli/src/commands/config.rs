//! config 명령 - init / get / set
//!
//! 설정은 호출마다 파일에서 새로 읽습니다 (캐시 없음).

use async_trait::async_trait;
use hominem_core::{coerce, CliFailure, Command, CommandInput, CommandMeta, Empty, ExecutionContext};
use hominem_foundation::value::decode_loose;
use hominem_foundation::{
    get_path_value, load_config_v2, set_path_value, ConfigDocument, Error, JsonValue,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

fn write_failure(err: Error) -> CliFailure {
    match err {
        Error::Validation(message) => CliFailure::validation("VALIDATION_ERROR", message),
        other => CliFailure::dependency(
            "CONFIG_WRITE_FAILED",
            format!("Failed to write config: {}", other),
        ),
    }
}

// ============================================================================
// config init
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitFlags {
    #[serde(default, deserialize_with = "coerce::boolean")]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub path: String,
    pub created: bool,
}

pub struct ConfigInit;

#[async_trait]
impl Command for ConfigInit {
    type Args = Empty;
    type Flags = InitFlags;
    type Output = InitOutput;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("config init")
            .summary("Initialize config v2")
            .description("Creates canonical config v2 at ~/.hominem/config.json.")
            .flags(&["force"])
    }

    async fn run(
        &self,
        input: CommandInput<Empty, InitFlags>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<InitOutput> {
        let store = ctx.config_store()?;

        if store.exists() && !input.flags.force {
            debug!("Config already present at {}", store.path().display());
            return Ok(InitOutput {
                path: store.path().display().to_string(),
                created: false,
            });
        }

        let path = store
            .save_v2(&ConfigDocument::default())
            .map_err(write_failure)?;
        Ok(InitOutput {
            path: path.display().to_string(),
            created: true,
        })
    }
}

// ============================================================================
// config get
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetArgs {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetOutput {
    pub value: JsonValue,
}

pub struct ConfigGet;

#[async_trait]
impl Command for ConfigGet {
    type Args = GetArgs;
    type Flags = Empty;
    type Output = GetOutput;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("config get")
            .summary("Read config values")
            .description("Reads full config or a dot-path selector.")
            .args(&["path"])
    }

    async fn run(
        &self,
        input: CommandInput<GetArgs, Empty>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<GetOutput> {
        let document = load_config_v2(&ctx.env).to_value();
        let path = input.args.path.unwrap_or_default();
        let value = get_path_value(&document, &path)
            .cloned()
            .unwrap_or(JsonValue::Null);
        Ok(GetOutput { value })
    }
}

// ============================================================================
// config set
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SetArgs {
    pub path: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOutput {
    pub updated_path: String,
    pub value: JsonValue,
}

pub struct ConfigSet;

#[async_trait]
impl Command for ConfigSet {
    type Args = SetArgs;
    type Flags = Empty;
    type Output = SetOutput;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("config set")
            .summary("Write config values")
            .description("Writes a value to a dot-path selector in config v2.")
            .args(&["path", "value"])
    }

    async fn run(
        &self,
        input: CommandInput<SetArgs, Empty>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<SetOutput> {
        let path = input.args.path.trim().to_string();
        if path.is_empty() {
            return Err(CliFailure::validation(
                "VALIDATION_ERROR",
                "Config path must not be empty",
            )
            .into());
        }

        let store = ctx.config_store()?;
        let value = decode_loose(&input.args.value);
        let current = store.load_v2().to_value();
        let updated = set_path_value(&current, &path, value.clone());

        let (_, saved_to) = store.save_value(updated).map_err(|e| {
            write_failure(e).with_details(json!({ "path": path }))
        })?;
        debug!("Updated '{}' in {}", path, saved_to.display());

        Ok(SetOutput {
            updated_path: path,
            value,
        })
    }
}
