//! system 명령 - doctor / plugin inspect / plugin call

use async_trait::async_trait;
use hominem_core::plugin::{load_plugin, PluginInvoker, ENV_PLUGIN_RUNTIME};
use hominem_core::{
    coerce, CliFailure, Command, CommandInput, CommandMeta, Empty, ExecutionContext, JsonValue,
    PluginPermission,
};
use hominem_foundation::ConfigStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

// ============================================================================
// system doctor
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Serialize)]
pub struct DoctorCheck {
    pub id: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl DoctorCheck {
    fn new(id: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            id,
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub healthy: bool,
    pub checks: Vec<DoctorCheck>,
}

pub struct SystemDoctor;

impl SystemDoctor {
    fn check_runtime(ctx: &ExecutionContext) -> DoctorCheck {
        match ctx.env_var(ENV_PLUGIN_RUNTIME).filter(|v| !v.trim().is_empty()) {
            Some(binary) => match which::which(binary) {
                Ok(path) => DoctorCheck::new(
                    "runtime.binary",
                    CheckStatus::Pass,
                    format!("plugin runtime {}", path.display()),
                ),
                Err(e) => DoctorCheck::new(
                    "runtime.binary",
                    CheckStatus::Fail,
                    format!("{} '{}' not found: {}", ENV_PLUGIN_RUNTIME, binary, e),
                ),
            },
            None => match std::env::current_exe() {
                Ok(path) => DoctorCheck::new(
                    "runtime.binary",
                    CheckStatus::Pass,
                    format!("plugin runtime {}", path.display()),
                ),
                Err(e) => DoctorCheck::new(
                    "runtime.binary",
                    CheckStatus::Fail,
                    format!("cannot determine current executable: {}", e),
                ),
            },
        }
    }

    fn check_state_dir(store: &Result<ConfigStore, CliFailure>) -> DoctorCheck {
        match store {
            Ok(store) => {
                let dir = store
                    .path()
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                DoctorCheck::new("state.dir", CheckStatus::Pass, dir)
            }
            Err(failure) => DoctorCheck::new("state.dir", CheckStatus::Fail, &failure.message),
        }
    }

    fn check_config(store: &Result<ConfigStore, CliFailure>) -> DoctorCheck {
        let Ok(store) = store else {
            return DoctorCheck::new("config.v2", CheckStatus::Fail, "state directory unavailable");
        };
        match store.try_load() {
            Ok(Some(_)) => DoctorCheck::new("config.v2", CheckStatus::Pass, "config version 2"),
            Ok(None) => DoctorCheck::new(
                "config.v2",
                CheckStatus::Warn,
                "config not initialized, run `hominem config init`",
            ),
            Err(e) => DoctorCheck::new("config.v2", CheckStatus::Fail, e.to_string()),
        }
    }
}

#[async_trait]
impl Command for SystemDoctor {
    type Args = Empty;
    type Flags = Empty;
    type Output = DoctorReport;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("system doctor")
            .summary("Run diagnostics")
            .description("Checks environment and config preconditions.")
    }

    async fn run(
        &self,
        _input: CommandInput<Empty, Empty>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<DoctorReport> {
        let store = ctx.config_store();
        let checks = vec![
            Self::check_runtime(ctx),
            Self::check_state_dir(&store),
            Self::check_config(&store),
        ];
        let healthy = checks.iter().all(|c| c.status != CheckStatus::Fail);
        Ok(DoctorReport { healthy, checks })
    }
}

// ============================================================================
// system plugin inspect
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectArgs {
    pub plugin_path: String,
}

#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub name: String,
    pub version: String,
    pub root: String,
    pub entry: String,
    pub permissions: Vec<PluginPermission>,
}

pub struct PluginInspect;

#[async_trait]
impl Command for PluginInspect {
    type Args = InspectArgs;
    type Flags = Empty;
    type Output = InspectOutput;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("system plugin inspect")
            .summary("Validate a plugin manifest")
            .description("Loads plugin.json and resolves the entry inside the plugin root.")
            .args(&["pluginPath"])
    }

    async fn run(
        &self,
        input: CommandInput<InspectArgs, Empty>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<InspectOutput> {
        let plugin = load_plugin(&ctx.resolve_path(&input.args.plugin_path))?;
        Ok(InspectOutput {
            name: plugin.manifest.name,
            version: plugin.manifest.version,
            root: plugin.root.display().to_string(),
            entry: plugin.entry.display().to_string(),
            permissions: plugin.manifest.permissions,
        })
    }
}

// ============================================================================
// system plugin call
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallArgs {
    pub plugin_path: String,
    pub method: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFlags {
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_number")]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub runtime: Option<String>,
}

pub struct PluginCall;

impl PluginCall {
    fn parse_params(raw: Option<&str>) -> Result<Option<JsonValue>, CliFailure> {
        raw.map(|text| {
            serde_json::from_str(text).map_err(|e| {
                CliFailure::validation("VALIDATION_ERROR", format!("--params must be JSON: {}", e))
            })
        })
        .transpose()
    }
}

#[async_trait]
impl Command for PluginCall {
    type Args = CallArgs;
    type Flags = CallFlags;
    type Output = JsonValue;

    fn meta(&self) -> CommandMeta {
        CommandMeta::new("system plugin call")
            .summary("Invoke a plugin method")
            .description("Spawns the plugin once, sends one request line and returns its result.")
            .args(&["pluginPath", "method"])
            .flags(&["params", "timeout-ms", "runtime"])
    }

    async fn run(
        &self,
        input: CommandInput<CallArgs, CallFlags>,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<JsonValue> {
        let params = Self::parse_params(input.flags.params.as_deref())?;

        let mut invoker = PluginInvoker::from_env(ctx.env.clone());
        if let Some(ms) = input.flags.timeout_ms {
            invoker = invoker.with_timeout(Duration::from_millis(ms));
        }
        if let Some(runtime) = input.flags.runtime.filter(|r| !r.trim().is_empty()) {
            invoker = invoker.with_runtime_binary(PathBuf::from(runtime));
        }

        let root = ctx.resolve_path(&input.args.plugin_path);
        debug!("Calling {} on plugin {}", input.args.method, root.display());

        ctx.ensure_active()?;
        let result = tokio::select! {
            result = invoker.invoke(&root, &input.args.method, params) => result?,
            _ = ctx.cancellation().cancelled() => {
                return Err(CliFailure::dependency("ABORTED", "Plugin call was interrupted").into());
            }
        };
        Ok(result)
    }
}
