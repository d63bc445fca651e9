//! Route table - hominem 바이너리의 정적 라우트 목록
//!
//! 계약은 매칭된 라우트에 대해서만 생성됩니다.

use crate::commands::{
    ConfigGet, ConfigInit, ConfigSet, DataProfiles, DomainRoot, FilesHead, PluginCall,
    PluginInspect, SystemDoctor,
};
use hominem_core::{contract, CommandRegistry, CommandRoute};

fn domain(id: &'static str, summary: &'static str, description: &'static str) -> CommandRoute {
    CommandRoute::new(id, summary, move || {
        contract(DomainRoot::new(id, summary, description))
    })
    .with_description(description)
}

/// 전체 라우트 테이블
pub fn command_registry() -> CommandRegistry {
    CommandRegistry::new()
        // config
        .with_route(domain(
            "config",
            "Configuration domain",
            "Config commands: init, get, set.",
        ))
        .with_route(
            CommandRoute::new("config init", "Initialize config v2", || contract(ConfigInit))
                .with_description("Creates canonical config v2 at ~/.hominem/config.json."),
        )
        .with_route(
            CommandRoute::new("config get", "Read config values", || contract(ConfigGet))
                .with_description("Reads full config or a dot-path selector."),
        )
        .with_route(
            CommandRoute::new("config set", "Write config values", || contract(ConfigSet))
                .with_description("Writes a value to a dot-path selector in config v2."),
        )
        // system
        .with_route(domain(
            "system",
            "System domain",
            "System commands: doctor, plugin inspect, plugin call.",
        ))
        .with_route(
            CommandRoute::new("system doctor", "Run diagnostics", || contract(SystemDoctor))
                .with_description("Checks environment and config preconditions."),
        )
        .with_route(
            CommandRoute::new("system plugin inspect", "Validate a plugin manifest", || {
                contract(PluginInspect)
            })
            .with_description("Loads plugin.json and resolves the entry inside the plugin root."),
        )
        .with_route(
            CommandRoute::new("system plugin call", "Invoke a plugin method", || {
                contract(PluginCall)
            })
            .with_description(
                "Spawns the plugin once, sends one request line and returns its result.",
            ),
        )
        // data
        .with_route(domain(
            "data",
            "Data command domain",
            "Data import/analysis command namespace.",
        ))
        .with_route(
            CommandRoute::new("data profiles", "List configured data profiles", || {
                contract(DataProfiles)
            })
            .with_description("Reads configured profiles from local config v2."),
        )
        // files
        .with_route(domain(
            "files",
            "Files command domain",
            "File tooling command namespace.",
        ))
        .with_route(
            CommandRoute::new("files head", "Preview top lines from a file", || {
                contract(FilesHead)
            })
            .with_description("Reads first N lines from a text file."),
        )
}
