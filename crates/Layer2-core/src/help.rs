//! Help - 도움말 텍스트
//!
//! 출력 모드와 상관없이 항상 plain text로 stdout에 씁니다.

use crate::command::CommandMeta;
use crate::registry::CommandRegistry;
use std::fmt::Write;

const GLOBAL_FLAGS: &[(&str, &str)] = &[
    ("--format <text|json|ndjson>", "Output mode (default: text)"),
    ("--quiet", "Suppress the human-readable message line"),
    ("--verbose", "Enable debug logging on stderr"),
    ("--interactive", "Allow interactive prompts"),
    ("--help, -h", "Show help for a command"),
];

fn column_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(str::len).max().unwrap_or(0) + 2
}

/// 전역 도움말 (모든 라우트 목록)
pub fn render_global_help(binary: &str, registry: &CommandRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - automation-first command line", binary);
    let _ = writeln!(out);
    let _ = writeln!(out, "USAGE");
    let _ = writeln!(out, "  {} <command> [args...] [--flags]", binary);
    let _ = writeln!(out);
    let _ = writeln!(out, "COMMANDS");

    let names: Vec<String> = registry.routes().iter().map(|r| r.name()).collect();
    let width = column_width(names.iter().map(String::as_str));
    for (name, route) in names.iter().zip(registry.routes()) {
        let _ = writeln!(out, "  {:<width$}{}", name, route.summary, width = width);
    }

    let _ = writeln!(out);
    push_global_flags(&mut out);
    out
}

/// 명령 도움말
pub fn render_command_help(binary: &str, meta: &CommandMeta) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", meta.name, meta.summary);
    if !meta.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", meta.description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "USAGE");
    let mut usage = format!("  {} {}", binary, meta.name);
    for arg in &meta.arg_names {
        let _ = write!(usage, " <{}>", arg);
    }
    if !meta.flag_names.is_empty() {
        usage.push_str(" [--flags]");
    }
    let _ = writeln!(out, "{}", usage);

    if !meta.flag_names.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "FLAGS");
        for flag in &meta.flag_names {
            let _ = writeln!(out, "  --{}", flag);
        }
    }

    let _ = writeln!(out);
    push_global_flags(&mut out);
    out
}

fn push_global_flags(out: &mut String) {
    let _ = writeln!(out, "GLOBAL FLAGS");
    let width = column_width(GLOBAL_FLAGS.iter().map(|(label, _)| *label));
    for (label, text) in GLOBAL_FLAGS {
        let _ = writeln!(out, "  {:<width$}{}", label, text, width = width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_help_layout() {
        let meta = CommandMeta::new("config set")
            .summary("Set a config value")
            .description("Writes a dot-path value into the config document.")
            .args(&["path", "value"])
            .flags(&["dry-run"]);

        let help = render_command_help("hominem", &meta);
        let mut lines = help.lines();
        assert_eq!(lines.next(), Some("config set - Set a config value"));
        assert!(help.contains("  hominem config set <path> <value> [--flags]"));
        assert!(help.contains("FLAGS\n  --dry-run\n"));
        assert!(help.contains("--format <text|json|ndjson>"));
    }

    #[test]
    fn test_command_help_without_flags() {
        let help = render_command_help("hominem", &CommandMeta::new("system doctor"));
        assert!(help.contains("  hominem system doctor\n"));
        assert!(!help.contains("\nFLAGS"));
    }

    #[test]
    fn test_global_help_lists_routes() {
        use crate::command::{contract, Empty};
        use crate::registry::CommandRoute;

        struct Unused;

        #[async_trait::async_trait]
        impl crate::command::Command for Unused {
            type Args = Empty;
            type Flags = Empty;
            type Output = Empty;

            fn meta(&self) -> CommandMeta {
                CommandMeta::new("unused")
            }

            async fn run(
                &self,
                _input: crate::command::CommandInput<Empty, Empty>,
                _ctx: &crate::command::ExecutionContext,
            ) -> anyhow::Result<Empty> {
                Ok(Empty {})
            }
        }

        let registry = CommandRegistry::new()
            .with_route(CommandRoute::new("config", "Config commands", || contract(Unused)))
            .with_route(CommandRoute::new("config get", "Read a value", || contract(Unused)));

        let help = render_global_help("hominem", &registry);
        assert!(help.starts_with("hominem - "));
        assert!(help.contains("  config      Config commands\n"));
        assert!(help.contains("  config get  Read a value\n"));
    }
}
