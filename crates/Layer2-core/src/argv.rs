//! Argv Parser - 프로세스 인자 분해
//!
//! 원시 인자를 다음으로 나눕니다:
//! - 전역 플래그 (`--format`, `--quiet`, `--verbose`, `--interactive`, `--help`/`-h`)
//! - 명령 경로 토큰 (첫 번째 플래그 전까지의 bare 토큰들)
//! - 위치 인자
//! - 명령별 플래그 (kebab-case 키 그대로)
//!
//! 경로 토큰 중 라우트에 매칭되지 않은 꼬리는 registry가 위치 인자로 넘깁니다.

use hominem_foundation::{CliFailure, JsonMap, JsonValue, OutputFormat};

/// 전역 플래그 - 런타임이 직접 소비하며 명령에는 전달되지 않음
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub interactive: bool,
    pub help: bool,
}

/// 파싱 결과 (한 번 생성되고 소비됨)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub command_tokens: Vec<String>,
    pub positional_args: Vec<String>,
    /// 명령 플래그 (kebab-case 키, 문자열 또는 `true`)
    pub flags: JsonMap<String, JsonValue>,
    pub globals: GlobalFlags,
}

/// 플래그 파싱 종료 마커
const TERMINATOR: &str = "--";

/// `-5`, `-0.5`, `-.5` 같은 음수 값
fn is_negative_number(token: &str) -> bool {
    token
        .strip_prefix('-')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
        && token.parse::<f64>().is_ok()
}

fn is_flag_token(token: &str) -> bool {
    token.len() > 1
        && token.starts_with('-')
        && token != TERMINATOR
        && !is_negative_number(token)
}

/// 앞 플래그의 값으로 소비할 수 있는 토큰
fn is_value_token(token: &str) -> bool {
    !token.starts_with('-') || is_negative_number(token)
}

/// `--name=value` / `--name` / `-n` 분해
fn split_flag(token: &str) -> (&str, Option<&str>) {
    let body = token.trim_start_matches('-');
    match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

/// 원시 인자 파싱
///
/// `--format` 값이 없거나 알 수 없는 경우에만 실패합니다 (`usage`).
pub fn parse_argv<I, S>(argv: I) -> Result<ParseResult, CliFailure>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = argv.into_iter().map(Into::into).collect();
    let (globals, rest) = extract_globals(tokens)?;

    let mut result = ParseResult {
        globals,
        ..Default::default()
    };

    let mut in_command_path = true;
    let mut after_terminator = false;
    let mut iter = rest.into_iter().peekable();

    while let Some(token) = iter.next() {
        if after_terminator {
            result.positional_args.push(token);
            continue;
        }

        if token == TERMINATOR {
            after_terminator = true;
            in_command_path = false;
            continue;
        }

        if is_flag_token(&token) {
            in_command_path = false;
            let (name, inline) = split_flag(&token);
            let value = match inline {
                Some(v) => JsonValue::String(v.to_string()),
                None => match iter.peek() {
                    Some(next) if is_value_token(next) => {
                        JsonValue::String(iter.next().unwrap_or_default())
                    }
                    _ => JsonValue::Bool(true),
                },
            };
            result.flags.insert(name.to_string(), value);
            continue;
        }

        if in_command_path {
            result.command_tokens.push(token);
        } else {
            result.positional_args.push(token);
        }
    }

    Ok(result)
}

/// 위치와 상관없이 전역 플래그를 제거
fn extract_globals(tokens: Vec<String>) -> Result<(GlobalFlags, Vec<String>), CliFailure> {
    let mut globals = GlobalFlags::default();
    let mut rest = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        if token == TERMINATOR {
            rest.push(token);
            rest.extend(iter);
            break;
        }

        match token.as_str() {
            "--quiet" => globals.quiet = true,
            "--verbose" => globals.verbose = true,
            "--interactive" => globals.interactive = true,
            "--help" | "-h" => globals.help = true,
            "--format" => {
                let value = match iter.peek() {
                    Some(next) if !next.starts_with('-') => iter.next(),
                    _ => None,
                };
                globals.format = parse_format(value.as_deref())?;
            }
            _ if token.starts_with("--format=") => {
                globals.format = parse_format(Some(&token["--format=".len()..]))?;
            }
            _ => rest.push(token),
        }
    }

    Ok((globals, rest))
}

fn parse_format(value: Option<&str>) -> Result<OutputFormat, CliFailure> {
    let Some(raw) = value else {
        return Err(CliFailure::usage("INVALID_FORMAT", "--format requires a value")
            .with_hint("Use --format text, --format json or --format ndjson"));
    };
    raw.parse::<OutputFormat>()
        .map_err(|message| CliFailure::usage("INVALID_FORMAT", message))
}

/// kebab-case → camelCase (`dry-run` → `dryRun`)
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                chars.next();
                out.push(next.to_ascii_uppercase());
                continue;
            }
        }
        out.push(ch);
    }
    out
}
