//! Renderer - envelope를 출력 모드별 문자열로 변환
//!
//! - text: 사람용 (메시지 + pretty data / `CODE: message`)
//! - json: pretty JSON envelope
//! - ndjson: 한 줄 JSON envelope
//!
//! 성공은 stdout, 실패는 stderr로 갑니다 (모드와 무관).

use super::envelope::Envelope;
use crate::command::Stdio;
use hominem_foundation::OutputFormat;
use serde::Serialize;
use std::io;

/// 출력 렌더러
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    format: OutputFormat,
    quiet: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quiet: false,
        }
    }

    /// 빌더 패턴: text 모드에서 메시지 줄 생략
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// 개행으로 끝나는 문자열로 렌더링
    pub fn render(&self, envelope: &Envelope) -> String {
        match self.format {
            OutputFormat::Json => format!("{}\n", to_pretty(envelope)),
            OutputFormat::Ndjson => format!("{}\n", to_line(envelope)),
            OutputFormat::Text => self.render_text(envelope),
        }
    }

    /// 렌더링 후 해당 스트림에 기록
    pub fn emit(&self, envelope: &Envelope, stdio: &Stdio) -> io::Result<()> {
        let rendered = self.render(envelope);
        if envelope.is_ok() {
            stdio.write_out(&rendered)
        } else {
            stdio.write_err(&rendered)
        }
    }

    fn render_text(&self, envelope: &Envelope) -> String {
        let mut out = String::new();
        match envelope {
            Envelope::Success(success) => {
                if let Some(message) = success.message.as_deref().filter(|_| !self.quiet) {
                    out.push_str(message);
                    out.push('\n');
                }
                out.push_str(&to_pretty(&success.data));
                out.push('\n');
            }
            Envelope::Failure(failure) => {
                out.push_str(&format!("{}: {}\n", failure.code, failure.message));
                if let Some(hint) = &failure.hint {
                    out.push_str(&format!("hint: {}\n", hint));
                }
                if let Some(details) = &failure.details {
                    out.push_str(&to_pretty(details));
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn to_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn to_line<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
