//! Output Format - 출력 모드

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 출력 모드 (`--format`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 사람이 읽는 텍스트
    #[default]
    Text,
    /// pretty-printed JSON 객체 하나
    Json,
    /// compact JSON 한 줄
    Ndjson,
}

impl OutputFormat {
    pub const VARIANTS: [&'static str; 3] = ["text", "json", "ndjson"];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Ndjson => "ndjson",
        }
    }

    /// 구조화된(JSON 계열) 출력인지
    pub fn is_structured(self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "ndjson" => Ok(OutputFormat::Ndjson),
            other => Err(format!(
                "unsupported format '{}', expected one of {}",
                other,
                Self::VARIANTS.join("|")
            )),
        }
    }
}
