//! # hominem-foundation
//!
//! Foundation layer for hominem:
//! - Error: 내부 에러 + 분류된 실패(CliFailure)와 exit code 테이블
//! - Value: 구조화된 값 (JSON 모양)
//! - Format: 출력 모드 (text / json / ndjson)
//! - Config: 버전 2 사용자 설정 문서 + 경로 get/set
//! - Storage: JsonStore (범용 JSON 파일)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Layer4-cli (hominem 바이너리, leaf 명령)                │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer2-core (argv → route → contract → envelope)       │
//! │                     │                                   │
//! │          ┌─────────┴─────────┐                         │
//! │          ▼                   ▼                         │
//! │    Dispatcher           Plugin Invoker                 │
//! │                         (stdio, one-shot)              │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer1-foundation (이 레이어)                          │
//! │  ├── CliFailure / ErrorCategory                        │
//! │  ├── ConfigDocument (version 2)                        │
//! │  └── JsonStore                                         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod paths;
pub mod storage;
pub mod value;

// ============================================================================
// Error
// ============================================================================
pub use error::{CliFailure, Error, ErrorCategory, Result, EXIT_SUCCESS};

// ============================================================================
// Value / Format
// ============================================================================
pub use format::OutputFormat;
pub use value::{JsonMap, JsonValue};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    get_path_value, load_config_v2, save_config_v2, set_path_value, ConfigDocument, ConfigStore,
    Profile, CONFIG_FILE, CONFIG_VERSION,
};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
