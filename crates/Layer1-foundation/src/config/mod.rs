//! Config - 버전 2 사용자 설정
//!
//! - `document.rs` - ConfigDocument 스키마 (version = 2)
//! - `path.rs` - 점(.) 경로 get/set
//! - `store.rs` - 파일 로드/저장

mod document;
mod path;
mod store;

pub use document::{
    AiSettings, AuthSettings, ConfigDocument, OutputSettings, Profile, TelemetrySettings,
    CONFIG_VERSION, DEFAULT_API_URL,
};
pub use path::{get_path_value, set_path_value};
pub use store::{load_config_v2, save_config_v2, ConfigStore, CONFIG_FILE};
