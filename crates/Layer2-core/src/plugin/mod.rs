//! Plugin System - 격리된 서브프로세스 플러그인
//!
//! ## 구조
//!
//! ```text
//! <plugin root>/
//!   plugin.json   {name, version, entry, permissions}
//!   <entry>       런타임 바이너리에 인자로 전달
//! ```
//!
//! 호출은 항상 1회성입니다: spawn → 요청 1줄 → 응답 1줄 → 종료.
//! 권한은 파싱만 하며 강제하지 않습니다.

mod invoker;
mod manifest;
mod protocol;

pub use invoker::{PluginInvoker, DEFAULT_TIMEOUT, ENV_PLUGIN_NAME, ENV_PLUGIN_RUNTIME};
pub use manifest::{
    load_manifest, load_plugin, resolve_entry, LoadedPlugin, PluginManifest, PluginPermission,
    MANIFEST_FILE,
};
pub use protocol::{parse_response, RpcErrorBody, RpcRequest, RpcResponse};
