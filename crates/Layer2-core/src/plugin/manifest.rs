//! Plugin Manifest - 플러그인 메타데이터와 entry 경로 검증
//!
//! entry는 반드시 플러그인 루트 내부여야 하며,
//! 이 검사는 프로세스를 띄우기 전에 끝납니다.

use hominem_foundation::CliFailure;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use tracing::debug;

/// 매니페스트 파일명
pub const MANIFEST_FILE: &str = "plugin.json";

/// 선언 권한 (파싱만 하고 강제하지 않음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginPermission {
    #[serde(rename = "network")]
    Network,
    #[serde(rename = "filesystem:read")]
    FilesystemRead,
    #[serde(rename = "filesystem:write")]
    FilesystemWrite,
}

/// 플러그인 매니페스트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// 플러그인 이름
    pub name: String,

    /// 버전 문자열
    pub version: String,

    /// 루트 기준 상대 entry 경로
    pub entry: String,

    /// 선언 권한 목록
    #[serde(default)]
    pub permissions: Vec<PluginPermission>,
}

impl PluginManifest {
    /// 필수 필드 검사
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.version.trim().is_empty() {
            return Err("version must not be empty".to_string());
        }
        if self.entry.trim().is_empty() {
            return Err("entry must not be empty".to_string());
        }
        Ok(())
    }

    pub fn has_permission(&self, permission: PluginPermission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// 검증이 끝난 플러그인
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    /// 정규화된 플러그인 루트
    pub root: PathBuf,
    pub manifest: PluginManifest,
    /// 정규화된 entry (루트 내부 보장)
    pub entry: PathBuf,
}

/// 매니페스트 읽기 + 검증
pub fn load_manifest(plugin_root: &Path) -> Result<PluginManifest, CliFailure> {
    let path = plugin_root.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        CliFailure::dependency(
            "PLUGIN_MANIFEST_MISSING",
            format!("Cannot read plugin manifest {}: {}", path.display(), e),
        )
        .with_details(json!({ "path": path.display().to_string() }))
    })?;

    let manifest: PluginManifest = serde_json::from_str(&content).map_err(|e| {
        CliFailure::dependency(
            "PLUGIN_MANIFEST_INVALID",
            format!("Invalid plugin manifest {}: {}", path.display(), e),
        )
    })?;

    manifest.validate().map_err(|reason| {
        CliFailure::dependency(
            "PLUGIN_MANIFEST_INVALID",
            format!("Invalid plugin manifest {}: {}", path.display(), reason),
        )
    })?;

    Ok(manifest)
}

/// entry 경로를 루트 내부로 해석
///
/// 1. 절대 경로 거부
/// 2. 어휘적 정규화 후 포함 검사 (존재하지 않는 경로도 탈출로 보고)
/// 3. canonicalize 후 다시 포함 검사 (심볼릭 링크 탈출)
pub fn resolve_entry(root: &Path, manifest: &PluginManifest) -> Result<PathBuf, CliFailure> {
    let entry = Path::new(&manifest.entry);
    if entry.is_absolute() || entry.has_root() {
        return Err(path_escape(manifest, "entry must be a relative path"));
    }

    let lexical = normalize_lexically(&root.join(entry));
    if !is_strictly_inside(&lexical, root) {
        return Err(path_escape(manifest, "entry resolves outside the plugin root"));
    }

    let canonical = lexical.canonicalize().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            CliFailure::dependency(
                "PLUGIN_ENTRY_MISSING",
                format!("Plugin entry not found: {}", lexical.display()),
            )
        } else {
            CliFailure::dependency(
                "PLUGIN_ENTRY_MISSING",
                format!("Cannot resolve plugin entry {}: {}", lexical.display(), e),
            )
        }
    })?;

    if !is_strictly_inside(&canonical, root) {
        return Err(path_escape(manifest, "entry resolves outside the plugin root"));
    }

    Ok(canonical)
}

/// 매니페스트 로드 + entry 해석
pub fn load_plugin(plugin_root: &Path) -> Result<LoadedPlugin, CliFailure> {
    let manifest = load_manifest(plugin_root)?;
    let root = plugin_root.canonicalize().map_err(|e| {
        CliFailure::dependency(
            "PLUGIN_MANIFEST_MISSING",
            format!("Cannot resolve plugin root {}: {}", plugin_root.display(), e),
        )
    })?;
    let entry = resolve_entry(&root, &manifest)?;

    debug!(
        "Loaded plugin '{}' {} (entry {})",
        manifest.name,
        manifest.version,
        entry.display()
    );

    Ok(LoadedPlugin {
        root,
        manifest,
        entry,
    })
}

fn path_escape(manifest: &PluginManifest, reason: &str) -> CliFailure {
    CliFailure::dependency(
        "PLUGIN_PATH_ESCAPE",
        format!("Plugin '{}' {}: {}", manifest.name, reason, manifest.entry),
    )
    .with_details(json!({ "entry": manifest.entry }))
}

/// `.`/`..` 제거 (파일시스템 접근 없음)
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `root + 구분자`로 시작하는지 (루트 자체는 제외)
fn is_strictly_inside(candidate: &Path, root: &Path) -> bool {
    let root = root.to_string_lossy();
    let prefix = if root.ends_with(MAIN_SEPARATOR) {
        root.into_owned()
    } else {
        format!("{}{}", root, MAIN_SEPARATOR)
    };
    let candidate = candidate.to_string_lossy();
    candidate.len() > prefix.len() && candidate.starts_with(&prefix)
}
