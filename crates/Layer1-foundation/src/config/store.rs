//! Config Store - 설정 문서 로드/저장
//!
//! 캐시 없음: 호출마다 파일에서 다시 읽습니다.

use super::document::ConfigDocument;
use crate::storage::JsonStore;
use crate::value::JsonValue;
use crate::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// 설정 파일명
pub const CONFIG_FILE: &str = "config.json";

/// 버전 2 설정 저장소
#[derive(Debug, Clone)]
pub struct ConfigStore {
    store: JsonStore,
}

impl ConfigStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// 캡처된 환경 변수로 사용자 저장소 생성
    pub fn from_env(env: &HashMap<String, String>) -> Result<Self> {
        Ok(Self::new(JsonStore::home(env)?))
    }

    /// 설정 파일 경로
    pub fn path(&self) -> PathBuf {
        self.store.file_path(CONFIG_FILE)
    }

    pub fn exists(&self) -> bool {
        self.store.exists(CONFIG_FILE)
    }

    /// 설정 로드 (실패하지 않음)
    ///
    /// 읽기/파싱/검증 중 어떤 실패든 기본 문서로 대체합니다.
    pub fn load_v2(&self) -> ConfigDocument {
        match self.try_load() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                debug!("No config at {}, using defaults", self.path().display());
                ConfigDocument::default()
            }
            Err(e) => {
                debug!("Ignoring unreadable config: {}", e);
                ConfigDocument::default()
            }
        }
    }

    /// 설정 로드 (엄격) - 파일 없음은 `None`, 그 외 실패는 에러
    pub fn try_load(&self) -> Result<Option<ConfigDocument>> {
        match self.store.load_optional::<JsonValue>(CONFIG_FILE)? {
            Some(value) => ConfigDocument::from_value(value).map(Some),
            None => Ok(None),
        }
    }

    /// 검증 후 저장 (디렉토리 자동 생성)
    pub fn save_v2(&self, doc: &ConfigDocument) -> Result<PathBuf> {
        let validated = ConfigDocument::from_value(doc.to_value())?;
        self.store.save(CONFIG_FILE, &validated)
    }

    /// 구조화된 값을 검증 후 저장
    pub fn save_value(&self, value: JsonValue) -> Result<(ConfigDocument, PathBuf)> {
        let doc = ConfigDocument::from_value(value)?;
        let path = self.store.save(CONFIG_FILE, &doc)?;
        Ok((doc, path))
    }
}

// ============================================================================
// 편의 함수
// ============================================================================

/// 사용자 설정 로드 (실패하지 않음)
pub fn load_config_v2(env: &HashMap<String, String>) -> ConfigDocument {
    match ConfigStore::from_env(env) {
        Ok(store) => store.load_v2(),
        Err(e) => {
            debug!("Config location unavailable: {}", e);
            ConfigDocument::default()
        }
    }
}

/// 사용자 설정 저장
pub fn save_config_v2(env: &HashMap<String, String>, doc: &ConfigDocument) -> Result<PathBuf> {
    ConfigStore::from_env(env)?.save_v2(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::ENV_HOME_OVERRIDE;
    use crate::Error;
    use serde_json::json;

    fn store_in(dir: &std::path::Path) -> ConfigStore {
        ConfigStore::new(JsonStore::new(dir))
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        assert_eq!(store.load_v2(), ConfigDocument::default());
    }

    #[test]
    fn test_load_corrupt_file_defaults() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "{{{").unwrap();
        assert_eq!(store_in(temp.path()).load_v2(), ConfigDocument::default());
    }

    #[test]
    fn test_corrupt_fallback_is_silent_at_warn_level() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "{{{").unwrap();
        let store = store_in(temp.path());

        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(logs.clone())
            .finish();
        let doc = tracing::subscriber::with_default(subscriber, || store.load_v2());

        assert_eq!(doc, ConfigDocument::default());
        assert!(logs.contents().is_empty(), "unexpected log: {}", logs.contents());
    }

    #[test]
    fn test_load_wrong_version_defaults() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), r#"{"version":1}"#).unwrap();
        let store = store_in(temp.path());
        assert_eq!(store.load_v2(), ConfigDocument::default());
        assert!(store.try_load().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp.path().join("home"));

        let mut doc = ConfigDocument::default();
        doc.telemetry.enabled = true;
        let path = store.save_v2(&doc).unwrap();

        assert!(path.starts_with(temp.path()));
        assert_eq!(store.load_v2(), doc);
    }

    #[test]
    fn test_save_value_rejects_invalid_document() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        let result = store.save_value(json!({"version": 2, "output": {"format": 3}}));
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(!store.exists());
    }

    #[test]
    fn test_env_functions_use_override() {
        let temp = tempfile::tempdir().unwrap();
        let env = HashMap::from([(
            ENV_HOME_OVERRIDE.to_string(),
            temp.path().display().to_string(),
        )]);

        let mut doc = ConfigDocument::default();
        doc.auth.provider = "supabase".to_string();
        save_config_v2(&env, &doc).unwrap();

        assert_eq!(load_config_v2(&env).auth.provider, "supabase");
    }
}
