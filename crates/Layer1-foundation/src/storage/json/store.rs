//! JSON 파일 저장소

use crate::paths;
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// JSON 설정 저장소
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 사용자 상태 디렉토리 ($HOMINEM_HOME 또는 ~/.hominem/)
    pub fn home(env: &HashMap<String, String>) -> Result<Self> {
        Ok(Self::new(paths::state_dir(env)?))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.base_dir.exists() {
            std::fs::create_dir_all(&self.base_dir).map_err(|e| {
                Error::Storage(format!(
                    "Failed to create directory {}: {}",
                    self.base_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// JSON 로드
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.file_path(filename);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// JSON 로드 (Optional)
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);
        if !path.exists() {
            return Ok(None);
        }
        self.load(filename).map(Some)
    }

    /// JSON 저장
    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.file_path(filename);
        let mut content = serde_json::to_string_pretty(data)?;
        content.push('\n');
        std::fs::write(&path, content)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }

    /// 파일 존재 여부
    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_save_creates_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonStore::new(temp.path().join("nested").join("state"));

        let path = store.save("doc.json", &json!({"a": 1})).unwrap();

        assert!(path.exists());
        let loaded: Value = store.load("doc.json").unwrap();
        assert_eq!(loaded, json!({"a": 1}));
    }

    #[test]
    fn test_load_optional_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonStore::new(temp.path());
        let loaded: Option<Value> = store.load_optional("missing.json").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_invalid_json_is_config_error() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("bad.json"), "{not json").unwrap();
        let store = JsonStore::new(temp.path());
        let result: Result<Value> = store.load("bad.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
