//! Paths - 사용자 상태 디렉토리 해석
//!
//! 환경 변수는 호출 시점에 캡처된 맵으로 전달받습니다.
//! (테스트/임베딩 호스트가 프로세스 전역 상태를 건드리지 않도록)

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// 상태 디렉토리 override
pub const ENV_HOME_OVERRIDE: &str = "HOMINEM_HOME";

/// 기본 상태 디렉토리 이름 (홈 디렉토리 하위)
pub const STATE_DIR_NAME: &str = ".hominem";

/// 상태 디렉토리: `$HOMINEM_HOME` → `~/.hominem`
pub fn state_dir(env: &HashMap<String, String>) -> Result<PathBuf> {
    if let Some(dir) = env.get(ENV_HOME_OVERRIDE).filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::home_dir()
        .map(|home| home.join(STATE_DIR_NAME))
        .ok_or(Error::HomeDirUnavailable)
}
