//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 저장소 핸들과 JWT 설정을 소유하는 단일 컴포넌트로,
//! 핸들러가 백킹 파일에 직접 접근하지 않도록 합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::auth::JwtConfig;
use crate::repository::{PropertyRepository, UserStore};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 사용자 저장소 (users.json)
    pub users: UserStore,
    /// 매물 저장소 (properties.json)
    pub properties: PropertyRepository,
    /// JWT 서명 설정
    pub jwt: JwtConfig,
    /// API 버전
    pub version: String,
    /// 서버 시작 시각
    started_at: DateTime<Utc>,
}

impl AppState {
    /// 데이터 디렉터리와 JWT 시크릿으로 상태 생성.
    ///
    /// `users.json`과 `properties.json`은 모두 `data_dir` 아래에
    /// 위치합니다.
    pub fn new(data_dir: impl AsRef<Path>, jwt_secret: impl Into<String>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            users: UserStore::new(data_dir.join("users.json")),
            properties: PropertyRepository::new(data_dir.join("properties.json")),
            jwt: JwtConfig {
                secret: jwt_secret.into(),
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 테스트용 AppState 생성.
///
/// 임시 디렉터리를 데이터 디렉터리로 사용합니다.
#[cfg(test)]
pub fn create_test_state(data_dir: &Path) -> AppState {
    AppState::new(data_dir, "test-secret-key-minimum-32-characters-long")
}
