//! 사용자 저장소 (users.json).
//!
//! 조회 때마다 백킹 파일을 새로 읽습니다 (캐싱 없음).
//! 읽기/파싱 실패는 경고 로그 후 "사용자 없음"으로 처리됩니다 —
//! 서비스 가용성을 우선하는 대신 저장소 손상이 가려질 수 있는
//! 알려진 리스크입니다.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use rental_core::User;

/// 파일 기반 사용자 저장소.
///
/// 사용자 레코드는 외부에서 생성되며 이 저장소는 읽기 전용입니다.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// 주어진 경로의 users.json을 사용하는 저장소 생성.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 백킹 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 전체 사용자 맵 로드.
    ///
    /// 읽기 또는 파싱 실패 시 빈 맵을 반환합니다.
    pub async fn load_all(&self) -> HashMap<String, User> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read user store");
                return HashMap::new();
            }
        };

        match serde_json::from_slice(&data) {
            Ok(users) => users,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to parse user store");
                HashMap::new()
            }
        }
    }

    /// 이메일로 사용자 조회.
    ///
    /// 조회 키는 소문자로 정규화됩니다. 매 호출마다 저장소를
    /// 새로 읽습니다.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.load_all().await;
        users.get(&email.trim().to_lowercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rental_core::Role;

    fn write_store(dir: &tempfile::TempDir, contents: &str) -> UserStore {
        let path = dir.path().join("users.json");
        std::fs::write(&path, contents).unwrap();
        UserStore::new(path)
    }

    const SAMPLE: &str = r#"{
        "admin@example.com": {
            "email": "admin@example.com",
            "password": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
            "role": "admin",
            "name": "Admin User"
        },
        "viewer@example.com": {
            "email": "viewer@example.com",
            "password": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
            "role": "user",
            "name": "Viewer"
        }
    }"#;

    #[tokio::test]
    async fn test_find_by_email_normalizes_case() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_store(&dir, SAMPLE);

        let user = store.find_by_email("ADMIN@Example.COM").await.unwrap();
        assert_eq!(user.email, "admin@example.com");
        assert_eq!(user.role, Role::Admin);

        let user = store.find_by_email("  viewer@example.com ").await.unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_unknown_email_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_store(&dir, SAMPLE);

        assert!(store.find_by_email("ghost@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path().join("missing.json"));

        assert!(store.load_all().await.is_empty());
        assert!(store.find_by_email("admin@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = write_store(&dir, "{ not json");

        assert!(store.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_sees_external_updates() {
        // 캐싱이 없으므로 파일 교체가 즉시 반영되어야 함
        let dir = tempfile::tempdir().unwrap();
        let store = write_store(&dir, "{}");
        assert!(store.find_by_email("admin@example.com").await.is_none());

        std::fs::write(store.path(), SAMPLE).unwrap();
        assert!(store.find_by_email("admin@example.com").await.is_some());
    }
}
