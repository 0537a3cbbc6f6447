//! 매물 저장소 (properties.json).
//!
//! 플랫폼 키 → 매물 배열 구조의 단일 JSON 문서를 전체 읽기/전체
//! 교체 방식으로 다룹니다. 읽기 경로는 스냅샷이므로 잠금이 없고,
//! 쓰기 경로는 load-modify-save 전 구간을 뮤텍스로 직렬화하여
//! 동시 추가 시 갱신 유실(lost update)을 방지합니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use rental_core::{Property, PropertyCollection};

/// 매물 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("매물 저장 실패: {0}")]
    WriteFailed(#[from] std::io::Error),
    #[error("매물 직렬화 실패: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    #[error("중복된 매물 ID: {0}")]
    DuplicateId(String),
}

/// 파일 기반 매물 저장소.
///
/// 핸들 복제가 가능하도록 쓰기 잠금을 Arc로 공유합니다.
/// 갱신은 이 저장소의 공개 계약을 통해서만 이루어집니다.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl PropertyRepository {
    /// 주어진 경로의 properties.json을 사용하는 저장소 생성.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 백킹 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 전체 컬렉션 스냅샷 로드.
    ///
    /// 읽기 또는 파싱 실패 시 경고 로그 후 빈 컬렉션을 반환합니다
    /// (사용자 저장소와 동일한 가용성 우선 정책).
    pub async fn load_all(&self) -> PropertyCollection {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read property store");
                return PropertyCollection::new();
            }
        };

        match serde_json::from_slice(&data) {
            Ok(collection) => collection,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to parse property store");
                PropertyCollection::new()
            }
        }
    }

    /// 특정 플랫폼의 매물 시퀀스 로드.
    ///
    /// 컬렉션에 해당 키가 없으면 빈 시퀀스를 반환합니다.
    pub async fn load_platform(&self, platform_key: &str) -> Vec<Property> {
        self.load_all()
            .await
            .remove(platform_key)
            .unwrap_or_default()
    }

    /// 매물 추가 후 전체 문서 저장.
    ///
    /// load-modify-save 전 구간을 잠금으로 보호합니다. 동시 호출은
    /// 순서대로 처리되며 각 호출은 직전 호출의 결과 위에 추가됩니다.
    ///
    /// # Arguments
    ///
    /// * `platform_key` - 소문자 정규형 플랫폼 키 (호출자가 정규화)
    /// * `property` - 추가할 매물 레코드
    pub async fn append_and_save(
        &self,
        platform_key: &str,
        property: Property,
    ) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.load_all().await;

        // ID 유일성은 전체 컬렉션(플랫폼 간 포함) 기준
        if collection
            .values()
            .flatten()
            .any(|existing| existing.id == property.id)
        {
            return Err(RepositoryError::DuplicateId(property.id));
        }

        collection
            .entry(platform_key.to_string())
            .or_default()
            .push(property);

        let json = serde_json::to_vec_pretty(&collection)?;
        tokio::fs::write(&self.path, json).await?;

        debug!(
            platform = platform_key,
            total = rental_core::property::total_count(&collection),
            "Property collection saved"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    fn sample_property(id: &str) -> Property {
        Property {
            id: id.to_string(),
            furnishing: "Furnished".to_string(),
            location: "Indiranagar, Bangalore".to_string(),
            plot_area: "950 sqft".to_string(),
            rent: 30000,
            security_deposit: 120000,
            specification: "2 BHK".to_string(),
            tenant_preferred: "Bachelors".to_string(),
            created_at: Utc::now(),
            created_by: "admin@example.com".to_string(),
        }
    }

    fn repo_in(dir: &tempfile::TempDir) -> PropertyRepository {
        PropertyRepository::new(dir.path().join("properties.json"))
    }

    #[tokio::test]
    async fn test_load_all_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        assert!(repo.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_all_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(repo.path(), "]]]").unwrap();

        assert!(repo.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_creates_platform_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        repo.append_and_save("housing", sample_property("p1"))
            .await
            .unwrap();

        let properties = repo.load_platform("housing").await;
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].id, "p1");
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        for id in ["a", "b", "c"] {
            repo.append_and_save("magicbrix", sample_property(id))
                .await
                .unwrap();
        }

        let ids: Vec<String> = repo
            .load_platform("magicbrix")
            .await
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected_across_platforms() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        repo.append_and_save("housing", sample_property("dup"))
            .await
            .unwrap();

        let result = repo.append_and_save("99acres", sample_property("dup")).await;
        assert!(matches!(result, Err(RepositoryError::DuplicateId(_))));

        // 거부된 추가는 문서에 반영되지 않아야 함
        assert!(repo.load_platform("99acres").await.is_empty());
    }

    #[tokio::test]
    async fn test_idempotent_reads() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        repo.append_and_save("housing", sample_property("p1"))
            .await
            .unwrap();

        let first = repo.load_all().await;
        let second = repo.load_all().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_no_updates() {
        // 핵심 회귀 테스트: N개의 동시 추가 후 정확히 N건이 남아야 함
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        const N: usize = 20;
        let mut handles = Vec::with_capacity(N);
        for i in 0..N {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.append_and_save("housing", sample_property(&format!("prop-{}", i)))
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let properties = repo.load_platform("housing").await;
        assert_eq!(properties.len(), N);

        // 모든 ID가 존재하며 유일해야 함
        let mut ids: Vec<String> = properties.into_iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), N);
    }
}
