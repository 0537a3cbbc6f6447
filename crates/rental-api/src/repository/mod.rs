//! 파일 기반 저장소 계층.
//!
//! 저장소 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 두 문서 저장소 모두 전체 읽기/전체 교체 구조입니다 (부분 갱신 없음):
//!
//! - `users.json`: 소문자 이메일 → 사용자 레코드
//! - `properties.json`: 플랫폼 키 → 매물 배열

pub mod properties;
pub mod users;

pub use properties::{PropertyRepository, RepositoryError};
pub use users::UserStore;
