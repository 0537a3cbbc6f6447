//! 임대 매물 수집 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증 및 역할 기반 접근 제어
//! - 파일 기반 사용자/매물 저장소
//! - 헬스 체크 엔드포인트
//! - OpenAPI 문서 및 Swagger UI
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 파일 기반 저장소 (users.json / properties.json)
//! - [`services`]: 매물 생성 서비스 (검증 + 영속화)
//! - [`error`]: 통합 API 에러 응답
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{hash_password, verify_password, Claims, JwtAuth, JwtAuthError, JwtConfig};
pub use error::{ApiErrorResponse, ApiResult};
pub use repository::{PropertyRepository, RepositoryError, UserStore};
pub use routes::create_api_router;
pub use services::PropertyService;
pub use state::AppState;
