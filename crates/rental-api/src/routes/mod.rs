//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `GET /` - 플랫폼별 매물 요약
//! - `GET /health` - 헬스 체크
//! - `POST /auth/login` - 로그인 (토큰 발급)
//! - `GET /auth/verify` - 토큰 검증
//! - `GET /{platform}` - 특정 플랫폼 매물 목록
//! - `POST /properties` - 매물 생성 (관리자 전용)

pub mod auth;
pub mod health;
pub mod properties;

pub use auth::{auth_router, LoginRequest, LoginResponse, UserInfo, VerifyResponse};
pub use health::{health_router, HealthResponse};
pub use properties::{properties_router, IndexResponse};

use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json, Router};
use serde_json::json;

use crate::error::ApiErrorResponse;
use crate::state::AppState;

/// 존재하지 않는 엔드포인트에 대한 404 응답.
///
/// 사용 가능한 엔드포인트 목록을 함께 안내합니다.
async fn endpoint_not_found() -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::with_details(
            "NOT_FOUND",
            "The requested endpoint does not exist",
            json!({
                "availableEndpoints": [
                    "GET / - List all platforms",
                    "GET /magicbrix - Get MagicBrix properties",
                    "GET /99acres - Get 99acres properties",
                    "GET /housing - Get Housing.com properties",
                    "GET /health - Health check",
                    "POST /auth/login - User login",
                    "GET /auth/verify - Verify JWT token",
                    "POST /properties - Create property (Admin only)"
                ]
            }),
        )),
    )
}

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하고 JWT 설정을 extensions로 주입합니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let jwt = state.jwt.clone();

    Router::new()
        .nest("/auth", auth_router())
        .nest("/health", health_router())
        .merge(properties_router())
        .fallback(endpoint_not_found)
        .with_state(state)
        .layer(Extension(jwt))
}
