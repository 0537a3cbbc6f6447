//! 매물 조회/생성 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /` - 플랫폼별 매물 요약 (인증 불필요)
//! - `GET /{platform}` - 특정 플랫폼 매물 목록 (인증 불필요)
//! - `POST /properties` - 매물 생성 (관리자 전용)

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use rental_core::{property::summarize, Platform, PlatformSummary, Property};

use crate::auth::AdminAuth;
use crate::error::{error_response, ApiErrorResponse, ApiResult};
use crate::services::{CreatePropertyRequest, PropertyCreateError, PropertyService};
use crate::state::AppState;

// ================================================================================================
// Response Types
// ================================================================================================

/// 인덱스 응답: 플랫폼별 요약.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    /// 안내 메시지
    pub message: String,
    /// 플랫폼 키 → 요약
    pub available_platforms: BTreeMap<String, PlatformSummary>,
    /// 사용법 안내
    pub usage: String,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// GET / - 전체 플랫폼 요약 조회.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "플랫폼 요약", body = IndexResponse)
    ),
    tag = "properties"
)]
pub async fn index(State(state): State<Arc<AppState>>) -> Json<IndexResponse> {
    let collection = state.properties.load_all().await;

    Json(IndexResponse {
        message: "Rental Property API".to_string(),
        available_platforms: summarize(&collection),
        usage: "Use GET /{platform} to fetch properties for a specific platform".to_string(),
    })
}

/// GET /{platform} - 특정 플랫폼의 매물 목록 조회.
///
/// 고정 집합에 없는 플랫폼 이름은 알려진 플랫폼 목록과 함께
/// 404를 반환합니다.
#[utoipa::path(
    get,
    path = "/{platform}",
    params(
        ("platform" = String, Path, description = "플랫폼 키 (magicbrix | 99acres | housing)")
    ),
    responses(
        (status = 200, description = "매물 목록", body = Vec<Property>),
        (status = 404, description = "알 수 없는 플랫폼", body = ApiErrorResponse)
    ),
    tag = "properties"
)]
pub async fn list_by_platform(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
) -> ApiResult<Json<Vec<Property>>> {
    let Some(platform) = Platform::parse(&platform) else {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            "PLATFORM_NOT_FOUND",
            format!(
                "Platform '{}' is not available. Available platforms: {}",
                platform,
                Platform::known_keys().join(", ")
            ),
        ));
    };

    debug!(platform = platform.as_str(), "Listing properties");

    let properties = state.properties.load_platform(platform.as_str()).await;
    Ok(Json(properties))
}

/// POST /properties - 매물 생성 (관리자 전용).
///
/// `AdminAuth` 추출기가 토큰 검증과 역할 검사를 순서대로 수행한
/// 뒤에야 핸들러가 실행됩니다.
#[utoipa::path(
    post,
    path = "/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "매물 생성됨", body = Property),
        (status = 400, description = "검증 실패", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse),
        (status = 403, description = "권한 부족", body = ApiErrorResponse),
        (status = 500, description = "저장 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn create_property(
    AdminAuth(claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePropertyRequest>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    match PropertyService::create(&state.properties, request, &claims).await {
        Ok(property) => Ok((StatusCode::CREATED, Json(property))),
        Err(e) if e.is_validation() => Err(error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            e.to_string(),
        )),
        Err(PropertyCreateError::Persistence(e)) => {
            tracing::error!(error = %e, "Failed to persist property");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_ERROR",
                "Failed to save property",
            ))
        }
        // is_validation()이 false인 경우는 Persistence뿐
        Err(e) => Err(crate::error::internal_error(e)),
    }
}

/// 매물 라우터 생성.
///
/// `/properties`(POST)는 고정 경로이므로 `/{platform}`(GET)
/// 와일드카드보다 먼저 매칭됩니다.
pub fn properties_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/properties", post(create_property))
        .route("/{platform}", get(list_by_platform))
}
