//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! # 에러 분류
//!
//! | 분류 | HTTP 상태 | 대표 코드 |
//! |---|---|---|
//! | 검증 실패 | 400 | `VALIDATION_ERROR`, `MISSING_CREDENTIALS` |
//! | 인증 실패 | 401 | `MISSING_TOKEN`, `INVALID_TOKEN`, `TOKEN_EXPIRED`, `INVALID_CREDENTIALS` |
//! | 권한 부족 | 403 | `INSUFFICIENT_PERMISSION` |
//! | 리소스 없음 | 404 | `PLATFORM_NOT_FOUND`, `NOT_FOUND` |
//! | 저장소 실패 | 500 | `PERSISTENCE_ERROR`, `INTERNAL_ERROR` |
//!
//! 검증/인증 에러는 항상 구조화된 응답으로 변환되며
//! 일반 서버 오류로 전파되지 않습니다.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "PLATFORM_NOT_FOUND",
///   "message": "Platform 'craigslist' is not available. Available platforms: magicbrix, 99acres, housing"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "VALIDATION_ERROR", "PLATFORM_NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성.
    ///
    /// # Arguments
    ///
    /// * `code` - 에러 코드
    /// * `message` - 에러 메시지
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// 에러 코드 반환.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 에러 메시지 반환.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
///
/// # Example
///
/// ```ignore
/// async fn list_properties(
///     Path(platform): Path<String>,
///     State(state): State<Arc<AppState>>,
/// ) -> ApiResult<Json<Vec<Property>>> {
///     let properties = state.properties.load_platform(&platform).await
///         .ok_or_else(|| platform_not_found(&platform))?;
///     Ok(Json(properties))
/// }
/// ```
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 에러 응답 튜플 생성 헬퍼.
pub fn error_response(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiErrorResponse>) {
    (status, Json(ApiErrorResponse::new(code, message)))
}

/// 내부 오류용 비노출 500 응답.
///
/// 서버 측에는 원인을 로깅하고 클라이언트에는 일반 메시지만 반환합니다.
pub fn internal_error(err: impl std::fmt::Display) -> (StatusCode, Json<ApiErrorResponse>) {
    tracing::error!(error = %err, "Unexpected server error");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Something went wrong on the server",
    )
}

impl IntoResponse for ApiErrorResponse {
    /// 상태 코드 없이 단독 반환되는 경우는 내부 오류로 간주.
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
