//! 인증 라우트.
//!
//! # 엔드포인트
//!
//! - `POST /auth/login` - 자격 증명 검증 후 토큰 발급
//! - `GET /auth/verify` - 토큰 검증 및 신원 반환

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use rental_core::Role;

use crate::auth::{create_token, verify_password_async, Claims, JwtAuth, PasswordError};
use crate::error::{error_response, internal_error, ApiResult};
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// 사용자 이메일
    pub email: Option<String>,
    /// 평문 비밀번호
    pub password: Option<String>,
}

/// 토큰에 담긴 공개 사용자 정보.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    /// 이메일
    pub email: String,
    /// 역할
    pub role: Role,
    /// 표시 이름
    pub name: String,
}

impl From<&Claims> for UserInfo {
    fn from(claims: &Claims) -> Self {
        Self {
            email: claims.sub.clone(),
            role: claims.role,
            name: claims.name.clone(),
        }
    }
}

/// 로그인 성공 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// 안내 메시지
    pub message: String,
    /// 발급된 Bearer 토큰 (24시간 유효)
    pub token: String,
    /// 사용자 정보
    pub user: UserInfo,
}

/// 토큰 검증 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    /// 안내 메시지
    pub message: String,
    /// 토큰에서 복원된 사용자 정보
    pub user: UserInfo,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /auth/login - 로그인.
///
/// 사용자 저장소에서 이메일을 조회하고 Argon2로 비밀번호를 검증한 뒤
/// 24시간 유효한 서명 토큰을 발급합니다.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "자격 증명 누락", body = crate::error::ApiErrorResponse),
        (status = 401, description = "잘못된 자격 증명", body = crate::error::ApiErrorResponse),
        (status = 500, description = "서버 오류", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // 입력 검증
    let (email, password) = match (request.email, request.password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "MISSING_CREDENTIALS",
                "Email and password are required",
            ));
        }
    };

    // 사용자 조회 (소문자 정규화는 저장소에서 수행)
    let Some(user) = state.users.find_by_email(&email).await else {
        // 존재하지 않는 계정과 비밀번호 불일치는 같은 응답으로 처리
        return Err(invalid_credentials());
    };

    // 비밀번호 검증 (블로킹 풀에서 실행)
    match verify_password_async(password, user.password_hash.clone()).await {
        Ok(()) => {}
        Err(PasswordError::VerificationFailed) => {
            warn!(email = %user.email, "Login failed: wrong password");
            return Err(invalid_credentials());
        }
        Err(e) => return Err(internal_error(e)),
    }

    // 토큰 발급
    let claims = Claims::new(&user.email, &user.name, user.role);
    let token = create_token(&claims, &state.jwt.secret).map_err(internal_error)?;

    info!(email = %user.email, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo::from(&claims),
    }))
}

/// GET /auth/verify - 토큰 검증.
///
/// `JwtAuth` 추출기가 서명/만료 검사를 수행하므로 핸들러에
/// 도달했다면 토큰은 유효합니다.
#[utoipa::path(
    get,
    path = "/auth/verify",
    responses(
        (status = 200, description = "유효한 토큰", body = VerifyResponse),
        (status = 401, description = "토큰 누락/만료/변조", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn verify(JwtAuth(claims): JwtAuth) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        message: "Token is valid".to_string(),
        user: UserInfo::from(&claims),
    })
}

fn invalid_credentials() -> (StatusCode, Json<crate::error::ApiErrorResponse>) {
    error_response(
        StatusCode::UNAUTHORIZED,
        "INVALID_CREDENTIALS",
        "Invalid email or password",
    )
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/verify", get(verify))
}
