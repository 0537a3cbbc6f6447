//! Axum용 JWT 인증 미들웨어.
//!
//! Axum 핸들러에서 사용할 JWT 인증 추출기 및 역할 검사.
//! 토큰은 자체 완결형이므로 추출기는 사용자 저장소를 조회하지
//! 않습니다. 폐기 목록이 없어 발급된 토큰은 만료까지 유효합니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use rental_core::Role;

use super::{decode_token, Claims};

/// JWT 비밀 키 저장소.
///
/// 요청 extensions를 통해 추출기에 전달됩니다.
/// 설정되지 않으면 개발용 기본 시크릿으로 대체되며, 배포 환경에서
/// 기본값 사용은 문서화된 보안 리스크입니다.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// 미설정 시 사용되는 개발용 기본 시크릿.
pub(crate) const DEV_FALLBACK_SECRET: &str = "dev-secret-key-change-in-production";

impl JwtConfig {
    /// 환경 변수 `JWT_SECRET`에서 로드.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using default (INSECURE for development only)");
            DEV_FALLBACK_SECRET.to_string()
        });
        Self { secret }
    }
}

/// JWT 인증 추출기.
///
/// Axum 핸들러에서 인증된 사용자 정보를 추출합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(claims): JwtAuth,
/// ) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.sub)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// JWT 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("Authorization token is required")]
    MissingToken,
    #[error("The provided token has expired")]
    TokenExpired,
    #[error("The provided token is invalid")]
    InvalidToken,
    #[error("Admin role required")]
    InsufficientPermission,
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            JwtAuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            JwtAuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            JwtAuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            JwtAuthError::InsufficientPermission => {
                (StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSION")
            }
        };

        let body = Json(json!({
            "code": code,
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(JwtAuthError::MissingToken)?;

        // Bearer 스킴이 아닌 헤더는 토큰이 제시되지 않은 것으로 취급
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(JwtAuthError::MissingToken)?;

        // Extensions에서 JWT secret 가져오기
        let jwt_secret = parts
            .extensions
            .get::<JwtConfig>()
            .map(|c| c.secret.clone())
            .unwrap_or_else(|| JwtConfig::from_env().secret);

        // 토큰 검증
        let token_data = decode_token(token, &jwt_secret).map_err(|e| match e {
            super::jwt::JwtError::TokenExpired => JwtAuthError::TokenExpired,
            _ => JwtAuthError::InvalidToken,
        })?;

        Ok(JwtAuth(token_data.claims))
    }
}

/// 특정 역할 이상의 권한을 요구하는 검사.
///
/// 반드시 검증된 Claims에 대해서만 호출해야 합니다.
///
/// # Returns
///
/// 권한이 충분하면 Ok(()), 부족하면 Err(JwtAuthError)
pub fn require_role(required_role: Role, claims: &Claims) -> Result<(), JwtAuthError> {
    if claims.has_role(required_role) {
        Ok(())
    } else {
        Err(JwtAuthError::InsufficientPermission)
    }
}

/// Admin 권한을 요구하는 추출기.
///
/// [`JwtAuth`] 검증 이후 역할 검사를 수행하므로 인증과 권한
/// 검사의 순서가 타입 수준에서 보장됩니다.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(claims) = JwtAuth::from_request_parts(parts, state).await?;
        require_role(Role::Admin, &claims)?;
        Ok(AdminAuth(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Extension, Router};
    use tower::ServiceExt;

    use crate::auth::create_token;

    const TEST_SECRET: &str = "middleware-test-secret-minimum-32-characters";

    fn test_router() -> Router {
        async fn whoami(JwtAuth(claims): JwtAuth) -> String {
            claims.sub
        }

        async fn admin_only(AdminAuth(claims): AdminAuth) -> String {
            claims.sub
        }

        Router::new()
            .route("/whoami", get(whoami))
            .route("/admin", get(admin_only))
            .layer(Extension(JwtConfig {
                secret: TEST_SECRET.to_string(),
            }))
    }

    fn bearer(role: Role) -> String {
        let claims = Claims::new("someone@example.com", "Someone", role);
        let token = create_token(&claims, TEST_SECRET).unwrap();
        format!("Bearer {}", token)
    }

    async fn request(app: Router, uri: &str, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_missing_header_yields_missing_token() {
        let (status, body) = request(test_router(), "/whoami", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "MISSING_TOKEN");
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_treated_as_missing_token() {
        // Bearer가 아닌 스킴은 토큰 미제시와 동일하게 처리됨
        let (status, body) = request(test_router(), "/whoami", Some("Basic abc123")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "MISSING_TOKEN");
    }

    #[tokio::test]
    async fn test_garbage_token_yields_invalid_token() {
        let (status, body) =
            request(test_router(), "/whoami", Some("Bearer not.a.token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let auth = bearer(Role::User);
        let (status, _) = request(test_router(), "/whoami", Some(&auth)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden_on_admin_route() {
        let auth = bearer(Role::User);
        let (status, body) = request(test_router(), "/admin", Some(&auth)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "INSUFFICIENT_PERMISSION");
    }

    #[tokio::test]
    async fn test_admin_passes_admin_route() {
        let auth = bearer(Role::Admin);
        let (status, _) = request(test_router(), "/admin", Some(&auth)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_require_role() {
        let admin = Claims::new("a@example.com", "A", Role::Admin);
        let user = Claims::new("u@example.com", "U", Role::User);

        assert!(require_role(Role::Admin, &admin).is_ok());
        assert!(require_role(Role::User, &admin).is_ok());
        assert!(require_role(Role::Admin, &user).is_err());
        assert!(require_role(Role::User, &user).is_ok());
    }
}
