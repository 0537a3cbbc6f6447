//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use rental_core::{PlatformSummary, Property};

use crate::error::ApiErrorResponse;
use crate::routes::{
    HealthResponse, IndexResponse, LoginRequest, LoginResponse, UserInfo, VerifyResponse,
};
use crate::services::CreatePropertyRequest;

/// Rental Property API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rental Property API",
        version = "0.1.0",
        description = r#"
# 임대 매물 수집 REST API

여러 외부 플랫폼(magicbrix, 99acres, housing)에서 수집한 임대
매물을 제공하는 API입니다.

## 인증

매물 생성은 JWT Bearer 토큰 인증과 관리자 역할이 필요합니다.
`POST /auth/login`으로 토큰을 발급받아
`Authorization: Bearer <token>` 헤더를 포함하세요.
토큰은 발급 후 정확히 24시간 동안 유효합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    paths(
        crate::routes::auth::login,
        crate::routes::auth::verify,
        crate::routes::health::health_check,
        crate::routes::properties::index,
        crate::routes::properties::list_by_platform,
        crate::routes::properties::create_property,
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        VerifyResponse,
        UserInfo,
        HealthResponse,
        IndexResponse,
        CreatePropertyRequest,
        Property,
        PlatformSummary,
        ApiErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "인증 및 토큰 관리"),
        (name = "properties", description = "매물 조회/생성"),
        (name = "health", description = "헬스 체크"),
    )
)]
pub struct ApiDoc;

/// Bearer 토큰 보안 스킴 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI 라우터 생성.
///
/// `/swagger-ui`에서 대화형 문서를, `/api-docs/openapi.json`에서
/// 원본 스펙을 제공합니다.
pub fn swagger_ui_router() -> Router {
    Router::new().merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_builds() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("/auth/login"));
        assert!(json.contains("/properties"));
        assert!(json.contains("bearer_auth"));
    }
}
