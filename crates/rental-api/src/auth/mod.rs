//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어(RBAC)를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 구조체 (이메일, 역할, 이름, 만료 시각)
//! - [`JwtAuth`]: Axum 미들웨어용 JWT 검증 추출기
//! - [`AdminAuth`]: 관리자 역할을 추가로 요구하는 추출기
//! - 토큰 생성/검증 함수 및 Argon2 비밀번호 해싱
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! // 보호된 라우트에서 JwtAuth 추출기 사용
//! async fn protected_handler(
//!     JwtAuth(claims): JwtAuth,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.name)
//! }
//! ```

mod jwt;
mod middleware;
mod password;

pub use jwt::{create_token, decode_token, Claims, JwtError, TOKEN_TTL_HOURS};
pub use middleware::{require_role, AdminAuth, JwtAuth, JwtAuthError, JwtConfig};
pub use password::{hash_password, verify_password, verify_password_async, PasswordError};
