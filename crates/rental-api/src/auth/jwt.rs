//! JWT 토큰 처리.
//!
//! 로그인 시 발급되는 서명된 신원 토큰의 생성/검증 로직.
//! 토큰은 자체 완결형이며, 발급 후 서버 측에서 변경되지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use rental_core::Role;

/// 토큰 유효 기간 (시간). 발급 시점으로부터 정확히 24시간이며
/// 슬라이딩 만료는 없습니다.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT Access Token 페이로드.
///
/// 사용자 신원 정보와 권한을 포함합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 이메일 (소문자 정규형)
    pub sub: String,
    /// 사용자 표시 이름
    pub name: String,
    /// 사용자 역할
    pub role: Role,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// 만료 시각은 항상 발급 시점 + [`TOKEN_TTL_HOURS`]로 고정됩니다.
    ///
    /// # Arguments
    ///
    /// * `email` - 사용자 이메일
    /// * `name` - 사용자 표시 이름
    /// * `role` - 사용자 역할
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            sub: email.into(),
            name: name.into(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// 특정 역할 이상인지 확인.
    pub fn has_role(&self, required_role: Role) -> bool {
        self.role.level() >= required_role.level()
    }
}

/// JWT 토큰 처리 에러.
///
/// 만료(`TokenExpired`)와 구조/서명 손상(`InvalidToken`)은
/// 호출자가 서로 다른 진단을 반환해야 하므로 구분됩니다.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

/// Access Token 생성.
///
/// # Arguments
///
/// * `claims` - JWT 페이로드
/// * `secret` - 서버 비밀 키
///
/// # Returns
///
/// 인코딩된 JWT 문자열
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// JWT 토큰 디코딩 및 검증.
///
/// 서명 무결성을 먼저 확인한 뒤 만료를 검사합니다.
/// 서명 실패와 구조 손상은 `InvalidToken`으로, 구조는 유효하지만
/// 시간이 지난 토큰은 `TokenExpired`로 보고됩니다.
///
/// # Arguments
///
/// * `token` - JWT 토큰 문자열
/// * `secret` - 서버 비밀 키
pub fn decode_token(token: &str, secret: &str) -> Result<TokenData<Claims>, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // 만료 판정에 유예 시간을 두지 않음 (정확히 24시간 창)
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn expired_claims() -> Claims {
        let issued = Utc::now() - Duration::hours(TOKEN_TTL_HOURS + 2);
        Claims {
            sub: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
            iat: issued.timestamp(),
            exp: (issued + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }

    #[test]
    fn test_create_and_decode_token_roundtrip() {
        let claims = Claims::new("admin@example.com", "Admin", Role::Admin);

        let token = create_token(&claims, TEST_SECRET).unwrap();
        assert!(!token.is_empty());

        // 발급 직후 검증하면 동일한 신원이 복원되어야 함
        let decoded = decode_token(&token, TEST_SECRET).unwrap();
        assert_eq!(decoded.claims, claims);
    }

    #[test]
    fn test_expiry_is_exactly_24h_after_issuance() {
        let claims = Claims::new("user@example.com", "User", Role::User);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token_reports_expired_not_invalid() {
        let token = create_token(&expired_claims(), TEST_SECRET).unwrap();

        let result = decode_token(&token, TEST_SECRET);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_tampered_signature_reports_invalid() {
        let claims = Claims::new("admin@example.com", "Admin", Role::Admin);
        let token = create_token(&claims, TEST_SECRET).unwrap();

        // 서명 세그먼트의 마지막 바이트 변조
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let result = decode_token(&tampered, TEST_SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_structurally_corrupt_token_reports_invalid() {
        let result = decode_token("not.a.jwt", TEST_SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_reports_invalid() {
        let claims = Claims::new("user@example.com", "User", Role::User);
        let token = create_token(&claims, TEST_SECRET).unwrap();

        let result = decode_token(&token, "wrong-secret-key-for-testing-minimum-32-chars");
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_expired_and_tampered_token_is_invalid_first() {
        // 만료 + 변조가 겹치면 서명 검증이 먼저 실패해야 함
        let token = create_token(&expired_claims(), TEST_SECRET).unwrap();
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let result = decode_token(&tampered, TEST_SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }
}
