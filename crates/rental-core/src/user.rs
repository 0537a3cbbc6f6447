//! 사용자 및 역할 기반 접근 제어 (RBAC).
//!
//! 사용자 레코드는 외부에서 생성되며 이 시스템은 조회만 수행합니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 시스템에서 사용자의 권한 수준을 정의합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 관리자 - 매물 생성 등 쓰기 권한 보유
    Admin,
    /// 일반 사용자 - 읽기 전용 권한
    User,
}

impl Role {
    /// 역할의 우선순위 레벨 반환 (높을수록 더 많은 권한).
    pub fn level(&self) -> u8 {
        match self {
            Role::Admin => 100,
            Role::User => 10,
        }
    }

    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::User => "user",
        };
        write!(f, "{}", s)
    }
}

/// 등록된 사용자 레코드.
///
/// 사용자 저장소(users.json)에 소문자 이메일을 키로 저장됩니다.
/// 이 시스템 범위에서는 불변이며 조회만 가능합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 이메일 (소문자 정규형, 유일 키)
    pub email: String,
    /// Argon2 PHC 형식 비밀번호 해시
    #[serde(rename = "password")]
    pub password_hash: String,
    /// 역할
    pub role: Role,
    /// 표시 이름
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_level() {
        assert!(Role::Admin.level() > Role::User.level());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("User"), Some(Role::User));
        assert_eq!(Role::parse("moderator"), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn test_user_deserializes_password_field() {
        // 저장소 문서는 해시를 "password" 필드로 기록함
        let json = r#"{
            "email": "admin@example.com",
            "password": "$argon2id$v=19$m=19456,t=2,p=1$abc$def",
            "role": "admin",
            "name": "Admin"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.email, "admin@example.com");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(user.role, Role::Admin);
    }
}
