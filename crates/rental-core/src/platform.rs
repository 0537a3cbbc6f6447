//! 매물 출처 플랫폼 정의.
//!
//! 매물은 고정된 외부 플랫폼 집합 아래에 파티셔닝됩니다.
//! 저장소 키는 항상 소문자 정규형을 사용합니다.

use serde::{Deserialize, Serialize};

/// 매물 출처 플랫폼.
///
/// 시스템이 수집하는 외부 임대 플랫폼의 고정 집합입니다.
/// 직렬화 시 소문자 정규형 문자열을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum Platform {
    /// MagicBrix
    #[serde(rename = "magicbrix")]
    MagicBrix,
    /// 99acres
    #[serde(rename = "99acres")]
    NinetyNineAcres,
    /// Housing.com
    #[serde(rename = "housing")]
    Housing,
}

impl Platform {
    /// 지원하는 모든 플랫폼.
    pub const ALL: [Platform; 3] = [
        Platform::MagicBrix,
        Platform::NinetyNineAcres,
        Platform::Housing,
    ];

    /// 소문자 정규형 키 반환.
    ///
    /// 저장소의 맵 키와 URL 경로 세그먼트로 사용됩니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MagicBrix => "magicbrix",
            Platform::NinetyNineAcres => "99acres",
            Platform::Housing => "housing",
        }
    }

    /// 문자열에서 플랫폼 파싱 (대소문자 무시).
    ///
    /// 고정 집합에 없는 이름은 `None`을 반환합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "magicbrix" => Some(Platform::MagicBrix),
            "99acres" => Some(Platform::NinetyNineAcres),
            "housing" => Some(Platform::Housing),
            _ => None,
        }
    }

    /// 알려진 플랫폼 키 목록 (에러 메시지용).
    pub fn known_keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Platform::parse("magicbrix"), Some(Platform::MagicBrix));
        assert_eq!(Platform::parse("MagicBrix"), Some(Platform::MagicBrix));
        assert_eq!(Platform::parse("99ACRES"), Some(Platform::NinetyNineAcres));
        assert_eq!(Platform::parse(" housing "), Some(Platform::Housing));
        assert_eq!(Platform::parse("craigslist"), None);
        assert_eq!(Platform::parse(""), None);
    }

    #[test]
    fn test_as_str_is_lowercase() {
        for platform in Platform::ALL {
            let key = platform.as_str();
            assert_eq!(key, key.to_lowercase());
            // 정규형 키는 다시 파싱 가능해야 함
            assert_eq!(Platform::parse(key), Some(platform));
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Platform::NinetyNineAcres).unwrap();
        assert_eq!(json, "\"99acres\"");

        let parsed: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Platform::NinetyNineAcres);
    }
}
