//! 매물 레코드 및 플랫폼별 컬렉션.
//!
//! 매물은 생성 이후 불변이며, 플랫폼별 시퀀스에 추가만 됩니다.
//! 삭제/수정 연산은 존재하지 않습니다.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// 임대 매물 레코드.
///
/// JSON 문서 형식은 원본 데이터 파일과 호환되도록 camelCase를 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// 전체 컬렉션에서 유일한 식별자 (플랫폼 간 중복 없음)
    pub id: String,
    /// 가구 옵션 (예: "Semi-Furnished")
    pub furnishing: String,
    /// 위치
    pub location: String,
    /// 대지 면적
    pub plot_area: String,
    /// 월 임대료 (음수 불가)
    pub rent: u64,
    /// 보증금 (음수 불가)
    pub security_deposit: u64,
    /// 매물 설명 (예: "2 BHK")
    pub specification: String,
    /// 선호 임차인
    pub tenant_preferred: String,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// 생성자 이메일 (인증된 호출자로부터 기록)
    pub created_by: String,
}

/// 플랫폼 키(소문자 정규형) → 매물 시퀀스 매핑.
///
/// 각 시퀀스는 삽입 순서를 유지합니다.
pub type PropertyCollection = BTreeMap<String, Vec<Property>>;

/// 플랫폼별 요약 정보 (인덱스 응답용).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    /// 플랫폼 키
    pub platform: String,
    /// 보유 매물 수
    pub property_count: usize,
    /// 조회 엔드포인트
    pub endpoint: String,
}

/// 컬렉션의 플랫폼별 요약 생성.
///
/// 컬렉션에 아직 항목이 없는 플랫폼도 0건으로 포함합니다.
pub fn summarize(collection: &PropertyCollection) -> BTreeMap<String, PlatformSummary> {
    let mut summary = BTreeMap::new();

    for platform in Platform::ALL {
        let key = platform.as_str().to_string();
        let count = collection.get(&key).map_or(0, Vec::len);
        summary.insert(
            key.clone(),
            PlatformSummary {
                platform: key.clone(),
                property_count: count,
                endpoint: format!("/{}", key),
            },
        );
    }

    summary
}

/// 컬렉션 전체 매물 수.
pub fn total_count(collection: &PropertyCollection) -> usize {
    collection.values().map(Vec::len).sum()
}
