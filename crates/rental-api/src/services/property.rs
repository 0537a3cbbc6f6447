//! 매물 생성 서비스.
//!
//! 매물 생성 요청을 검증하고, 식별자와 감사 메타데이터를 부여한 뒤
//! 저장소에 영속화합니다. 매물 레코드는 이 서비스를 통해서만
//! 생성됩니다.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use rental_core::{Platform, Property};

use crate::auth::Claims;
use crate::repository::{PropertyRepository, RepositoryError};

/// 매물 생성 요청.
///
/// 모든 필드는 검증 전까지 선택적으로 받아들입니다. 누락/형식
/// 오류는 프레임워크의 일반 거부가 아니라 구조화된 400으로
/// 변환되어야 하기 때문입니다. `rent`/`securityDeposit`은 JSON
/// 정수와 숫자 문자열을 모두 허용합니다.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    /// 대상 플랫폼 (고정 집합, 대소문자 무시)
    pub platform: Option<String>,
    /// 가구 옵션
    pub furnishing: Option<String>,
    /// 위치
    pub location: Option<String>,
    /// 대지 면적
    pub plot_area: Option<String>,
    /// 월 임대료 (정수 또는 숫자 문자열)
    #[schema(value_type = Option<Object>)]
    pub rent: Option<Value>,
    /// 보증금 (정수 또는 숫자 문자열)
    #[schema(value_type = Option<Object>)]
    pub security_deposit: Option<Value>,
    /// 매물 설명
    pub specification: Option<String>,
    /// 선호 임차인
    pub tenant_preferred: Option<String>,
}

/// 매물 생성 실패 사유.
#[derive(Debug, thiserror::Error)]
pub enum PropertyCreateError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),
    #[error("Platform '{given}' is not supported. Supported platforms: {supported}")]
    UnknownPlatform { given: String, supported: String },
    #[error("Field '{field}' must be a non-negative integer")]
    InvalidAmount { field: &'static str },
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

impl PropertyCreateError {
    /// 검증 에러인지 (persistence 에러가 아닌지) 확인.
    pub fn is_validation(&self) -> bool {
        !matches!(self, PropertyCreateError::Persistence(_))
    }
}

/// 매물 생성 서비스.
pub struct PropertyService;

impl PropertyService {
    /// 매물 생성.
    ///
    /// 검증 순서 (첫 위반에서 즉시 실패):
    /// 1. 모든 필수 필드가 존재하고 트리밍 후 비어 있지 않음
    /// 2. 플랫폼이 고정 집합에 속함 (소문자 정규화)
    /// 3. `rent`/`securityDeposit`이 음수 아닌 정수로 파싱됨
    ///
    /// 성공 시 유일 식별자를 생성하고 `created_at`/`created_by`를
    /// 기록한 뒤 저장소에 추가합니다. `created_by`는 요청 본문이
    /// 아니라 인증된 호출자의 이메일에서 가져옵니다.
    pub async fn create(
        repository: &PropertyRepository,
        request: CreatePropertyRequest,
        caller: &Claims,
    ) -> Result<Property, PropertyCreateError> {
        let platform_raw = required_text("platform", request.platform.as_deref())?;
        let furnishing = required_text("furnishing", request.furnishing.as_deref())?;
        let location = required_text("location", request.location.as_deref())?;
        let plot_area = required_text("plotArea", request.plot_area.as_deref())?;
        let rent_raw = required_amount("rent", request.rent.as_ref())?;
        let deposit_raw = required_amount("securityDeposit", request.security_deposit.as_ref())?;
        let specification = required_text("specification", request.specification.as_deref())?;
        let tenant_preferred =
            required_text("tenantPreferred", request.tenant_preferred.as_deref())?;

        let platform = Platform::parse(&platform_raw).ok_or_else(|| {
            PropertyCreateError::UnknownPlatform {
                given: platform_raw.clone(),
                supported: Platform::known_keys().join(", "),
            }
        })?;

        let rent = parse_amount("rent", rent_raw)?;
        let security_deposit = parse_amount("securityDeposit", deposit_raw)?;

        let property = Property {
            id: generate_property_id(),
            furnishing,
            location,
            plot_area,
            rent,
            security_deposit,
            specification,
            tenant_preferred,
            created_at: Utc::now(),
            created_by: caller.sub.clone(),
        };

        repository
            .append_and_save(platform.as_str(), property.clone())
            .await?;

        info!(
            platform = platform.as_str(),
            id = %property.id,
            created_by = %property.created_by,
            "Property created"
        );

        Ok(property)
    }
}

/// 전역 유일 매물 식별자 생성.
///
/// 밀리초 타임스탬프에 랜덤 비트를 결합하여 플랫폼 간 충돌을
/// 방지합니다. 저장소의 쓰기 잠금 아래에서 중복이 한 번 더
/// 검사됩니다.
fn generate_property_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::random();
    format!("{}-{:08x}", millis, suffix)
}

/// 필수 텍스트 필드 검증: 존재 + 트리밍 후 비어있지 않음.
fn required_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<String, PropertyCreateError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(PropertyCreateError::MissingField(field)),
    }
}

/// 금액 필드의 존재 검증 (파싱은 플랫폼 검사 이후 수행).
fn required_amount<'a>(
    field: &'static str,
    value: Option<&'a Value>,
) -> Result<&'a Value, PropertyCreateError> {
    match value {
        None | Some(Value::Null) => Err(PropertyCreateError::MissingField(field)),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(PropertyCreateError::MissingField(field))
        }
        Some(v) => Ok(v),
    }
}

/// 금액 파싱: JSON 정수 또는 숫자 문자열만 허용.
///
/// 음수와 소수는 레코드가 구성되기 전에 거부됩니다.
fn parse_amount(field: &'static str, value: &Value) -> Result<u64, PropertyCreateError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or(PropertyCreateError::InvalidAmount { field }),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| PropertyCreateError::InvalidAmount { field }),
        _ => Err(PropertyCreateError::InvalidAmount { field }),
    }
}
