//! # Rental Core
//!
//! 임대 매물 수집 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 플랫폼(매물 출처) 열거형
//! - 매물 레코드 및 플랫폼별 매물 컬렉션
//! - 사용자 및 역할 정의
//! - 로깅 인프라

pub mod logging;
pub mod platform;
pub mod property;
pub mod user;

pub use logging::{init_logging, LogConfig, LogFormat};
pub use platform::Platform;
pub use property::{PlatformSummary, Property, PropertyCollection};
pub use user::{Role, User};
