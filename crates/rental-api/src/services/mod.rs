//! 비즈니스 서비스 계층.
//!
//! 검증을 통과한 입력만 저장소에 도달하도록 라우트와 저장소
//! 사이를 중개합니다.

pub mod property;

pub use property::{CreatePropertyRequest, PropertyCreateError, PropertyService};
