//! logscope 공통 크레이트 -- 에러 타입과 설정
//!
//! # 모듈 구성
//!
//! - [`config`]: `logscope.toml` 파싱, 환경변수 오버라이드, 유효성 검증
//! - [`error`]: 최상위 에러 타입과 도메인 에러

pub mod config;
pub mod error;

// --- 주요 타입 re-export ---

// 에러
pub use error::{AnalysisError, ConfigError, LogScopeError};

// 설정
pub use config::{AnalysisConfig, GeneralConfig, LogScopeConfig};
