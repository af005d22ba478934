//! 로그 분석 에러 타입
//!
//! [`LogAnalysisError`]는 분석 크레이트 내부에서 발생하는 모든 에러를 표현합니다.
//! 형식이 맞지 않는 로그 라인은 에러가 아니라 해당 집계에서 제외될 뿐이므로
//! 여기에 포함되지 않습니다.
//!
//! `From<LogAnalysisError> for LogScopeError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use logscope_core::error::{AnalysisError, LogScopeError};

/// 로그 분석 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogAnalysisError {
    /// 로그 소스를 읽을 수 없음 (파일 없음, 권한, 인코딩 등)
    #[error("log source unavailable: {path}: {source}")]
    SourceUnavailable {
        /// 소스 경로
        path: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 결과 출력 실패
    #[error("sink write error: {sink}: {reason}")]
    SinkWrite {
        /// 출력 대상 (csv 등)
        sink: String,
        /// 실패 사유
        reason: String,
    },

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl From<LogAnalysisError> for LogScopeError {
    fn from(err: LogAnalysisError) -> Self {
        match err {
            LogAnalysisError::SourceUnavailable { .. } => {
                LogScopeError::Analysis(AnalysisError::SourceUnavailable(err.to_string()))
            }
            LogAnalysisError::SinkWrite { .. } => {
                LogScopeError::Analysis(AnalysisError::SinkFailed(err.to_string()))
            }
            LogAnalysisError::Regex(_) => {
                LogScopeError::Analysis(AnalysisError::InitFailed(err.to_string()))
            }
        }
    }
}
