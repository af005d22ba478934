//! 에러 타입 — 도메인별 에러 정의

/// logscope 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogScopeError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 로그 분석 처리 에러 (소스 읽기, 결과 출력 등)
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 로그 분석 처리 에러
///
/// 분석 크레이트의 세부 에러가 최상위로 전파될 때 사용됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 로그 소스를 읽을 수 없음
    #[error("log source unavailable: {0}")]
    SourceUnavailable(String),

    /// 결과 출력 실패
    #[error("result sink failed: {0}")]
    SinkFailed(String),

    /// 분석기 초기화 실패
    #[error("analyzer init failed: {0}")]
    InitFailed(String),
}
