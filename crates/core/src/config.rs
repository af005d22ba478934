//! 설정 관리 — logscope.toml 파싱 및 런타임 설정
//!
//! [`LogScopeConfig`]는 모든 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGSCOPE_ANALYSIS_FAILED_LOGIN_THRESHOLD=5` 형식)
//! 3. 설정 파일 (`logscope.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logscope_core::error::LogScopeError> {
//! use logscope_core::config::LogScopeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogScopeConfig::load("logscope.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogScopeConfig::parse("[analysis]\nfailed_login_threshold = 5")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, LogScopeError};

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "logscope.toml";

/// 기본 로그 소스 파일
pub const DEFAULT_SOURCE_PATH: &str = "sample.log";

/// 기본 CSV 결과 파일
pub const DEFAULT_CSV_OUTPUT: &str = "log_analysis_results.csv";

/// 의심 클라이언트로 판정하는 기본 401 응답 횟수
pub const DEFAULT_FAILED_LOGIN_THRESHOLD: u64 = 3;

/// logscope 통합 설정
///
/// `logscope.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogScopeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 분석 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl LogScopeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogScopeError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 지정되지 않은 경우 기본 경로를 시도하고, 없으면 기본값을 사용합니다.
    ///
    /// 명시적으로 지정된 경로가 없으면 에러입니다.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, LogScopeError> {
        if let Some(path) = path {
            return Self::load(path).await;
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if tokio::fs::try_exists(default_path).await.unwrap_or(false) {
            return Self::load(default_path).await;
        }

        debug!(
            path = DEFAULT_CONFIG_PATH,
            "config file not present, using built-in defaults"
        );
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogScopeError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogScopeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogScopeError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogScopeError> {
        toml::from_str(toml_str).map_err(|e| {
            LogScopeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGSCOPE_{SECTION}_{FIELD}`
    /// 예: `LOGSCOPE_ANALYSIS_SOURCE_PATH=/var/log/nginx/access.log`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGSCOPE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGSCOPE_GENERAL_LOG_FORMAT");

        // Analysis
        override_string(
            &mut self.analysis.source_path,
            "LOGSCOPE_ANALYSIS_SOURCE_PATH",
        );
        override_u64(
            &mut self.analysis.failed_login_threshold,
            "LOGSCOPE_ANALYSIS_FAILED_LOGIN_THRESHOLD",
        );
        override_bool(
            &mut self.analysis.csv_enabled,
            "LOGSCOPE_ANALYSIS_CSV_ENABLED",
        );
        override_string(&mut self.analysis.csv_output, "LOGSCOPE_ANALYSIS_CSV_OUTPUT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogScopeError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.analysis.source_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "analysis.source_path".to_owned(),
                reason: "source path must not be empty".to_owned(),
            }
            .into());
        }

        if self.analysis.failed_login_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.failed_login_threshold".to_owned(),
                reason: "must be at least 1".to_owned(),
            }
            .into());
        }

        // CSV 출력이 켜져 있을 때만 경로 검증
        if self.analysis.csv_enabled && self.analysis.csv_output.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "analysis.csv_output".to_owned(),
                reason: "csv output path must not be empty when csv is enabled".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 분석 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 분석할 액세스 로그 파일
    pub source_path: String,
    /// 의심 클라이언트 판정 기준 (401 응답 횟수, 이상)
    pub failed_login_threshold: u64,
    /// CSV 결과 파일 작성 여부
    pub csv_enabled: bool,
    /// CSV 결과 파일 경로
    pub csv_output: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_path: DEFAULT_SOURCE_PATH.to_owned(),
            failed_login_threshold: DEFAULT_FAILED_LOGIN_THRESHOLD,
            csv_enabled: true,
            csv_output: DEFAULT_CSV_OUTPUT.to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
