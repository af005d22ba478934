//! 액세스 로그 파서 (단순화된 Common Log Format)
//!
//! # 라인 형식
//! ```text
//! <client> - - [<timestamp>] "<method> <path> <protocol>" <status> <size>
//! ```
//!
//! 세 개의 패턴이 각 집계에 필요한 필드를 독립적으로 추출합니다.
//! 모든 패턴은 라인 시작에 고정되며 라인 끝에는 고정되지 않습니다.
//! 형식이 맞지 않는 라인은 에러 없이 `None`을 반환합니다.

use regex::Regex;

use super::ParsedRecord;
use crate::error::LogAnalysisError;

/// 일반 요청 라인: 선행 클라이언트 토큰
const CLIENT_PATTERN: &str = r#"^(\S+) - - \[.*\] ".*" \d+ \d+"#;

/// 따옴표로 감싼 요청 필드의 처음 두 토큰 (method, path)
const ENDPOINT_PATTERN: &str = r#"^.*"(\S+ \S+).*" \d+ \d+"#;

/// 상태 코드가 정확히 401인 라인의 클라이언트 토큰
const FAILED_LOGIN_PATTERN: &str = r#"^(\S+) - - \[.*\] ".*" 401 .*"#;

/// 액세스 로그 파서
///
/// 정규식은 생성 시 한 번만 컴파일하여 보관합니다.
/// 내부 상태가 없으므로 여러 스레드에서 공유해도 안전합니다.
#[derive(Debug, Clone)]
pub struct AccessLogParser {
    client: Regex,
    endpoint: Regex,
    failed_login: Regex,
}

impl AccessLogParser {
    /// 새 파서를 생성합니다.
    pub fn new() -> Result<Self, LogAnalysisError> {
        Ok(Self {
            client: Regex::new(CLIENT_PATTERN)?,
            endpoint: Regex::new(ENDPOINT_PATTERN)?,
            failed_login: Regex::new(FAILED_LOGIN_PATTERN)?,
        })
    }

    /// 라인 선두의 클라이언트 토큰을 추출합니다.
    ///
    /// 라인이 `<client> - - [...] "..." <status> <size>` 형태로 시작하지 않으면 `None`.
    pub fn extract_client<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.client
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// 요청 필드의 두 번째 토큰(경로)을 추출합니다.
    ///
    /// 토큰이 두 개 이상인 따옴표 요청 필드가 없으면 `None`.
    pub fn extract_endpoint<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.endpoint
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|request| request.as_str().split_whitespace().nth(1))
    }

    /// 상태 코드가 `401`인 라인의 클라이언트 토큰을 추출합니다.
    pub fn extract_failed_login_client<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.failed_login
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// 세 필드를 모두 추출합니다. 각 필드의 매칭 여부는 서로 독립적입니다.
    pub fn parse<'a>(&self, line: &'a str) -> ParsedRecord<'a> {
        ParsedRecord {
            client: self.extract_client(line),
            endpoint: self.extract_endpoint(line),
            failed_login_client: self.extract_failed_login_client(line),
        }
    }
}
