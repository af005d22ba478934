//! 로그 파싱 모듈 -- 액세스 로그 라인에서 필드 추출
//!
//! [`AccessLogParser`]는 단순화된 Common Log Format 라인에서
//! 클라이언트 주소, 요청 경로, 401 응답 클라이언트를 각각 독립적으로 추출합니다.
//!
//! # 사용 예시
//! ```
//! use logscope_log_analysis::parser::AccessLogParser;
//!
//! let parser = AccessLogParser::new().expect("patterns compile");
//! let line = r#"10.0.0.1 - - [03/Dec/2024:10:12:34 +0000] "GET /login HTTP/1.1" 401 128"#;
//!
//! let record = parser.parse(line);
//! assert_eq!(record.client, Some("10.0.0.1"));
//! assert_eq!(record.endpoint, Some("/login"));
//! assert_eq!(record.failed_login_client, Some("10.0.0.1"));
//! ```

pub mod access;

pub use access::AccessLogParser;

/// 한 라인에서 추출된 필드 묶음
///
/// 각 필드는 서로 다른 패턴으로 독립적으로 추출됩니다.
/// 클라이언트는 추출되지만 경로는 추출되지 않는 라인(또는 그 반대)이 존재할 수 있으며,
/// 각 집계는 자신이 사용하는 필드만 봅니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedRecord<'a> {
    /// 요청 클라이언트 (주소 토큰, 정규화 없음)
    pub client: Option<&'a str>,
    /// 요청 경로
    pub endpoint: Option<&'a str>,
    /// 상태 코드가 401인 라인의 클라이언트
    pub failed_login_client: Option<&'a str>,
}

impl ParsedRecord<'_> {
    /// 어떤 필드도 추출되지 않았는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.client.is_none() && self.endpoint.is_none() && self.failed_login_client.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        assert!(ParsedRecord::default().is_empty());
    }

    #[test]
    fn record_with_endpoint_only_is_not_empty() {
        let record = ParsedRecord {
            endpoint: Some("/a"),
            ..ParsedRecord::default()
        };
        assert!(!record.is_empty());
    }
}
