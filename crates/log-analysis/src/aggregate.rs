//! 집계기 -- 파싱된 필드를 세 가지 집계로 접습니다.
//!
//! [`LogAnalyzer`]는 다음 집계를 제공합니다.
//! - 클라이언트별 요청 수
//! - 가장 많이 요청된 경로 (최댓값만 보고)
//! - 401 응답 횟수가 기준 이상인 클라이언트
//!
//! 각 연산은 입력 라인과 설정만으로 결과를 계산하는 순수 함수이며,
//! 형식이 맞지 않는 라인은 해당 집계에서 조용히 제외됩니다.
//!
//! # 사용 예시
//! ```
//! use logscope_log_analysis::LogAnalyzer;
//!
//! let analyzer = LogAnalyzer::new(3).expect("patterns compile");
//! let lines = [
//!     r#"1.2.3.4 - - [1/1/24] "GET /a HTTP/1.1" 200 10"#,
//!     r#"5.6.7.8 - - [1/1/24] "GET /b HTTP/1.1" 200 5"#,
//! ];
//!
//! let report = analyzer.analyze(&lines);
//! assert_eq!(report.requests_per_client.get("1.2.3.4"), Some(1));
//! assert_eq!(report.top_endpoint.endpoint.as_deref(), Some("/a"));
//! ```

use tracing::debug;

use logscope_core::config::AnalysisConfig;

use crate::error::LogAnalysisError;
use crate::parser::AccessLogParser;
use crate::report::{AnalysisReport, TopEndpoint};
use crate::tally::Tally;

/// 액세스 로그 집계기
///
/// 파서와 의심 판정 기준을 보관합니다. 가변 상태가 없으므로
/// 여러 호출자가 공유해도 되고, 같은 입력에 대해 항상 같은 결과를 냅니다.
#[derive(Debug, Clone)]
pub struct LogAnalyzer {
    parser: AccessLogParser,
    threshold: u64,
}

impl LogAnalyzer {
    /// 주어진 401 횟수 기준으로 집계기를 생성합니다.
    pub fn new(threshold: u64) -> Result<Self, LogAnalysisError> {
        Ok(Self::with_parser(AccessLogParser::new()?, threshold))
    }

    /// 분석 설정에서 집계기를 생성합니다.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, LogAnalysisError> {
        Self::new(config.failed_login_threshold)
    }

    /// 이미 생성된 파서로 집계기를 만듭니다.
    pub fn with_parser(parser: AccessLogParser, threshold: u64) -> Self {
        Self { parser, threshold }
    }

    /// 설정된 401 횟수 기준
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// 내부 파서
    pub fn parser(&self) -> &AccessLogParser {
        &self.parser
    }

    /// 클라이언트별 요청 수를 집계합니다.
    ///
    /// 클라이언트 패턴에 매칭된 라인만 상태 코드와 무관하게 1씩 셉니다.
    pub fn count_requests_per_client<I, S>(&self, lines: I) -> Tally
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally = Tally::new();
        for line in lines {
            if let Some(client) = self.parser.extract_client(line.as_ref()) {
                tally.increment(client);
            }
        }
        tally
    }

    /// 가장 많이 요청된 경로와 그 횟수를 반환합니다.
    ///
    /// 매칭된 라인이 없으면 `(None, 0)`입니다.
    /// 최대 횟수가 같은 경로가 여럿이면 입력에서 먼저 등장한 경로가 선택됩니다.
    pub fn most_accessed_endpoint<I, S>(&self, lines: I) -> TopEndpoint
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut endpoints = Tally::new();
        for line in lines {
            if let Some(endpoint) = self.parser.extract_endpoint(line.as_ref()) {
                endpoints.increment(endpoint);
            }
        }
        TopEndpoint::from_tally(&endpoints)
    }

    /// 401 응답 횟수가 `threshold` 이상인 클라이언트를 반환합니다.
    ///
    /// 결과는 클라이언트가 처음 401을 받은 순서를 따릅니다.
    /// `threshold`가 0이면 401을 한 번이라도 받은 모든 클라이언트가 포함됩니다.
    pub fn detect_suspicious_activity<I, S>(&self, lines: I, threshold: u64) -> Tally
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut failed = Tally::new();
        for line in lines {
            if let Some(client) = self.parser.extract_failed_login_client(line.as_ref()) {
                failed.increment(client);
            }
        }
        failed.at_least(threshold)
    }

    /// 라인을 한 번만 순회하며 세 집계를 모두 계산합니다.
    ///
    /// 각 라인의 필드 매칭 여부는 서로 독립적이므로, 결과는 세 연산을
    /// 따로 호출한 것과 같습니다. 의심 판정에는 설정된 기준을 사용합니다.
    pub fn analyze<I, S>(&self, lines: I) -> AnalysisReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requests = Tally::new();
        let mut endpoints = Tally::new();
        let mut failed = Tally::new();
        let mut lines_scanned = 0usize;
        let mut unmatched = 0usize;

        for line in lines {
            lines_scanned += 1;
            let record = self.parser.parse(line.as_ref());
            if record.is_empty() {
                unmatched += 1;
                continue;
            }
            if let Some(client) = record.client {
                requests.increment(client);
            }
            if let Some(endpoint) = record.endpoint {
                endpoints.increment(endpoint);
            }
            if let Some(client) = record.failed_login_client {
                failed.increment(client);
            }
        }

        let report = AnalysisReport {
            lines_scanned,
            top_endpoint: TopEndpoint::from_tally(&endpoints),
            suspicious_clients: failed.at_least(self.threshold),
            requests_per_client: requests,
            threshold: self.threshold,
        };

        debug!(
            lines_scanned,
            unmatched,
            clients = report.requests_per_client.len(),
            endpoints = endpoints.len(),
            suspicious = report.suspicious_clients.len(),
            "access log analysis completed"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> LogAnalyzer {
        LogAnalyzer::new(3).expect("built-in patterns must compile")
    }

    fn failed_line(client: &str) -> String {
        format!(r#"{client} - - [1/1/24] "POST /login HTTP/1.1" 401 0"#)
    }

    const SCENARIO_A: [&str; 3] = [
        r#"1.2.3.4 - - [1/1/24] "GET /a HTTP/1.1" 200 10"#,
        r#"1.2.3.4 - - [1/1/24] "GET /a HTTP/1.1" 200 10"#,
        r#"5.6.7.8 - - [1/1/24] "GET /b HTTP/1.1" 200 5"#,
    ];

    #[test]
    fn scenario_requests_and_top_endpoint() {
        let analyzer = analyzer();

        let requests = analyzer.count_requests_per_client(SCENARIO_A);
        let entries: Vec<_> = requests.iter().collect();
        assert_eq!(entries, vec![("1.2.3.4", 2), ("5.6.7.8", 1)]);

        let top = analyzer.most_accessed_endpoint(SCENARIO_A);
        assert_eq!(top.endpoint.as_deref(), Some("/a"));
        assert_eq!(top.count, 2);
    }

    #[test]
    fn scenario_threshold_filters_failed_logins() {
        let analyzer = analyzer();
        let lines: Vec<String> = (0..4).map(|_| failed_line("9.9.9.9")).collect();

        let suspicious = analyzer.detect_suspicious_activity(&lines, 3);
        assert_eq!(suspicious.iter().collect::<Vec<_>>(), vec![("9.9.9.9", 4)]);

        let none = analyzer.detect_suspicious_activity(&lines, 5);
        assert!(none.is_empty());
    }

    #[test]
    fn scenario_garbage_line_contributes_nothing() {
        let analyzer = analyzer();
        let lines = ["not a real log line"];

        assert!(analyzer.count_requests_per_client(lines).is_empty());
        assert_eq!(analyzer.most_accessed_endpoint(lines), TopEndpoint::default());
        assert!(analyzer.detect_suspicious_activity(lines, 1).is_empty());
    }

    #[test]
    fn scenario_empty_input() {
        let analyzer = analyzer();
        let lines: [&str; 0] = [];

        assert!(analyzer.count_requests_per_client(lines).is_empty());
        let top = analyzer.most_accessed_endpoint(lines);
        assert_eq!(top.endpoint, None);
        assert_eq!(top.count, 0);
        assert!(analyzer.detect_suspicious_activity(lines, 3).is_empty());

        let report = analyzer.analyze(lines);
        assert_eq!(report.lines_scanned, 0);
        assert!(report.requests_per_client.is_empty());
        assert!(!report.has_suspicious_activity());
    }

    #[test]
    fn requests_are_counted_regardless_of_status() {
        let lines = [
            r#"1.2.3.4 - - [1/1/24] "GET /a HTTP/1.1" 200 10"#,
            r#"1.2.3.4 - - [1/1/24] "GET /a HTTP/1.1" 404 10"#,
            r#"1.2.3.4 - - [1/1/24] "POST /login HTTP/1.1" 401 10"#,
            r#"1.2.3.4 - - [1/1/24] "GET /b HTTP/1.1" 500 10"#,
        ];
        let requests = analyzer().count_requests_per_client(lines);
        assert_eq!(requests.get("1.2.3.4"), Some(4));
    }

    #[test]
    fn top_endpoint_tie_goes_to_first_seen() {
        let lines = [
            r#"1.1.1.1 - - [t] "GET /first HTTP/1.1" 200 1"#,
            r#"1.1.1.1 - - [t] "GET /second HTTP/1.1" 200 1"#,
            r#"1.1.1.1 - - [t] "GET /second HTTP/1.1" 200 1"#,
            r#"1.1.1.1 - - [t] "GET /first HTTP/1.1" 200 1"#,
        ];
        let top = analyzer().most_accessed_endpoint(lines);
        assert_eq!(top.endpoint.as_deref(), Some("/first"));
        assert_eq!(top.count, 2);
    }

    #[test]
    fn suspicious_clients_keep_first_failure_order() {
        let mut lines = Vec::new();
        for _ in 0..3 {
            lines.push(failed_line("10.0.0.2"));
            lines.push(failed_line("10.0.0.1"));
        }
        lines.push(failed_line("10.0.0.3"));

        let suspicious = analyzer().detect_suspicious_activity(&lines, 3);
        let entries: Vec<_> = suspicious.iter().collect();
        assert_eq!(entries, vec![("10.0.0.2", 3), ("10.0.0.1", 3)]);
    }

    #[test]
    fn threshold_zero_reports_every_failed_client() {
        let lines = [failed_line("7.7.7.7")];
        let suspicious = analyzer().detect_suspicious_activity(&lines, 0);
        assert_eq!(suspicious.get("7.7.7.7"), Some(1));
    }

    #[test]
    fn analyze_uses_configured_threshold() {
        let config = AnalysisConfig {
            failed_login_threshold: 2,
            ..AnalysisConfig::default()
        };
        let analyzer = LogAnalyzer::from_config(&config).expect("should build");
        let lines = [failed_line("8.8.8.8"), failed_line("8.8.8.8")];

        let report = analyzer.analyze(&lines);
        assert_eq!(report.threshold, 2);
        assert_eq!(report.suspicious_clients.get("8.8.8.8"), Some(2));
    }

    #[test]
    fn analyze_keeps_fields_independent() {
        let lines = [
            r#"garbage "GET /only-endpoint HTTP/1.1" 200 1"#,
            r#"2.2.2.2 - - [t] "GET" 200 1"#,
            "not a real log line",
        ];
        let report = analyzer().analyze(lines);
        assert_eq!(report.lines_scanned, 3);
        assert_eq!(report.requests_per_client.get("2.2.2.2"), Some(1));
        assert_eq!(report.top_endpoint.endpoint.as_deref(), Some("/only-endpoint"));
    }

    #[test]
    fn analyze_is_idempotent() {
        let analyzer = analyzer();
        let mut lines: Vec<String> = SCENARIO_A.iter().map(|s| s.to_string()).collect();
        lines.extend((0..3).map(|_| failed_line("9.9.9.9")));

        assert_eq!(analyzer.analyze(&lines), analyzer.analyze(&lines));
    }

    // Property-based tests using proptest
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// 정상 라인, 401 라인, 깨진 라인을 섞어서 생성
        fn line_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                ("[a-d]", "/[a-c]", prop::sample::select(vec![200u16, 302, 401, 404, 500]))
                    .prop_map(|(client, path, status)| format!(
                        r#"10.0.0.{client} - - [1/1/24] "GET {path} HTTP/1.1" {status} 42"#
                    )),
                ".{0,60}",
                "[a-z ]{0,20}\"[A-Z]+ /[a-z]*\"",
            ]
        }

        proptest! {
            #[test]
            fn request_total_never_exceeds_line_count(
                lines in prop::collection::vec(line_strategy(), 0..60)
            ) {
                let analyzer = analyzer();
                let requests = analyzer.count_requests_per_client(&lines);
                let matching = lines
                    .iter()
                    .filter(|line| analyzer.parser().extract_client(line).is_some())
                    .count() as u64;
                prop_assert_eq!(requests.total(), matching);
                prop_assert!(requests.total() <= lines.len() as u64);
            }

            #[test]
            fn raising_threshold_never_grows_result(
                lines in prop::collection::vec(line_strategy(), 0..60),
                threshold in 0u64..6,
            ) {
                let analyzer = analyzer();
                let lower = analyzer.detect_suspicious_activity(&lines, threshold);
                let higher = analyzer.detect_suspicious_activity(&lines, threshold + 1);
                prop_assert!(higher.len() <= lower.len());
                for (client, count) in higher.iter() {
                    prop_assert!(count > threshold);
                    prop_assert_eq!(lower.get(client), Some(count));
                }
            }

            #[test]
            fn single_pass_matches_separate_passes(
                lines in prop::collection::vec(line_strategy(), 0..60)
            ) {
                let analyzer = analyzer();
                let report = analyzer.analyze(&lines);
                prop_assert_eq!(&report.requests_per_client, &analyzer.count_requests_per_client(&lines));
                prop_assert_eq!(&report.top_endpoint, &analyzer.most_accessed_endpoint(&lines));
                prop_assert_eq!(
                    &report.suspicious_clients,
                    &analyzer.detect_suspicious_activity(&lines, analyzer.threshold())
                );
                prop_assert_eq!(report.lines_scanned, lines.len());
            }
        }
    }
}
