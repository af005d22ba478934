//! 분석 결과 타입
//!
//! [`AnalysisReport`]는 한 번의 분석 실행 결과를 담으며, 생성 후에는 변경되지 않습니다.
//! 콘솔, CSV, JSON 출력은 모두 이 구조체를 입력으로 받습니다.

use serde::Serialize;

use crate::tally::Tally;

/// 가장 많이 요청된 경로
///
/// 매칭된 라인이 없으면 `endpoint`는 `None`, `count`는 0입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopEndpoint {
    /// 요청 경로
    pub endpoint: Option<String>,
    /// 요청 횟수
    pub count: u64,
}

impl TopEndpoint {
    /// 경로별 집계에서 최댓값을 선택합니다 (동률이면 먼저 등장한 경로).
    pub fn from_tally(endpoints: &Tally) -> Self {
        match endpoints.max_entry() {
            Some((endpoint, count)) => Self {
                endpoint: Some(endpoint.to_owned()),
                count,
            },
            None => Self::default(),
        }
    }
}

/// 분석 결과 묶음
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// 입력 라인 수
    pub lines_scanned: usize,
    /// 클라이언트별 요청 수
    pub requests_per_client: Tally,
    /// 가장 많이 요청된 경로
    pub top_endpoint: TopEndpoint,
    /// 의심 판정에 사용한 401 횟수 기준
    pub threshold: u64,
    /// 401 횟수가 기준 이상인 클라이언트
    pub suspicious_clients: Tally,
}

impl AnalysisReport {
    /// 요청 패턴에 매칭된 전체 라인 수
    pub fn total_requests(&self) -> u64 {
        self.requests_per_client.total()
    }

    /// 의심 클라이언트가 하나라도 있는지 확인합니다.
    pub fn has_suspicious_activity(&self) -> bool {
        !self.suspicious_clients.is_empty()
    }
}
