//! logscope 액세스 로그 분석 크레이트
//!
//! # 모듈 구성
//!
//! - [`parser`]: 액세스 로그 라인에서 클라이언트, 경로, 401 클라이언트 추출
//! - [`aggregate`]: 세 가지 집계 (클라이언트별 요청 수, 최다 경로, 의심 클라이언트)
//! - [`tally`]: 첫 등장 순서를 보존하는 카운터
//! - [`report`]: 분석 결과 묶음
//! - [`source`]: 파일/텍스트에서 라인 시퀀스 공급
//! - [`sink`]: CSV 결과 출력
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! source -> AccessLogParser -> LogAnalyzer -> AnalysisReport -> sink (csv) / CLI (text, json)
//!              |                   |
//!        3 field patterns    Tally x 3 (single pass)
//! ```

pub mod aggregate;
pub mod error;
pub mod parser;
pub mod report;
pub mod sink;
pub mod source;
pub mod tally;

// --- 주요 타입 re-export ---

// 집계기
pub use aggregate::LogAnalyzer;

// 에러
pub use error::LogAnalysisError;

// 파서
pub use parser::{AccessLogParser, ParsedRecord};

// 결과
pub use report::{AnalysisReport, TopEndpoint};
pub use tally::Tally;

// 입출력
pub use sink::{write_csv, write_csv_file};
pub use source::{lines_from_str, read_lines};
