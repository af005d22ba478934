//! CSV 결과 출력
//!
//! # 파일 레이아웃
//! ```text
//! Requests per IP:
//! IP Address,Request Count
//! <client>,<count>            (횟수 내림차순)
//!
//! Most Accessed Endpoint:
//! Endpoint,Access Count
//! <endpoint>,<count>          (경로가 없으면 빈 칸)
//!
//! Suspicious Activity:
//! IP Address,Failed Login Count
//! <client>,<count>            (첫 401 순서)
//! ```
//!
//! 섹션 사이는 빈 행으로 구분하고, 행 종결자는 CRLF입니다.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::LogAnalysisError;
use crate::report::AnalysisReport;

const CSV_SINK: &str = "csv";

/// 분석 결과를 CSV 형식으로 `writer`에 씁니다.
pub fn write_csv<W: Write>(
    report: &AnalysisReport,
    mut writer: W,
) -> Result<(), LogAnalysisError> {
    let mut builder = csv::WriterBuilder::new();
    builder.flexible(true).terminator(csv::Terminator::CRLF);

    write_section(
        &builder,
        &mut writer,
        "Requests per IP:",
        ["IP Address", "Request Count"],
        report.requests_per_client.sorted_by_count_desc(),
    )?;
    blank_row(&mut writer)?;

    let top = &report.top_endpoint;
    write_section(
        &builder,
        &mut writer,
        "Most Accessed Endpoint:",
        ["Endpoint", "Access Count"],
        [(top.endpoint.as_deref().unwrap_or_default(), top.count)],
    )?;
    blank_row(&mut writer)?;

    write_section(
        &builder,
        &mut writer,
        "Suspicious Activity:",
        ["IP Address", "Failed Login Count"],
        report.suspicious_clients.iter(),
    )?;

    writer.flush().map_err(|e| sink_error(e.into()))
}

/// 분석 결과를 CSV 파일로 저장합니다. 기존 파일은 덮어씁니다.
pub async fn write_csv_file(
    report: &AnalysisReport,
    path: impl AsRef<Path>,
) -> Result<(), LogAnalysisError> {
    let path = path.as_ref();
    let mut buf = Vec::new();
    write_csv(report, &mut buf)?;

    tokio::fs::write(path, &buf)
        .await
        .map_err(|e| LogAnalysisError::SinkWrite {
            sink: CSV_SINK.to_owned(),
            reason: format!("{}: {e}", path.display()),
        })?;

    info!(path = %path.display(), bytes = buf.len(), "csv results written");
    Ok(())
}

/// 제목 행, 헤더 행, `(키, 횟수)` 행들로 된 섹션 하나를 씁니다.
///
/// 섹션마다 `writer`를 빌려 csv 라이터를 새로 만들고, 끝나면 flush합니다.
fn write_section<'a, W, R>(
    builder: &csv::WriterBuilder,
    writer: &mut W,
    title: &str,
    header: [&str; 2],
    rows: R,
) -> Result<(), LogAnalysisError>
where
    W: Write,
    R: IntoIterator<Item = (&'a str, u64)>,
{
    let mut csv = builder.from_writer(&mut *writer);
    csv.write_record([title]).map_err(sink_error)?;
    csv.write_record(header).map_err(sink_error)?;
    for (key, count) in rows {
        csv.write_record([key, count.to_string().as_str()])
            .map_err(sink_error)?;
    }
    csv.flush().map_err(|e| sink_error(e.into()))
}

/// 빈 행을 씁니다.
///
/// csv 크레이트는 필드가 없는 레코드를 `""`로 쓰므로 종결자만 직접 기록합니다.
fn blank_row<W: Write>(writer: &mut W) -> Result<(), LogAnalysisError> {
    writer.write_all(b"\r\n").map_err(|e| sink_error(e.into()))
}

fn sink_error(err: csv::Error) -> LogAnalysisError {
    LogAnalysisError::SinkWrite {
        sink: CSV_SINK.to_owned(),
        reason: err.to_string(),
    }
}
