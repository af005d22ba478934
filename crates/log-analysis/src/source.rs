//! 로그 소스 -- 분석할 라인 시퀀스 공급
//!
//! 집계기는 라인의 출처에 관여하지 않습니다. 이 모듈은 파일이나 메모리 텍스트를
//! 라인 목록으로 바꿔 줄 뿐이며, 읽기 실패는
//! [`LogAnalysisError::SourceUnavailable`]로 호출자에게 전달됩니다.

use std::path::Path;

use tracing::info;

use crate::error::LogAnalysisError;

/// 파일 전체를 읽어 라인 목록으로 반환합니다.
///
/// 파일이 없거나, 권한이 없거나, UTF-8이 아니면 `SourceUnavailable` 에러입니다.
/// 줄 구분은 [`lines_from_str`]을 따릅니다.
pub async fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, LogAnalysisError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await.map_err(|source| {
        LogAnalysisError::SourceUnavailable {
            path: path.display().to_string(),
            source,
        }
    })?;

    let lines = lines_from_str(&content);
    info!(path = %path.display(), lines = lines.len(), "log source loaded");
    Ok(lines)
}

/// 메모리 텍스트를 라인 목록으로 나눕니다.
///
/// `\n`, `\r\n`, 단독 `\r` 모두 줄 끝으로 취급하며 줄 끝 문자는 제거됩니다.
pub fn lines_from_str(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_from_str_strips_line_endings() {
        let lines = lines_from_str("a\r\nb\nc");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn lines_from_str_splits_on_bare_carriage_return() {
        let text = "1.1.1.1 - - [x] \"GET /a HTTP/1.1\" 200 1\r2.2.2.2 - - [x] \"GET /b HTTP/1.1\" 200 1\r";
        let lines = lines_from_str(text);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1.1.1.1"));
        assert!(lines[1].starts_with("2.2.2.2"));
    }

    #[test]
    fn lines_from_str_keeps_empty_lines() {
        assert_eq!(lines_from_str("a\r\rb"), vec!["a", "", "b"]);
        assert_eq!(lines_from_str("a\r\n\r\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn lines_from_empty_text() {
        assert!(lines_from_str("").is_empty());
    }

    #[tokio::test]
    async fn read_lines_from_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("access.log");
        tokio::fs::write(&path, "first\nsecond\n")
            .await
            .expect("should write log");

        let lines = read_lines(&path).await.expect("should read");
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn missing_file_is_source_unavailable() {
        let result = read_lines("/nonexistent/dir/sample.log").await;
        match result {
            Err(LogAnalysisError::SourceUnavailable { path, source }) => {
                assert!(path.contains("sample.log"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_utf8_is_source_unavailable() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("binary.log");
        tokio::fs::write(&path, [0xff, 0xfe, 0x00, 0x41])
            .await
            .expect("should write bytes");

        let result = read_lines(&path).await;
        assert!(matches!(
            result,
            Err(LogAnalysisError::SourceUnavailable { .. })
        ));
    }
}
