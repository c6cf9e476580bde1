//! # リクエストパラメータの検証
//!
//! クエリ・パスパラメータを検証する純粋関数。ルーターの抽出機構には
//! 依存せず、生の文字列を受け取って検証済みの値かエラーを返す。

use crate::error::ApiError;

/// 一覧取得のデフォルト件数
const DEFAULT_LIMIT: i64 = 10;

/// `limit` クエリパラメータを検証する
///
/// 未指定なら 10 件。指定されていれば整数としてパースできること。
pub fn parse_limit(raw: Option<&str>) -> Result<i64, ApiError> {
    match raw {
        None => Ok(DEFAULT_LIMIT),
        Some(s) => s
            .parse()
            .map_err(|_| ApiError::Validation("limit is invalid".to_string())),
    }
}

/// `offset` クエリパラメータを検証する
///
/// この ID より古い質問のみを返すカーソル。未指定なら先頭ページ
/// （`None`）。指定されていれば整数としてパースできること。
pub fn parse_offset(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| ApiError::Validation("offset is invalid".to_string())),
    }
}

/// `uid` パスパラメータを検証する
///
/// 質問 ID は整数であること。
pub fn parse_question_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation("question id should be integer".to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // ===== parse_limit テスト =====

    #[test]
    fn test_parse_limitが未指定でデフォルト10件を返す() {
        assert_eq!(parse_limit(None).unwrap(), 10);
    }

    #[test]
    fn test_parse_limitが整数をパースする() {
        assert_eq!(parse_limit(Some("25")).unwrap(), 25);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("10 ")]
    fn test_parse_limitが非整数を拒否する(#[case] input: &str) {
        let err = parse_limit(Some(input)).unwrap_err();
        assert_eq!(err.to_string(), "limit is invalid");
    }

    // ===== parse_offset テスト =====

    #[test]
    fn test_parse_offsetが未指定で先頭ページを返す() {
        assert_eq!(parse_offset(None).unwrap(), None);
    }

    #[test]
    fn test_parse_offsetが整数をパースする() {
        assert_eq!(parse_offset(Some("100")).unwrap(), Some(100));
    }

    #[rstest]
    #[case("xyz")]
    #[case("--1")]
    fn test_parse_offsetが非整数を拒否する(#[case] input: &str) {
        let err = parse_offset(Some(input)).unwrap_err();
        assert_eq!(err.to_string(), "offset is invalid");
    }

    // ===== parse_question_id テスト =====

    #[test]
    fn test_parse_question_idが整数をパースする() {
        assert_eq!(parse_question_id("42").unwrap(), 42);
    }

    #[rstest]
    #[case("abc")]
    #[case("4.2")]
    #[case("")]
    fn test_parse_question_idが非整数を拒否する(#[case] input: &str) {
        let err = parse_question_id(input).unwrap_err();
        assert_eq!(err.to_string(), "question id should be integer");
    }
}
