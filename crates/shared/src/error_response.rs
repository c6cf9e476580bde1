//! # エラーレスポンス
//!
//! API 全体で共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - すべてのエラーボディは `{"msg": string}` の一形式のみ。HTML を返す
//!   ルートでもエラー時はこの JSON を返す

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// ステータスコードが何であれ、エラーボディはこの形に統一する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl ErrorResponse {
    /// 新しいエラーレスポンスを作成する
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
