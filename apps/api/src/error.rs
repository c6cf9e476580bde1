//! # API エラー定義
//!
//! API で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! すべてのエラーはハンドラ境界で `{"msg": string}` の JSON ボディに
//! 変換されて終端する。HTTP レスポンスより先へ伝播するエラーはない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use toibako_domain::DomainError;
use toibako_infra::InfraError;
use toibako_shared::ErrorResponse;

use crate::client::WebhookError;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値の検証失敗
    ///
    /// メッセージはそのままレスポンスボディに載る。
    #[error("{0}")]
    Validation(String),

    /// リソースが見つからない
    #[error("{0}")]
    NotFound(String),

    /// ストレージエラー
    #[error("データベースエラー: {0}")]
    Storage(#[from] InfraError),

    /// サイト再ビルドフックの失敗
    ///
    /// 回答投稿経路でのみ発生し、クライアントに 500 として返す。
    /// 質問受付通知フックの失敗はここに来ない（ログのみで握りつぶす）。
    #[error("サイト再ビルドの起動に失敗しました: {0}")]
    Rebuild(#[source] WebhookError),

    /// テンプレート描画エラー
    #[error("テンプレートの描画に失敗しました: {0}")]
    Template(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{entity_type} not found"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Storage(e) => {
                tracing::error!("データベースエラー: {}\n{}", e, e.span_trace());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::Rebuild(e) => {
                tracing::error!("サイト再ビルドの起動に失敗しました: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "fail to build site".to_string(),
                )
            }
            ApiError::Template(msg) => {
                tracing::error!("テンプレートの描画に失敗しました: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}
