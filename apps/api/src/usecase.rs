//! # ユースケース層
//!
//! 質問箱のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリを外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、バリデーションと
//!   ストレージ呼び出しはユースケースに集約

pub mod qanda;

use async_trait::async_trait;
pub use qanda::QAndAUseCaseImpl;
use toibako_domain::question::{QAndA, Question};

use crate::error::ApiError;

/// 質問箱ユースケーストレイト
///
/// API のビジネスロジックを定義する。
/// 具体的な実装は `QAndAUseCaseImpl` で提供される。
#[async_trait]
pub trait QAndAUseCase: Send + Sync {
    /// 質問を投稿する
    ///
    /// 本文を検証してから保存する。検証に失敗した場合、
    /// ストレージには一切アクセスしない。
    async fn submit_question(&self, body: String) -> Result<QAndA, ApiError>;

    /// 質問回答セットを 1 件取得する
    ///
    /// 存在しない ID は `ApiError::NotFound` になる。
    async fn get_qa(&self, id: i64) -> Result<QAndA, ApiError>;

    /// 質問の一覧を新しい順に 1 ページ取得する
    ///
    /// ## 引数
    ///
    /// - `before_id`: この ID より古い質問のみを返すカーソル（`None` で先頭ページ）
    /// - `limit`: 取得件数の上限
    async fn list_questions(
        &self,
        before_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Question>, ApiError>;

    /// すべての質問回答セットを取得する（管理画面用）
    async fn list_all_qa(&self) -> Result<Vec<QAndA>, ApiError>;

    /// 質問に回答する
    ///
    /// 本文を検証してから保存する。対象の質問が存在しない場合は
    /// `ApiError::NotFound` になる。
    async fn submit_answer(&self, id: i64, body: String) -> Result<(), ApiError>;
}

/// QAndAUseCaseImpl に QAndAUseCase トレイトを実装
#[async_trait]
impl QAndAUseCase for QAndAUseCaseImpl {
    async fn submit_question(&self, body: String) -> Result<QAndA, ApiError> {
        self.submit_question(body).await
    }

    async fn get_qa(&self, id: i64) -> Result<QAndA, ApiError> {
        self.get_qa(id).await
    }

    async fn list_questions(
        &self,
        before_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Question>, ApiError> {
        self.list_questions(before_id, limit).await
    }

    async fn list_all_qa(&self) -> Result<Vec<QAndA>, ApiError> {
        self.list_all_qa().await
    }

    async fn submit_answer(&self, id: i64, body: String) -> Result<(), ApiError> {
        self.submit_answer(id, body).await
    }
}
