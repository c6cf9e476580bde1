//! # QAndARepository
//!
//! 質問回答セットの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **1 文 1 トランザクション**: すべての書き込みは単一文の自動コミット。
//!   複数文にまたがるトランザクションは存在しない
//! - **不在は `Ok(None)` / 影響行数で表現**: 行が見つからないことは
//!   ストレージ層のエラーではない。NotFound への変換は呼び出し側の責務
//! - **実行時バインドのクエリ**: `sqlx::query_as` + `FromRow`。
//!   ビルドにデータベース接続を要求しない

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use toibako_domain::question::{AnswerBody, QAndA, Question, QuestionBody};

use crate::error::InfraError;

/// 質問回答リポジトリトレイト
///
/// 質問の作成・取得・一覧と回答の保存を定義する。
#[async_trait]
pub trait QAndARepository: Send + Sync {
    /// 質問を新規作成する
    ///
    /// ID と作成日時は DB が採番・付与し、作成された行を返す。
    async fn create_question(&self, body: &QuestionBody) -> Result<QAndA, InfraError>;

    /// ID で質問回答セットを 1 件取得する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(qa))`: 見つかった場合
    /// - `Ok(None)`: 見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_qa(&self, id: i64) -> Result<Option<QAndA>, InfraError>;

    /// 質問の一覧を新しい順に 1 ページ取得する
    ///
    /// # 引数
    ///
    /// - `before_id`: この ID より小さい（古い）質問のみを返すカーソル。
    ///   `None` なら先頭ページ（最新から）
    /// - `limit`: 取得件数の上限。サーバー側の上限は設けない
    async fn list_questions(
        &self,
        before_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Question>, InfraError>;

    /// すべての質問回答セットを ID 順に取得する
    async fn list_all_qa(&self) -> Result<Vec<QAndA>, InfraError>;

    /// 回答を保存し、回答済みフラグを立てる
    ///
    /// 一致する行がない UPDATE はストレージ層ではエラーにならないため、
    /// 影響行数を返して呼び出し側に判定させる。
    async fn save_answer(&self, body: &AnswerBody, id: i64) -> Result<u64, InfraError>;
}

/// DB の qandas テーブルの行を表す中間構造体
///
/// `TryFrom` で [`QAndA`] への変換ロジックを一箇所に集約する。
#[derive(Debug, sqlx::FromRow)]
struct QAndARow {
    id:         i64,
    question:   String,
    answered:   bool,
    answer:     Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<QAndARow> for QAndA {
    type Error = InfraError;

    fn try_from(row: QAndARow) -> Result<Self, Self::Error> {
        let question =
            QuestionBody::new(row.question).map_err(|e| InfraError::unexpected(e.to_string()))?;
        let answer = row
            .answer
            .map(AnswerBody::new)
            .transpose()
            .map_err(|e| InfraError::unexpected(e.to_string()))?;

        QAndA::from_parts(row.id, question, row.answered, answer, row.created_at)
            .map_err(|e| InfraError::unexpected(e.to_string()))
    }
}

/// 質問一覧クエリの行を表す中間構造体
#[derive(Debug, sqlx::FromRow)]
struct QuestionRow {
    id:         i64,
    question:   String,
    created_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = InfraError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let question =
            QuestionBody::new(row.question).map_err(|e| InfraError::unexpected(e.to_string()))?;
        Ok(Question::from_db(row.id, question, row.created_at))
    }
}

/// PostgreSQL 実装の QAndARepository
#[derive(Debug, Clone)]
pub struct PostgresQAndARepository {
    pool: PgPool,
}

impl PostgresQAndARepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QAndARepository for PostgresQAndARepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create_question(&self, body: &QuestionBody) -> Result<QAndA, InfraError> {
        let row = sqlx::query_as::<_, QAndARow>(
            r#"
            INSERT INTO qandas (question)
            VALUES ($1)
            RETURNING id, question, answered, answer, created_at
            "#,
        )
        .bind(body.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_qa(&self, id: i64) -> Result<Option<QAndA>, InfraError> {
        let row = sqlx::query_as::<_, QAndARow>(
            r#"
            SELECT id, question, answered, answer, created_at
            FROM qandas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(QAndA::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(?before_id, limit))]
    async fn list_questions(
        &self,
        before_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Question>, InfraError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, question, created_at
            FROM qandas
            WHERE ($1::BIGINT IS NULL OR id < $1)
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(before_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Question::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn list_all_qa(&self) -> Result<Vec<QAndA>, InfraError> {
        let rows = sqlx::query_as::<_, QAndARow>(
            r#"
            SELECT id, question, answered, answer, created_at
            FROM qandas
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QAndA::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn save_answer(&self, body: &AnswerBody, id: i64) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE qandas
            SET answer = $1, answered = TRUE
            WHERE id = $2
            "#,
        )
        .bind(body.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
