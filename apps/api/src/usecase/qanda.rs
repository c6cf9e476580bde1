//! 質問箱ユースケースの実装

use std::sync::Arc;

use toibako_domain::{
    DomainError,
    question::{AnswerBody, QAndA, Question, QuestionBody},
};
use toibako_infra::repository::QAndARepository;

use crate::error::ApiError;

/// 質問箱ユースケース
pub struct QAndAUseCaseImpl {
    repository: Arc<dyn QAndARepository>,
}

impl QAndAUseCaseImpl {
    pub fn new(repository: Arc<dyn QAndARepository>) -> Self {
        Self { repository }
    }

    /// 質問を投稿する
    ///
    /// 1. QuestionBody バリデーション（失敗したらストレージに触れない）
    /// 2. INSERT して採番済みの質問回答セットを返す
    pub async fn submit_question(&self, body: String) -> Result<QAndA, ApiError> {
        let body = QuestionBody::new(body)?;
        let qa = self.repository.create_question(&body).await?;
        Ok(qa)
    }

    /// 質問回答セットを 1 件取得する
    pub async fn get_qa(&self, id: i64) -> Result<QAndA, ApiError> {
        let qa = self.repository.find_qa(id).await?.ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "question",
                id:          id.to_string(),
            }
        })?;
        Ok(qa)
    }

    /// 質問の一覧を新しい順に 1 ページ取得する
    pub async fn list_questions(
        &self,
        before_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Question>, ApiError> {
        let questions = self.repository.list_questions(before_id, limit).await?;
        Ok(questions)
    }

    /// すべての質問回答セットを取得する
    pub async fn list_all_qa(&self) -> Result<Vec<QAndA>, ApiError> {
        let all_qa = self.repository.list_all_qa().await?;
        Ok(all_qa)
    }

    /// 質問に回答する
    ///
    /// UPDATE の影響行数が 0 の場合、対象の質問が存在しないので
    /// NotFound を返す。ストレージ層は不在をエラーにしないため、
    /// ここで明示的に判定する。
    pub async fn submit_answer(&self, id: i64, body: String) -> Result<(), ApiError> {
        let body = AnswerBody::new(body)?;
        let affected = self.repository.save_answer(&body, id).await?;

        if affected == 0 {
            return Err(DomainError::NotFound {
                entity_type: "question",
                id:          id.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
