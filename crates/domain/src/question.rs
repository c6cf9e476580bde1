//! # 質問・回答
//!
//! 質問箱の中核となるドメインモデル。
//!
//! ## ライフサイクル
//!
//! 質問は投稿時に作成され、以後本文は不変。管理者が回答を付けた時点で
//! 一度だけ「回答済み」に遷移する。削除・更新・バージョニングは存在しない。
//!
//! ## 不変条件
//!
//! 質問回答セット（[`QAndA`]）は次のどちらかの状態のみを取る:
//!
//! - 未回答: `answered == false` かつ `answer == None`
//! - 回答済み: `answered == true` かつ `answer == Some(_)`
//!
//! 中間状態は存在しない。[`QAndA::from_parts`] がこの不変条件を検証する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 本文の最大文字数（DB カラムは TEXT、アプリ側で制限する）
const MAX_BODY_LENGTH: usize = 10_000;

// =========================================================================
// QuestionBody（質問本文）
// =========================================================================

/// 質問本文（値オブジェクト）
///
/// 前後の空白を除去した上で 1〜10,000 文字。
///
/// # 不変条件
///
/// - 空文字列ではない
/// - 最大 10,000 文字
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBody(String);

impl QuestionBody {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("question is required".to_string()));
        }

        if value.chars().count() > MAX_BODY_LENGTH {
            return Err(DomainError::Validation("question is too long".to_string()));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for QuestionBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// AnswerBody（回答本文）
// =========================================================================

/// 回答本文（値オブジェクト）
///
/// 制約は [`QuestionBody`] と同じ。エラーメッセージのみ異なる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBody(String);

impl AnswerBody {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("answer is required".to_string()));
        }

        if value.chars().count() > MAX_BODY_LENGTH {
            return Err(DomainError::Validation("answer is too long".to_string()));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnswerBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// Question（質問エンティティ）
// =========================================================================

/// 質問エンティティ
///
/// 質問一覧 API が返す最小形。回答の有無は含まない。
/// ID は DB の BIGSERIAL が採番する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id:         i64,
    question:   QuestionBody,
    created_at: DateTime<Utc>,
}

impl Question {
    /// データベースの行から質問を復元する
    pub fn from_db(id: i64, question: QuestionBody, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            question,
            created_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn question(&self) -> &QuestionBody {
        &self.question
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =========================================================================
// QAndA（質問回答セット）
// =========================================================================

/// 質問回答セット
///
/// [`Question`] の上位集合。回答済みフラグと（任意の）回答本文を持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QAndA {
    id:         i64,
    question:   QuestionBody,
    answered:   bool,
    answer:     Option<AnswerBody>,
    created_at: DateTime<Utc>,
}

impl QAndA {
    /// 各フィールドから質問回答セットを組み立てる
    ///
    /// `answered` フラグと `answer` の有無が一致しない場合はエラーを返す。
    /// DB には CHECK 制約があるため通常は到達しないが、復元経路でも
    /// 不変条件を二重に検証する。
    pub fn from_parts(
        id: i64,
        question: QuestionBody,
        answered: bool,
        answer: Option<AnswerBody>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if answered != answer.is_some() {
            return Err(DomainError::Validation(
                "answered flag does not match answer presence".to_string(),
            ));
        }

        Ok(Self {
            id,
            question,
            answered,
            answer,
            created_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn question(&self) -> &QuestionBody {
        &self.question
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn answer(&self) -> Option<&AnswerBody> {
        self.answer.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
