//! # 質問ハンドラ
//!
//! 質問の一覧・取得・投稿エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /questions` - 質問一覧（新しい順、カーソルページネーション）
//! - `GET /qa/{uid}` - 質問回答セットを 1 件取得
//! - `POST /questions` - 質問を投稿

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    client::WebhookClient,
    error::ApiError,
    handler::params::{parse_limit, parse_offset, parse_question_id},
    usecase::QAndAUseCase,
};

/// 質問ハンドラの共有状態
pub struct QuestionState {
    pub usecase: Arc<dyn QAndAUseCase>,
    pub webhook: Arc<dyn WebhookClient>,
}

// --- リクエスト/レスポンス型 ---

/// 質問一覧のクエリパラメータ
///
/// 検証は [`params`](crate::handler::params) の純粋関数で行うため、
/// ここでは生の文字列のまま受け取る。
#[derive(Debug, Deserialize)]
pub struct ListQuestionsQuery {
    limit:  Option<String>,
    offset: Option<String>,
}

/// 質問一覧レスポンス
#[derive(Debug, Serialize)]
pub struct GetQuestionsResponse {
    pub questions: Vec<QuestionDto>,
}

/// 質問 DTO
#[derive(Debug, Serialize)]
pub struct QuestionDto {
    pub id:         i64,
    pub question:   String,
    pub created_at: String,
}

/// 質問回答セット DTO
#[derive(Debug, Serialize)]
pub struct QAndADto {
    pub id:         i64,
    pub question:   String,
    pub answered:   bool,
    pub answer:     Option<String>,
    pub created_at: String,
}

/// 質問投稿リクエスト
#[derive(Debug, Deserialize)]
pub struct AddQuestionRequest {
    pub body: String,
}

/// 質問投稿レスポンス
#[derive(Debug, Serialize)]
pub struct AddQuestionResponse {
    pub question_body: String,
}

// --- ハンドラ ---

/// GET /questions
///
/// 質問一覧を新しい順に 1 ページ取得する。
///
/// ## レスポンス
///
/// - `200 OK`: 質問一覧
/// - `204 No Content`: ページが空の場合
/// - `400 Bad Request`: limit / offset が整数でない
#[tracing::instrument(skip_all)]
pub async fn get_questions(
    State(state): State<Arc<QuestionState>>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Response, ApiError> {
    let limit = parse_limit(query.limit.as_deref())?;
    let before_id = parse_offset(query.offset.as_deref())?;

    let questions = state.usecase.list_questions(before_id, limit).await?;

    if questions.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let items: Vec<QuestionDto> = questions
        .iter()
        .map(|q| QuestionDto {
            id:         q.id(),
            question:   q.question().as_str().to_string(),
            created_at: q.created_at().to_rfc3339(),
        })
        .collect();

    Ok((StatusCode::OK, Json(GetQuestionsResponse { questions: items })).into_response())
}

/// GET /qa/{uid}
///
/// 質問回答セットを 1 件取得する。
///
/// ## レスポンス
///
/// - `200 OK`: 質問回答セット
/// - `400 Bad Request`: uid が整数でない
/// - `404 Not Found`: 質問が存在しない
#[tracing::instrument(skip_all)]
pub async fn get_qa(
    State(state): State<Arc<QuestionState>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_question_id(&uid)?;

    let qa = state.usecase.get_qa(id).await?;

    Ok(Json(QAndADto {
        id:         qa.id(),
        question:   qa.question().as_str().to_string(),
        answered:   qa.answered(),
        answer:     qa.answer().map(|a| a.as_str().to_string()),
        created_at: qa.created_at().to_rfc3339(),
    }))
}

/// POST /questions
///
/// 質問を投稿する。
///
/// 保存に成功したら質問受付フックを起動する。フックはベストエフォートで、
/// 失敗してもログを残すだけで投稿自体は成功（201）として扱う。
///
/// ## レスポンス
///
/// - `201 Created`: 投稿された質問本文のエコー
/// - `400 Bad Request`: Content-Type が JSON でない、ボディ不正、本文が空
#[tracing::instrument(skip_all)]
pub async fn add_question(
    State(state): State<Arc<QuestionState>>,
    payload: Result<Json<AddQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(reject_json)?;

    let qa = state.usecase.submit_question(req.body).await?;

    if let Err(e) = state
        .webhook
        .notify_question_received(qa.question().as_str())
        .await
    {
        tracing::warn!("質問受付の通知に失敗しました: {}", e);
    }

    Ok((
        StatusCode::CREATED,
        Json(AddQuestionResponse {
            question_body: qa.question().as_str().to_string(),
        }),
    ))
}

/// Json 抽出の失敗を 400 に変換する
fn reject_json(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::Validation("invalid Content-type".to_string())
        }
        _ => ApiError::Validation("invalid request".to_string()),
    }
}
