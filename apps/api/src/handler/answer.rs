//! # 回答ハンドラ
//!
//! 管理者が質問に回答するためのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /answer/{uid}` - 回答フォーム（HTML）
//! - `POST /answer/{uid}` - 回答を投稿
//!
//! HTML を返すルートでも、エラー時は JSON `{"msg": string}` を返す。

use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    client::WebhookClient,
    error::ApiError,
    handler::params::parse_question_id,
    usecase::QAndAUseCase,
    view::ViewRenderer,
};

/// 回答ハンドラの共有状態
pub struct AnswerState {
    pub usecase:  Arc<dyn QAndAUseCase>,
    pub webhook:  Arc<dyn WebhookClient>,
    pub renderer: Arc<ViewRenderer>,
}

/// 回答投稿フォーム
#[derive(Debug, Deserialize)]
pub struct AddAnswerForm {
    pub body: String,
}

// --- ハンドラ ---

/// GET /answer/{uid}
///
/// 質問に回答するためのフォームを返す。
///
/// ## レスポンス
///
/// - `200 OK`: 質問と現在の回答を含む HTML
/// - `400 Bad Request`: uid が整数でない
/// - `404 Not Found`: 質問が存在しない
#[tracing::instrument(skip_all)]
pub async fn get_answer_form(
    State(state): State<Arc<AnswerState>>,
    Path(uid): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_question_id(&uid)?;

    let qa = state.usecase.get_qa(id).await?;

    let html = state
        .renderer
        .render_answer_form(&qa)
        .map_err(|e| ApiError::Template(e.to_string()))?;

    Ok(Html(html))
}

/// POST /answer/{uid}
///
/// 質問に回答する。保存に成功したらサイト再ビルドフックを同期的に
/// 起動する。再ビルドの失敗はこのリクエストの失敗（500）になる。
///
/// ## レスポンス
///
/// - `301 Moved Permanently`: 同じ URI へのリダイレクト
/// - `400 Bad Request`: Content-Type がフォームでない、ボディ不正、uid 不正
/// - `404 Not Found`: 質問が存在しない
/// - `500 Internal Server Error`: ストレージエラー、再ビルドフックの失敗
#[tracing::instrument(skip_all)]
pub async fn add_answer(
    State(state): State<Arc<AnswerState>>,
    Path(uid): Path<String>,
    uri: Uri,
    payload: Result<Form<AddAnswerForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = payload.map_err(reject_form)?;
    let id = parse_question_id(&uid)?;

    state.usecase.submit_answer(id, form.body).await?;

    state
        .webhook
        .trigger_rebuild()
        .await
        .map_err(ApiError::Rebuild)?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, uri.to_string())],
    )
        .into_response())
}

/// Form 抽出の失敗を 400 に変換する
fn reject_form(rejection: FormRejection) -> ApiError {
    match rejection {
        FormRejection::InvalidFormContentType(_) => {
            ApiError::Validation("invalid Content-type".to_string())
        }
        _ => ApiError::Validation("invalid request".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use toibako_domain::question::{AnswerBody, QAndA, Question, QuestionBody};
    use tower::ServiceExt;

    use super::*;
    use crate::client::WebhookError;

    // テスト用スタブ

    struct StubQAndAUseCase {
        qa: Option<QAndA>,
    }

    #[async_trait]
    impl QAndAUseCase for StubQAndAUseCase {
        async fn submit_question(&self, _body: String) -> Result<QAndA, ApiError> {
            todo!()
        }

        async fn get_qa(&self, _id: i64) -> Result<QAndA, ApiError> {
            self.qa
                .clone()
                .ok_or_else(|| ApiError::NotFound("question not found".to_string()))
        }

        async fn list_questions(
            &self,
            _before_id: Option<i64>,
            _limit: i64,
        ) -> Result<Vec<Question>, ApiError> {
            todo!()
        }

        async fn list_all_qa(&self) -> Result<Vec<QAndA>, ApiError> {
            todo!()
        }

        async fn submit_answer(&self, _id: i64, body: String) -> Result<(), ApiError> {
            AnswerBody::new(body)?;
            if self.qa.is_none() {
                return Err(ApiError::NotFound("question not found".to_string()));
            }
            Ok(())
        }
    }

    /// 再ビルドの起動回数を記録するスタブ
    struct StubWebhookClient {
        fail_rebuild: bool,
        rebuilds:     AtomicUsize,
    }

    impl StubWebhookClient {
        fn ok() -> Self {
            Self {
                fail_rebuild: false,
                rebuilds:     AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail_rebuild: true,
                rebuilds:     AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WebhookClient for StubWebhookClient {
        async fn notify_question_received(&self, _question_body: &str) -> Result<(), WebhookError> {
            todo!()
        }

        async fn trigger_rebuild(&self) -> Result<(), WebhookError> {
            if self.fail_rebuild {
                return Err(WebhookError::Status(502));
            }
            self.rebuilds.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn unanswered(id: i64, question: &str) -> QAndA {
        QAndA::from_parts(
            id,
            QuestionBody::new(question).unwrap(),
            false,
            None,
            chrono::Utc::now(),
        )
        .unwrap()
    }

    fn create_test_app(qa: Option<QAndA>, webhook: Arc<StubWebhookClient>) -> Router {
        let state = Arc::new(AnswerState {
            usecase:  Arc::new(StubQAndAUseCase { qa }),
            webhook,
            renderer: Arc::new(ViewRenderer::new().unwrap()),
        });

        Router::new()
            .route("/answer/{uid}", get(get_answer_form).post(add_answer))
            .with_state(state)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    // ===== GET /answer/{uid} テスト =====

    #[tokio::test]
    async fn test_get_answer_form_質問を含むhtmlを返す() {
        // Given
        let sut = create_test_app(
            Some(unanswered(3, "好きな食べ物は？")),
            Arc::new(StubWebhookClient::ok()),
        );

        let request = Request::builder()
            .method(Method::GET)
            .uri("/answer/3")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("好きな食べ物は？"));
    }

    #[tokio::test]
    async fn test_get_answer_form_非整数のidで400を返す() {
        // Given
        let sut = create_test_app(None, Arc::new(StubWebhookClient::ok()));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/answer/abc")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "msg": "question id should be integer" })
        );
    }

    #[tokio::test]
    async fn test_get_answer_form_存在しないidで404を返す() {
        // Given
        let sut = create_test_app(None, Arc::new(StubWebhookClient::ok()));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/answer/999999")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "msg": "question not found" })
        );
    }

    // ===== POST /answer/{uid} テスト =====

    #[tokio::test]
    async fn test_add_answer_成功で同じuriへ301リダイレクトする() {
        // Given
        let webhook = Arc::new(StubWebhookClient::ok());
        let sut = create_test_app(Some(unanswered(1, "好きな色は？")), webhook.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/answer/1")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("body=blue"))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/answer/1");
        assert_eq!(webhook.rebuilds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_add_answer_空の本文で400を返し再ビルドされない() {
        // Given
        let webhook = Arc::new(StubWebhookClient::ok());
        let sut = create_test_app(Some(unanswered(1, "好きな色は？")), webhook.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/answer/1")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("body="))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "msg": "answer is required" })
        );
        assert_eq!(webhook.rebuilds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_add_answer_フォームでないcontent_typeで400を返す() {
        // Given
        let sut = create_test_app(
            Some(unanswered(1, "好きな色は？")),
            Arc::new(StubWebhookClient::ok()),
        );

        let request = Request::builder()
            .method(Method::POST)
            .uri("/answer/1")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"body": "blue"}"#))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "msg": "invalid Content-type" })
        );
    }

    #[tokio::test]
    async fn test_add_answer_非整数のidで400を返す() {
        // Given
        let sut = create_test_app(
            Some(unanswered(1, "好きな色は？")),
            Arc::new(StubWebhookClient::ok()),
        );

        let request = Request::builder()
            .method(Method::POST)
            .uri("/answer/abc")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("body=blue"))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "msg": "question id should be integer" })
        );
    }

    #[tokio::test]
    async fn test_add_answer_存在しないidで404を返す() {
        // Given
        let sut = create_test_app(None, Arc::new(StubWebhookClient::ok()));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/answer/999999")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("body=blue"))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "msg": "question not found" })
        );
    }

    #[tokio::test]
    async fn test_add_answer_再ビルド失敗で500を返す() {
        // Given
        let sut = create_test_app(
            Some(unanswered(1, "好きな色は？")),
            Arc::new(StubWebhookClient::failing()),
        );

        let request = Request::builder()
            .method(Method::POST)
            .uri("/answer/1")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("body=blue"))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "msg": "fail to build site" })
        );
    }
}
