//! # 管理画面ハンドラ
//!
//! 全質問回答セットを一覧する管理者向けページを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /admin` - 管理画面（HTML）

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{error::ApiError, usecase::QAndAUseCase, view::ViewRenderer};

/// 管理画面ハンドラの共有状態
pub struct AdminState {
    pub usecase:         Arc<dyn QAndAUseCase>,
    pub renderer:        Arc<ViewRenderer>,
    /// 公開ベース URL。回答フォームへのリンク生成に使う
    pub server_base_url: String,
}

/// GET /admin
///
/// 全質問回答セットの一覧を HTML で返す。
///
/// ## レスポンス
///
/// - `200 OK`: 質問一覧の HTML
/// - `500 Internal Server Error`: ストレージエラー、テンプレートエラー
#[tracing::instrument(skip_all)]
pub async fn admin_page(State(state): State<Arc<AdminState>>) -> Result<Html<String>, ApiError> {
    let all_qa = state.usecase.list_all_qa().await?;

    let html = state
        .renderer
        .render_admin(&all_qa, &state.server_base_url)
        .map_err(|e| ApiError::Template(e.to_string()))?;

    Ok(Html(html))
}
