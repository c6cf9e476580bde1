//! # Toibako API サーバー
//!
//! 質問箱の受付・回答・公開を担当する API サーバー。
//!
//! ## 役割
//!
//! - **質問の受付**: 訪問者がフォームから質問を投稿する
//! - **回答**: 管理者が管理画面から質問に回答する
//! - **公開 API**: 回答済みの質問回答セットを JSON で公開する
//! - **外部フック**: 質問受付の通知と、回答公開時のサイト再ビルド起動
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SERVER_BASE_URL` | **Yes** | 公開ベース URL（管理画面のリンク生成用） |
//! | `NOTIFY_HOOK_URL` | No | 質問受付通知フックのベース URL |
//! | `NOTIFY_HOOK_KEY` | **Yes** | 質問受付通知フックのトリガーキー |
//! | `REBUILD_HOOK_URL` | **Yes** | サイト再ビルドフックの URL |
//! | `LOG_FORMAT` | No | ログ出力形式（`json` / `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p toibako-api
//!
//! # 本番環境
//! API_PORT=3000 DATABASE_URL=postgres://... cargo run -p toibako-api --release
//! ```

mod client;
mod config;
mod error;
mod handler;
mod usecase;
mod view;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use client::{HttpWebhookClient, WebhookClient};
use config::ApiConfig;
use handler::{
    AdminState,
    AnswerState,
    QuestionState,
    add_answer,
    add_question,
    admin_page,
    get_answer_form,
    get_qa,
    get_questions,
    health_check,
};
use toibako_infra::{
    db,
    repository::{PostgresQAndARepository, QAndARepository},
};
use toibako_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use usecase::{QAndAUseCase, QAndAUseCaseImpl};
use view::ViewRenderer;

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("api");
    init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let renderer = Arc::new(ViewRenderer::new().expect("テンプレートの初期化に失敗しました"));
    let repository: Arc<dyn QAndARepository> = Arc::new(PostgresQAndARepository::new(pool));
    let usecase: Arc<dyn QAndAUseCase> = Arc::new(QAndAUseCaseImpl::new(repository));
    let webhook: Arc<dyn WebhookClient> = Arc::new(HttpWebhookClient::new(&config.webhook));

    let question_state = Arc::new(QuestionState {
        usecase: usecase.clone(),
        webhook: webhook.clone(),
    });
    let answer_state = Arc::new(AnswerState {
        usecase:  usecase.clone(),
        webhook,
        renderer: renderer.clone(),
    });
    let admin_state = Arc::new(AdminState {
        usecase,
        renderer,
        server_base_url: config.server_base_url.clone(),
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/questions", get(get_questions).post(add_question))
                .route("/qa/{uid}", get(get_qa))
                .with_state(question_state),
        )
        .merge(
            Router::new()
                .route("/answer/{uid}", get(get_answer_form).post(add_answer))
                .with_state(answer_state),
        )
        .merge(
            Router::new()
                .route("/admin", get(admin_page))
                .with_state(admin_state),
        )
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
