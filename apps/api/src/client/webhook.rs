//! # 外部フッククライアント実装
//!
//! 2 種類の外部フックを呼び出す:
//!
//! - **質問受付通知**: 質問が投稿されたことを自動化サービスへ通知する。
//!   ベストエフォートで、失敗は呼び出し側がログに残すのみ
//! - **サイト再ビルド**: 回答が公開されたので静的サイトの再ビルドを
//!   起動する。回答投稿リクエストの成否に直結する

use async_trait::async_trait;
use thiserror::Error;

use crate::config::WebhookConfig;

/// 外部フック呼び出しのエラー
#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    /// ネットワークエラー（接続失敗、タイムアウトなど）
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// フックが失敗ステータスを返した
    #[error("フックがステータス {0} を返しました")]
    Status(u16),
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => WebhookError::Status(status.as_u16()),
            None => WebhookError::Network(err.to_string()),
        }
    }
}

/// 外部フッククライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// 質問受付を通知する
    ///
    /// `{notify_hook_url}/trigger/question_received/with/key/{key}` へ
    /// JSON `{"value1": <質問本文>}` を POST する。
    async fn notify_question_received(&self, question_body: &str) -> Result<(), WebhookError>;

    /// サイト再ビルドを起動する
    ///
    /// 設定されたビルドフック URL へ空のフォームを POST する。
    async fn trigger_rebuild(&self) -> Result<(), WebhookError>;
}

/// reqwest による WebhookClient 実装
#[derive(Clone)]
pub struct HttpWebhookClient {
    http:             reqwest::Client,
    notify_hook_url:  String,
    notify_hook_key:  String,
    rebuild_hook_url: String,
}

impl HttpWebhookClient {
    /// 新しいクライアントを作成する
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            http:             reqwest::Client::new(),
            notify_hook_url:  config.notify_hook_url.trim_end_matches('/').to_string(),
            notify_hook_key:  config.notify_hook_key.clone(),
            rebuild_hook_url: config.rebuild_hook_url.clone(),
        }
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    #[tracing::instrument(skip_all)]
    async fn notify_question_received(&self, question_body: &str) -> Result<(), WebhookError> {
        let url = format!(
            "{}/trigger/question_received/with/key/{}",
            self.notify_hook_url, self.notify_hook_key
        );

        self.http
            .post(&url)
            .json(&serde_json::json!({ "value1": question_body }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn trigger_rebuild(&self) -> Result<(), WebhookError> {
        self.http
            .post(&self.rebuild_hook_url)
            .form(&[] as &[(&str, &str)])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_newがベースurl末尾のスラッシュを除去する() {
        let sut = HttpWebhookClient::new(&WebhookConfig {
            notify_hook_url:  "https://hooks.example.com/".to_string(),
            notify_hook_key:  "secret-key".to_string(),
            rebuild_hook_url: "https://build.example.com/hook".to_string(),
        });

        assert_eq!(sut.notify_hook_url, "https://hooks.example.com");
    }
}
