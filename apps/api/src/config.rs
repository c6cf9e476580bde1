//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! グローバル変数は使わず、起動時に一度だけ読み込んだ設定を
//! 明示的にハンドラの状態へ注入する。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 公開ベース URL（管理画面が回答フォームへのリンク生成に使う）
    pub server_base_url: String,
    /// 外部フック設定
    pub webhook: WebhookConfig,
}

/// 外部フックの設定
///
/// どちらのフックも不透明な外部コラボレータとして扱う。
/// URL とキーを持つだけで、呼び出し先の仕様には関知しない。
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 質問受付通知フックのベース URL
    pub notify_hook_url:  String,
    /// 質問受付通知フックのトリガーキー
    pub notify_hook_key:  String,
    /// サイト再ビルドフックの URL
    pub rebuild_hook_url: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .expect("API_PORT が設定されていません")
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
            server_base_url: env::var("SERVER_BASE_URL")
                .expect("SERVER_BASE_URL が設定されていません"),
            webhook: WebhookConfig::from_env(),
        })
    }
}

impl WebhookConfig {
    /// 環境変数から外部フック設定を読み込む
    fn from_env() -> Self {
        Self {
            notify_hook_url:  env::var("NOTIFY_HOOK_URL")
                .unwrap_or_else(|_| "https://maker.ifttt.com".to_string()),
            notify_hook_key:  env::var("NOTIFY_HOOK_KEY")
                .expect("NOTIFY_HOOK_KEY が設定されていません"),
            rebuild_hook_url: env::var("REBUILD_HOOK_URL")
                .expect("REBUILD_HOOK_URL が設定されていません"),
        }
    }
}
