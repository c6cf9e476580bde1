//! # 外部フッククライアント
//!
//! サードパーティの自動化エンドポイントへの送信を担当する。
//!
//! ## 設計方針
//!
//! - トレイトで操作を定義し、テスト時にスタブへ差し替え可能にする
//! - リトライはしない。失敗の扱い（握りつぶすか 500 にするか）は
//!   呼び出し側が決める

pub mod webhook;

pub use webhook::{HttpWebhookClient, WebhookClient, WebhookError};
