//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、バリデーションとストレージ呼び出しは
//!   usecase 層に委譲
//! - パラメータの抽出・検証はルーターに依存しない純粋関数（[`params`]）
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `question`: 質問の一覧・取得・投稿
//! - `answer`: 回答フォームの表示・回答の投稿
//! - `admin`: 管理画面

pub mod admin;
pub mod answer;
pub mod health;
pub mod params;
pub mod question;

pub use admin::{AdminState, admin_page};
pub use answer::{AnswerState, add_answer, get_answer_form};
pub use health::health_check;
pub use question::{QuestionState, add_question, get_qa, get_questions};
