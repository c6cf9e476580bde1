//! # ビューレンダラー
//!
//! tera テンプレートエンジンで回答フォームと管理画面の HTML を生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに
//!   埋め込まれる。実行時のファイル読み込みはない
//! - テンプレートの構文エラーは起動時（`new()`）に検出される

use serde::Serialize;
use tera::{Context, Tera};
use toibako_domain::question::QAndA;

/// ビューレンダラー
///
/// tera テンプレートエンジンをラップし、[`QAndA`] から HTML を生成する。
pub struct ViewRenderer {
    engine: Tera,
}

/// 管理画面テンプレートに渡す 1 行分のデータ
#[derive(Serialize)]
struct AdminItem<'a> {
    id:       i64,
    question: &'a str,
    answered: bool,
    answer:   Option<&'a str>,
}

impl ViewRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, tera::Error> {
        let mut engine = Tera::default();

        engine.add_raw_templates(vec![
            ("answer.html", include_str!("../templates/answer.html")),
            ("admin.html", include_str!("../templates/admin.html")),
        ])?;

        Ok(Self { engine })
    }

    /// 回答フォームを描画する
    ///
    /// 質問本文と、既に回答済みであれば現在の回答を表示する。
    pub fn render_answer_form(&self, qa: &QAndA) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("id", &qa.id());
        context.insert("question", qa.question().as_str());
        context.insert("answer", &qa.answer().map(|a| a.as_str()));

        self.engine.render("answer.html", &context)
    }

    /// 管理画面を描画する
    ///
    /// ## 引数
    ///
    /// - `all_qa`: 全質問回答セット
    /// - `base_url`: 公開ベース URL。各質問の回答フォームへのリンク生成に使う
    pub fn render_admin(&self, all_qa: &[QAndA], base_url: &str) -> Result<String, tera::Error> {
        let items: Vec<AdminItem<'_>> = all_qa
            .iter()
            .map(|qa| AdminItem {
                id:       qa.id(),
                question: qa.question().as_str(),
                answered: qa.answered(),
                answer:   qa.answer().map(|a| a.as_str()),
            })
            .collect();

        let mut context = Context::new();
        context.insert("items", &items);
        context.insert("base_url", base_url.trim_end_matches('/'));

        self.engine.render("admin.html", &context)
    }
}
