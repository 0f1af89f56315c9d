//! エラー型定義
//!
//! どのエラーもワークフロー境界で回復する。インテイク拒否は状態を
//! 変えず、解析失敗はFailedへ遷移するだけで、致命的には伝播しない。

use thiserror::Error;

/// インテイク拒否
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid file type: {declared} (an image/* content type is required)")]
    InvalidType { declared: String },
}

/// 解析失敗
///
/// HTTPステータスコード自体は契約面に含めない。非成功ステータスは
/// Service、それ以外（トランスポート失敗・不正なボディ）はNetwork。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("detection service error: {0}")]
    Service(String),

    #[error("network error: {0}")]
    Network(String),
}
