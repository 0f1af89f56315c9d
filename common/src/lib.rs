//! Evidence AI Common Library
//!
//! アップロード・解析・オーバーレイ描画ワークフローのコア。
//! CLIフロントエンドと共有される: インテイク検証、セッション状態機械、
//! 検出レスポンスの正規化、オーバーレイ描画データの生成

pub mod error;
pub mod intake;
pub mod overlay;
pub mod parser;
pub mod types;
pub mod workflow;

pub use error::{AnalysisError, ValidationError};
pub use intake::{ImageCandidate, PreviewEncoder};
pub use overlay::{confidence_percent, render, summarize, AnalysisSummary, OverlayBox};
pub use parser::{mean_confidence, parse_detect_response};
pub use types::{AnalysisRequest, AnalysisResult, Detection, Region, SelectedImage};
pub use workflow::{
    AnalysisTicket, AnalyzeOutcome, DetectionBackend, Notice, NoticeKind, Notifier,
    UploadWorkflow, WorkflowState,
};
