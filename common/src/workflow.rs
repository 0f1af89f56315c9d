//! アップロード・解析・描画ワークフロー
//!
//! `UploadWorkflow` 1つがユーザー向けセッション1つ。`SelectedImage` を
//! 最大1枚、`AnalysisResult` を最大1件保持し、次の状態機械を駆動する:
//!
//! ```text
//! Idle --select--> Loaded --analyze--> Analyzing --success--> Complete
//!                                      Analyzing --failure--> Failed
//! ```
//!
//! `clear` はどの状態からもIdleへ、`select` はどの状態からもLoadedへ
//! 戻す。終端状態はなく、セッションは何度でも再入可能。
//!
//! 遷移は呼び出し側の単一アクター上で直列化される。ワークフロー自体は
//! I/Oをしない。プレビューエンコード・検出呼び出し・通知はすべて注入
//! されたケーパビリティ経由。非同期の `analyze` が唯一のサスペンション
//! ポイントで、飛行中に他の入力を割り込ませる呼び出し側は
//! `begin_analysis`/`apply_response` のペアを使う。選択が先へ進んだ後に
//! 届いたレスポンスは適用されず破棄される。

use crate::error::{AnalysisError, ValidationError};
use crate::intake::{self, ImageCandidate, PreviewEncoder};
use crate::types::{AnalysisRequest, AnalysisResult, SelectedImage};

/// ワークフロー状態の判別子（検査・アサーション用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Loaded,
    Analyzing,
    Complete,
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Loaded => "loaded",
            WorkflowState::Analyzing => "analyzing",
            WorkflowState::Complete => "complete",
            WorkflowState::Failed => "failed",
        }
    }
}

/// ユーザー向け通知。fire-and-forgetでデータ契約には含まれない
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub detail: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl Notice {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { title: title.into(), detail: detail.into(), kind: NoticeKind::Success }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { title: title.into(), detail: detail.into(), kind: NoticeKind::Error }
    }
}

/// 通知の出力先（Webならトースト、CLIならコンソール行）
///
/// 遷移ロジックをUIハーネスなしでテストできるよう注入する。
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// リクエストから検出結果を得る戦略
///
/// ライブHTTPクライアントと合成オフラインバックエンドが実装する。
/// どちらを使うかは統合境界で明示的に選ぶ。失敗したライブ呼び出しの
/// 代わりに合成結果を黙って返すことはしない。
#[allow(async_fn_in_trait)]
pub trait DetectionBackend {
    async fn detect(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

// データ付きのセッション状態。`WorkflowState` はこの判別子。
// 画像と結果をバリアント内に持たせることで「結果はCompleteのときに
// 限り存在する」を構造で保証する。
enum Stage {
    Idle,
    Loaded { image: SelectedImage },
    Analyzing { image: SelectedImage },
    Complete { image: SelectedImage, result: AnalysisResult },
    Failed { image: SelectedImage },
}

/// 飛行中の解析1回分のチケット
///
/// 送信するリクエストと、それを生んだ選択世代のペア。
#[derive(Debug)]
pub struct AnalysisTicket {
    pub request: AnalysisRequest,
    generation: u64,
}

/// 解析試行の結果
#[derive(Debug)]
pub enum AnalyzeOutcome {
    /// 解析が解決し、セッションはComplete
    Completed,
    /// 解析が失敗。セッションはFailedで、リトライ可能
    Failed(AnalysisError),
    /// 何も送信・適用されなかった: 画像なし、解析が既に飛行中、
    /// または選択が先へ進んだ後の古いレスポンス
    Skipped,
}

pub struct UploadWorkflow<E, N> {
    stage: Stage,
    generation: u64,
    encoder: E,
    notifier: N,
}

impl<E: PreviewEncoder, N: Notifier> UploadWorkflow<E, N> {
    pub fn new(encoder: E, notifier: N) -> Self {
        Self { stage: Stage::Idle, generation: 0, encoder, notifier }
    }

    pub fn state(&self) -> WorkflowState {
        match &self.stage {
            Stage::Idle => WorkflowState::Idle,
            Stage::Loaded { .. } => WorkflowState::Loaded,
            Stage::Analyzing { .. } => WorkflowState::Analyzing,
            Stage::Complete { .. } => WorkflowState::Complete,
            Stage::Failed { .. } => WorkflowState::Failed,
        }
    }

    /// 現在の選択画像。Idleのときだけ不在
    pub fn image(&self) -> Option<&SelectedImage> {
        match &self.stage {
            Stage::Idle => None,
            Stage::Loaded { image }
            | Stage::Analyzing { image }
            | Stage::Complete { image, .. }
            | Stage::Failed { image } => Some(image),
        }
    }

    /// 現在の結果。Completeのときだけ存在
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.stage {
            Stage::Complete { result, .. } => Some(result),
            _ => None,
        }
    }

    /// 候補を検証して読み込み、既存の選択を置き換える
    ///
    /// 成功すると直前の状態に関わらずLoadedになり、以前の結果は破棄
    /// される。拒否時はセッションに触れない。どちらの経路も通知を出す。
    pub fn select(&mut self, candidate: ImageCandidate) -> Result<(), ValidationError> {
        match intake::select(candidate, &self.encoder) {
            Ok(image) => {
                self.generation += 1;
                self.stage = Stage::Loaded { image };
                self.notifier.notify(Notice::success("Image loaded", "Ready for analysis"));
                Ok(())
            }
            Err(err) => {
                self.notifier.notify(Notice::error("Invalid file type", "Please upload an image"));
                Err(err)
            }
        }
    }

    /// 選択と結果を捨ててIdleへ戻る
    pub fn clear(&mut self) {
        self.generation += 1;
        self.stage = Stage::Idle;
    }

    /// セッションをAnalyzingへ進め、送信すべきリクエストを返す
    ///
    /// 遷移はI/Oより先に起きるので、観測側は即座に進行中を見られる。
    /// 画像がない場合と解析が既に飛行中の場合はNoneを返し、何も送信
    /// しないno-opになる。
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        let image = match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Loaded { image }
            | Stage::Complete { image, .. }
            | Stage::Failed { image } => image,
            other => {
                self.stage = other;
                return None;
            }
        };

        let request = AnalysisRequest::new(&image);
        self.stage = Stage::Analyzing { image };
        Some(AnalysisTicket { request, generation: self.generation })
    }

    /// 発行済みチケットに対するレスポンスを適用する
    ///
    /// 飛行中にクリア・再選択で選択が先へ進んでいた場合、そのレスポンス
    /// は状態に触れずに破棄される。失敗時は選択画像とプレビューをその
    /// まま残すので、再アップロードなしでリトライできる。
    pub fn apply_response(
        &mut self,
        ticket: AnalysisTicket,
        response: Result<AnalysisResult, AnalysisError>,
    ) -> AnalyzeOutcome {
        match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Analyzing { mut image } if ticket.generation == self.generation => {
                match response {
                    Ok(result) => {
                        if let Some(preview) = &result.annotated_preview {
                            image.preview = preview.clone();
                        }
                        let count = result.detection_count;
                        self.stage = Stage::Complete { image, result };
                        self.notifier.notify(Notice::success(
                            "Analysis complete",
                            format!("Found {} items", count),
                        ));
                        AnalyzeOutcome::Completed
                    }
                    Err(err) => {
                        self.stage = Stage::Failed { image };
                        self.notifier
                            .notify(Notice::error("Error", "Could not analyze the image"));
                        AnalyzeOutcome::Failed(err)
                    }
                }
            }
            other => {
                // 古いレスポンス。セッションはもうこのチケットを待っていない
                self.stage = other;
                AnalyzeOutcome::Skipped
            }
        }
    }

    /// `backend` に対して解析を1回実行する
    ///
    /// 飛行中のリクエストはセッションあたり常に1つ。Analyzing中や画像
    /// 未選択での呼び出しは何も送らず `Skipped` を返す。
    pub async fn analyze<B: DetectionBackend>(&mut self, backend: &B) -> AnalyzeOutcome {
        let Some(ticket) = self.begin_analysis() else {
            return AnalyzeOutcome::Skipped;
        };
        let response = backend.detect(&ticket.request).await;
        self.apply_response(ticket, response)
    }
}
