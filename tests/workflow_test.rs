//! select → analyze → render の一気通貫テスト
//!
//! ライブサービスの代わりにスクリプト済みバックエンドと合成バック
//! エンドを使う

use evidence_ai_common::{
    overlay, AnalysisError, AnalysisRequest, AnalysisResult, AnalyzeOutcome, Detection,
    DetectionBackend, ImageCandidate, Notice, NoticeKind, Notifier, Region, UploadWorkflow,
    WorkflowState,
};
use evidence_ai_rust::backend::SyntheticBackend;
use evidence_ai_rust::intake::DataUriEncoder;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Default)]
struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// 固定レスポンスを返し、呼ばれた回数を数えるバックエンド
struct ScriptedBackend {
    response: Result<AnalysisResult, AnalysisError>,
    calls: Cell<usize>,
}

impl ScriptedBackend {
    fn ok(result: AnalysisResult) -> Self {
        Self { response: Ok(result), calls: Cell::new(0) }
    }

    fn failing(error: AnalysisError) -> Self {
        Self { response: Err(error), calls: Cell::new(0) }
    }
}

impl DetectionBackend for ScriptedBackend {
    async fn detect(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone()
    }
}

fn two_megabyte_jpeg() -> ImageCandidate {
    let mut bytes = vec![0u8; 2 * 1024 * 1024];
    bytes[..4].copy_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
    ImageCandidate {
        file_name: "scene.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        bytes,
    }
}

fn two_detections() -> AnalysisResult {
    AnalysisResult {
        detections: vec![
            Detection {
                category: "Blood trace".to_string(),
                confidence: 0.89,
                region: Region { x: 12.0, y: 40.0, width: 80.0, height: 64.0 },
            },
            Detection {
                category: "Weapon".to_string(),
                confidence: 0.95,
                region: Region { x: 200.0, y: 120.0, width: 150.0, height: 90.0 },
            },
        ],
        detection_count: 2,
        confidence: 0.92,
        processing_time: Some("120ms".to_string()),
        annotated_preview: None,
    }
}

#[tokio::test]
async fn full_cycle_select_analyze_render() {
    let notifier = RecordingNotifier::default();
    let notices = Rc::clone(&notifier.notices);
    let mut workflow = UploadWorkflow::new(DataUriEncoder, notifier);

    workflow.select(two_megabyte_jpeg()).unwrap();
    assert_eq!(workflow.state(), WorkflowState::Loaded);

    let backend = ScriptedBackend::ok(two_detections());
    let outcome = workflow.analyze(&backend).await;
    assert!(matches!(outcome, AnalyzeOutcome::Completed));
    assert_eq!(workflow.state(), WorkflowState::Complete);
    assert_eq!(backend.calls.get(), 1);

    let result = workflow.result().unwrap();
    assert_eq!(result.detection_count, 2);

    let boxes = overlay::render(workflow.image().unwrap(), result);
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].label, "Blood trace (89%)");
    assert_eq!(boxes[1].label, "Weapon (95%)");
    assert_eq!(overlay::summarize(result).confidence_percent, 92);

    // 通知の順序: 読み込み成功 → 解析完了
    let notices = notices.borrow();
    assert_eq!(notices[0].title, "Image loaded");
    assert_eq!(notices[1].title, "Analysis complete");
    assert_eq!(notices[1].detail, "Found 2 items");
    assert_eq!(notices[1].kind, NoticeKind::Success);
}

#[tokio::test]
async fn failed_analysis_keeps_preview_and_allows_retry() {
    let mut workflow = UploadWorkflow::new(DataUriEncoder, RecordingNotifier::default());
    workflow.select(two_megabyte_jpeg()).unwrap();
    let preview_before = workflow.image().unwrap().preview.clone();

    let failing = ScriptedBackend::failing(AnalysisError::Service("status 500".to_string()));
    let outcome = workflow.analyze(&failing).await;
    assert!(matches!(outcome, AnalyzeOutcome::Failed(AnalysisError::Service(_))));
    assert_eq!(workflow.state(), WorkflowState::Failed);
    // プレビューはクリアされない
    assert_eq!(workflow.image().unwrap().preview, preview_before);

    // 再選択なしでそのままリトライできる
    let backend = ScriptedBackend::ok(two_detections());
    let outcome = workflow.analyze(&backend).await;
    assert!(matches!(outcome, AnalyzeOutcome::Completed));
    assert_eq!(workflow.state(), WorkflowState::Complete);
}

#[tokio::test]
async fn analyze_without_selection_sends_nothing() {
    let mut workflow = UploadWorkflow::new(DataUriEncoder, RecordingNotifier::default());
    let backend = ScriptedBackend::ok(two_detections());

    let outcome = workflow.analyze(&backend).await;
    assert!(matches!(outcome, AnalyzeOutcome::Skipped));
    assert_eq!(workflow.state(), WorkflowState::Idle);
    assert_eq!(backend.calls.get(), 0);
}

#[tokio::test]
async fn clear_from_complete_starts_a_fresh_cycle() {
    let mut workflow = UploadWorkflow::new(DataUriEncoder, RecordingNotifier::default());
    workflow.select(two_megabyte_jpeg()).unwrap();
    let backend = ScriptedBackend::ok(two_detections());
    workflow.analyze(&backend).await;
    assert_eq!(workflow.state(), WorkflowState::Complete);

    workflow.clear();
    assert_eq!(workflow.state(), WorkflowState::Idle);
    assert!(workflow.result().is_none());

    // 前回の結果が漏れずに新しいサイクルが回る
    workflow.select(two_megabyte_jpeg()).unwrap();
    let empty = ScriptedBackend::ok(AnalysisResult::default());
    workflow.analyze(&empty).await;
    assert_eq!(workflow.result().unwrap().detection_count, 0);
}

#[tokio::test]
async fn synthetic_backend_end_to_end() {
    let mut workflow = UploadWorkflow::new(DataUriEncoder, RecordingNotifier::default());
    workflow.select(two_megabyte_jpeg()).unwrap();

    let backend = SyntheticBackend::new(Duration::from_millis(0));
    let outcome = workflow.analyze(&backend).await;
    assert!(matches!(outcome, AnalyzeOutcome::Completed));

    let result = workflow.result().unwrap();
    assert!((1..=3).contains(&result.detection_count));
    for detection in &result.detections {
        assert!(detection.confidence >= 0.70 && detection.confidence <= 1.00);
    }
    assert!(result.processing_time.as_ref().unwrap().contains("simulated"));

    let boxes = overlay::render(workflow.image().unwrap(), result);
    assert_eq!(boxes.len(), result.detection_count);
}
