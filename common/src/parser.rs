//! 検出サービスレスポンスのパーサー
//!
//! `/detect` 成功レスポンスのJSONボディをパースし、`AnalysisResult` へ
//! 正規化する:
//! - 検出件数は検出リスト自身から取る
//! - 全体confidenceが無ければ平均を計算する（デフォルト値にしない）
//! - 注釈済み画像（素のbase64）は置き換えプレビューになる

use crate::error::AnalysisError;
use crate::types::{AnalysisResult, Detection};
use serde::Deserialize;

/// 成功レスポンスのワイヤ形式
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectResponse {
    /// 注釈済み結果画像（素のbase64 JPEG、任意）
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    detections: Vec<Detection>,
    #[serde(default)]
    detection_count: Option<usize>,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    processing_time: Option<String>,
}

/// 成功ボディをパースして正規化済み `AnalysisResult` を返す
///
/// パースできないボディはワークフローから見れば到達不能なサービスと
/// 同じなので `AnalysisError::Network` に落とす。
pub fn parse_detect_response(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let response: DetectResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::Network(format!("malformed detection response: {}", e)))?;
    Ok(normalize(response))
}

/// 検出confidenceの算術平均。空集合は0.0
pub fn mean_confidence(detections: &[Detection]) -> f32 {
    if detections.is_empty() {
        return 0.0;
    }
    detections.iter().map(|d| d.confidence).sum::<f32>() / detections.len() as f32
}

fn normalize(response: DetectResponse) -> AnalysisResult {
    let detections = response.detections;

    // 検出リストが正。サービス申告のdetectionCountが食い違う場合は上書き
    let detection_count = detections.len();

    let confidence = match response.confidence {
        Some(value) => value,
        None => mean_confidence(&detections),
    };

    let annotated_preview = response
        .image
        .filter(|b64| !b64.is_empty())
        .map(|b64| format!("data:image/jpeg;base64,{}", b64));

    AnalysisResult {
        detections,
        detection_count,
        confidence,
        processing_time: response.processing_time,
        annotated_preview,
    }
}
