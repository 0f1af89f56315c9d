//! ワークフローの型定義
//!
//! CLIとテストで共有される型:
//! - SelectedImage: セッションが保持する選択済み画像
//! - AnalysisRequest: 検出リクエスト用のワンショットペイロード
//! - Detection / Region: 1件の検出結果と境界領域
//! - AnalysisResult: 正規化済みの検出サービス出力

use serde::{Deserialize, Serialize};

/// セッションに読み込まれている画像
///
/// 再選択・クリア時は丸ごと置き換える。部分的な変更はしない。
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    /// 宣言されたメディアタイプ（例: "image/jpeg"）
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// プレビュー表現（data URI）
    pub preview: String,
}

/// 検出リクエスト1回分の不変ペイロード
///
/// 解析開始時点の選択画像から構築される。送信する呼び出しの外に
/// ライフサイクルを持たない。
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AnalysisRequest {
    pub fn new(image: &SelectedImage) -> Self {
        Self {
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            bytes: image.bytes.clone(),
        }
    }
}

/// 境界領域（元画像の自然サイズ基準のピクセル座標）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// 1件の検出結果
///
/// カテゴリはオープンセット（"Blood trace", "Weapon" など）、
/// confidenceは[0, 1]。フィールド名は検出サービスのワイヤ形式に合わせる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "type")]
    pub category: String,
    pub confidence: f32,
    #[serde(rename = "location")]
    pub region: Region,
}

/// 検出リクエスト1回分の正規化済み結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub detections: Vec<Detection>,

    /// 正規化後は常に `detections.len()` と一致する
    pub detection_count: usize,

    /// 検出confidenceの平均（[0, 1]）
    pub confidence: f32,

    /// 表示用の処理時間（例: "120ms"）。ロジックでは使わない
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<String>,

    /// サービスが注釈済み画像を返した場合の置き換えプレビュー（data URI）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated_preview: Option<String>,
}
