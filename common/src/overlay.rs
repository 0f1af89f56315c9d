//! オーバーレイ描画データの生成
//!
//! 解析結果から表示用のオーバーレイ矩形とサマリーを作る純関数。
//! I/Oも副作用もなく、同じ入力には常に同じ出力を返す。

use crate::types::{AnalysisResult, Region, SelectedImage};

/// 検出領域に重ねて表示する矩形＋ラベル
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub region: Region,
    /// カテゴリ＋整数パーセントのconfidence（例: "Weapon (95%)"）
    pub label: String,
}

/// 1回の解析の表示用サマリー
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub detection_count: usize,
    /// 全体confidenceを四捨五入した整数パーセント
    pub confidence_percent: u8,
    pub processing_time: Option<String>,
    pub labels: Vec<String>,
}

/// [0, 1]のconfidenceを整数パーセントへ四捨五入
pub fn confidence_percent(confidence: f32) -> u8 {
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}

fn format_label(category: &str, confidence: f32) -> String {
    format!("{} ({}%)", category, confidence_percent(confidence))
}

/// 各検出を検出順のままオーバーレイ矩形へ写す
///
/// 座標は変換せずそのまま通す。選択画像の自然サイズ基準のピクセル
/// 空間のままで、表示サイズが違ってもリスケールしない（既知の制限）。
/// 空の検出集合は空のシーケンスになる。「何も見つからない」は正常な
/// 結果でありエラーではない。
///
/// オーバーレイ座標は計算元の `SelectedImage` とペアでのみ意味を持つ。
/// 引数の画像はそのペアを固定するためのもの。
pub fn render(_image: &SelectedImage, result: &AnalysisResult) -> Vec<OverlayBox> {
    result
        .detections
        .iter()
        .map(|d| OverlayBox {
            region: d.region,
            label: format_label(&d.category, d.confidence),
        })
        .collect()
}

/// 解析完了時の表示用サマリーを作る
pub fn summarize(result: &AnalysisResult) -> AnalysisSummary {
    AnalysisSummary {
        detection_count: result.detection_count,
        confidence_percent: confidence_percent(result.confidence),
        processing_time: result.processing_time.clone(),
        labels: result
            .detections
            .iter()
            .map(|d| format_label(&d.category, d.confidence))
            .collect(),
    }
}
