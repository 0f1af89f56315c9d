//! ディスクからのファイルインテイク
//!
//! パスから検証前の候補を作り、base64 data URIのプレビューエンコーダを
//! 提供する。CLIにはブラウザのFileオブジェクトが無いので、宣言
//! Content-Typeはここで拡張子テーブルから導出する。検証そのものは
//! あくまで宣言タイプのプレフィックスで行われる（common側）。

use crate::error::{EvidenceAiError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use evidence_ai_common::{ImageCandidate, PreviewEncoder};
use std::path::Path;

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
];

/// 拡張子から宣言Content-Typeを決める。不明な拡張子はoctet-stream
pub fn declared_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    CONTENT_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, content_type)| *content_type)
        .unwrap_or("application/octet-stream")
}

/// パスを読み込んで検証前の候補を作る（読み込みは非同期）
pub async fn candidate_from_path(path: &Path) -> Result<ImageCandidate> {
    if !path.exists() {
        return Err(EvidenceAiError::FileNotFound(path.display().to_string()));
    }

    let content_type = declared_content_type(path).to_string();
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(ImageCandidate { file_name, content_type, bytes })
}

/// base64 data URIのプレビューエンコーダ
pub struct DataUriEncoder;

impl PreviewEncoder for DataUriEncoder {
    fn encode(&self, content_type: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
    }
}
