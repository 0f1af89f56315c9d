//! インテイク検証
//!
//! ユーザーが選択したファイルを受け取り、プレビュー付きの
//! `SelectedImage` を作るか拒否する。判定は宣言されたContent-Typeのみ。
//! 拡張子やバイト列のスニッフィングでは判定しない。

use crate::error::ValidationError;
use crate::types::SelectedImage;

/// 検証前のファイル候補（バイト列＋宣言メタデータ）
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    pub file_name: String,
    /// 渡し手が宣言したメディアタイプ
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// バイナリをプレビュー表現（base64 data URIなど）へ変換する
///
/// 実エンコードなしでワークフローをテストできるよう注入する。
pub trait PreviewEncoder {
    fn encode(&self, content_type: &str, bytes: &[u8]) -> String;
}

/// 候補を検証して `SelectedImage` を作る
///
/// 宣言Content-Typeが `image/*` でなければ拒否。拒否時に部分的な
/// `SelectedImage` は作られない。
pub fn select<E: PreviewEncoder>(
    candidate: ImageCandidate,
    encoder: &E,
) -> Result<SelectedImage, ValidationError> {
    if !candidate.content_type.starts_with("image/") {
        return Err(ValidationError::InvalidType {
            declared: candidate.content_type,
        });
    }

    let preview = encoder.encode(&candidate.content_type, &candidate.bytes);
    Ok(SelectedImage {
        file_name: candidate.file_name,
        content_type: candidate.content_type,
        bytes: candidate.bytes,
        preview,
    })
}
