//! 検出ボックスの焼き込み
//!
//! 選択画像に各オーバーレイ領域の枠線を描き、タイムスタンプ付きの
//! 注釈済みコピーとして保存する。出力名は検出サービス自身の
//! output_<timestamp> 規約に合わせる

use crate::error::{EvidenceAiError, Result};
use chrono::Local;
use evidence_ai_common::OverlayBox;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

const BOX_COLOR: Rgba<u8> = Rgba([220, 38, 38, 255]);
const BOX_THICKNESS: u32 = 3;

/// 入力の隣に置く注釈済みコピーのパス
pub fn annotated_output_path(input: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("annotated_{}_{}", timestamp, file_name))
}

/// オーバーレイ矩形を焼き込んだコピーを保存する
pub fn save_annotated(bytes: &[u8], overlays: &[OverlayBox], output: &Path) -> Result<()> {
    let mut img = image::load_from_memory(bytes)
        .map_err(|e| EvidenceAiError::ImageLoad(e.to_string()))?
        .to_rgba8();

    for overlay in overlays {
        if let Some(bbox) = clamp_region(overlay, img.dimensions()) {
            draw_rect(&mut img, bbox, BOX_COLOR, BOX_THICKNESS);
        }
    }

    img.save(output)
        .map_err(|e| EvidenceAiError::ImageSave(e.to_string()))?;
    Ok(())
}

/// 領域をピクセル座標に落とし、画像境界へクランプする
///
/// 完全に画像外の領域はNone（オーバーレイ座標は表示時には変換されない
/// ため、焼き込み時だけ境界へ収める）。
fn clamp_region(overlay: &OverlayBox, dims: (u32, u32)) -> Option<[u32; 4]> {
    let (w, h) = dims;
    if w == 0 || h == 0 {
        return None;
    }
    let clamp = |v: f32, max: u32| -> u32 { v.max(0.0).min((max - 1) as f32) as u32 };

    let x0 = clamp(overlay.region.x, w);
    let y0 = clamp(overlay.region.y, h);
    let x1 = clamp(overlay.region.x + overlay.region.width, w);
    let y1 = clamp(overlay.region.y + overlay.region.height, h);
    if overlay.region.x >= w as f32 || overlay.region.y >= h as f32 || x0 > x1 || y0 > y1 {
        return None;
    }
    Some([x0, y0, x1, y1])
}

/// 指定の太さで矩形の枠線を描く
fn draw_rect(img: &mut RgbaImage, bbox_px: [u32; 4], color: Rgba<u8>, thickness: u32) {
    let (w, h) = img.dimensions();
    let [x0, y0, x1, y1] = bbox_px;

    for t in 0..thickness {
        let left = x0.saturating_add(t);
        let top = y0.saturating_add(t);
        let right = x1.saturating_sub(t);
        let bottom = y1.saturating_sub(t);
        if left > right || top > bottom || right >= w || bottom >= h {
            continue;
        }

        for x in left..=right {
            img.put_pixel(x, top, color);
            img.put_pixel(x, bottom, color);
        }
        for y in top..=bottom {
            img.put_pixel(left, y, color);
            img.put_pixel(right, y, color);
        }
    }
}
