//! 検出バックエンド
//!
//! ライブHTTPバックエンドと合成オフラインバックエンド。どちらを使うか
//! は統合境界（main）が明示的に決める。ライブ呼び出しが失敗したときに
//! 合成へ黙って切り替えることはしない

mod http;
mod synthetic;

pub use http::HttpBackend;
pub use synthetic::SyntheticBackend;
