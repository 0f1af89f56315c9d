//! コンソール通知
//!
//! Webフロントエンドのトーストに相当する、ワークフロー通知の出力先

use evidence_ai_common::{Notice, NoticeKind, Notifier};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => println!("✔ {}: {}", notice.title, notice.detail),
            NoticeKind::Error => eprintln!("✖ {}: {}", notice.title, notice.detail),
        }
    }
}
