use crate::error::{EvidenceAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 検出サービスのURL（例: http://localhost:5000/detect）
    /// 未設定なら合成バックエンドが選ばれる
    pub endpoint: Option<String>,

    /// 画像を載せるmultipartフィールド名
    /// サービスには "file" 世代と "image" 世代があるため設定可能にする
    pub multipart_field: String,

    pub timeout_seconds: u64,

    /// 合成バックエンドの擬似処理時間
    pub synthetic_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            multipart_field: "file".into(),
            timeout_seconds: 120,
            synthetic_delay_ms: 1500,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EvidenceAiError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("evidence-ai").join("config.json"))
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        self.endpoint = Some(endpoint);
        self.save()
    }

    pub fn set_field(&mut self, field: String) -> Result<()> {
        self.multipart_field = field;
        self.save()
    }
}
