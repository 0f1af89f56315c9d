//! ライブ検出サービスクライアント
//!
//! 設定されたエンドポイントへ画像をmultipartでPOSTし、JSONボディを
//! 正規化済みの `AnalysisResult` にして返す

use evidence_ai_common::{
    parse_detect_response, AnalysisError, AnalysisRequest, AnalysisResult, DetectionBackend,
};
use reqwest::multipart;
use std::time::Duration;

pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    /// 画像を載せるフィールド名（既定は "file"）
    field_name: String,
}

impl HttpBackend {
    pub fn new(
        endpoint: impl Into<String>,
        field_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            field_name: field_name.into(),
        })
    }
}

impl DetectionBackend for HttpBackend {
    async fn detect(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let part = multipart::Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)
            .map_err(|e| AnalysisError::Network(format!("invalid content type: {}", e)))?;
        let form = multipart::Form::new().part(self.field_name.clone(), part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(format!("detection request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Service(format!("status {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(format!("failed to read response body: {}", e)))?;

        parse_detect_response(&body)
    }
}
