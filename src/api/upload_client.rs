use crate::{
    api::traits::UploadService,
    error::{QrError, Result},
    models::{LocalFile, UploadResponse},
};
use async_trait::async_trait;
use reqwest::{multipart, Client};

/// Uploads a local image so the rendering service can reference it by URL.
#[derive(Clone)]
pub struct UploadClient {
    client: Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/upload-image", base_url),
        }
    }

    pub async fn upload_file(&self, file: &LocalFile) -> Result<String> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| self.failure(format!("invalid content type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        log::info!(
            "Uploading {} ({} bytes) to {}",
            file.name,
            file.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.failure(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.failure(format!(
                "server responded with {}: {}",
                status,
                error_text.trim()
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| self.failure(format!("failed to parse upload response: {}", e)))?;

        let url = parsed
            .url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| self.failure("upload response did not contain a url"))?;

        log::info!("Uploaded {} as {}", file.name, url);
        Ok(url)
    }

    fn failure(&self, message: impl Into<String>) -> QrError {
        let error = QrError::upload_failed(&self.endpoint, message);
        log::debug!("{}", error);
        error
    }
}

#[async_trait]
impl UploadService for UploadClient {
    async fn upload(&self, file: &LocalFile) -> Result<String> {
        self.upload_file(file).await
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
