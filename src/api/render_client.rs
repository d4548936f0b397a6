use crate::{
    api::traits::RenderService,
    error::{QrError, Result},
    models::{GenerationRequest, RenderedImage, WireRequest, DEFAULT_IMAGE_CONTENT_TYPE},
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};

#[derive(Clone)]
pub struct RenderClient {
    client: Client,
    endpoint: String,
}

impl RenderClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/qr", base_url),
        }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<RenderedImage> {
        let builder = match request.to_wire() {
            WireRequest::Query(query) => {
                log::info!("Requesting {} QR code (GET {})", request.mode, self.endpoint);
                self.client.get(&self.endpoint).query(&query)
            }
            WireRequest::Json(body) => {
                log::info!("Requesting {} QR code (POST {})", request.mode, self.endpoint);
                if let Ok(json) = serde_json::to_string(&body) {
                    log::debug!("QR request payload: {}", json);
                }
                self.client.post(&self.endpoint).json(&body)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| self.failure(format!("request failed: {}", e)))?;

        self.read_image(response).await
    }

    async fn read_image(&self, response: Response) -> Result<RenderedImage> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = if error_text.trim().is_empty() {
                format!("server responded with {}", status)
            } else {
                format!("server responded with {}: {}", status, error_text.trim())
            };
            return Err(self.failure(message));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.failure(format!("failed to read image body: {}", e)))?;

        if bytes.is_empty() {
            return Err(self.failure("server returned an empty image"));
        }

        log::debug!("Received {} bytes of {}", bytes.len(), content_type);
        Ok(RenderedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    fn failure(&self, message: impl Into<String>) -> QrError {
        let error = QrError::render_failed(&self.endpoint, message);
        log::debug!("{}", error);
        error
    }
}

#[async_trait]
impl RenderService for RenderClient {
    async fn render(&self, request: &GenerationRequest) -> Result<RenderedImage> {
        self.generate(request).await
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
