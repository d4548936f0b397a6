pub mod render_client;
pub mod traits;
pub mod upload_client;

use crate::{
    config::ClientConfig,
    error::{QrError, Result},
};
use reqwest::Client;

pub use render_client::RenderClient;
pub use traits::{RenderService, UploadService};
pub use upload_client::UploadClient;

/// Both backend endpoints behind one configured HTTP client.
#[derive(Clone)]
pub struct QrApiClient {
    render_client: RenderClient,
    upload_client: UploadClient,
    base_url: String,
}

impl QrApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.resolved_base_url()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| QrError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        log::info!("Using QR API base URL: {}", base_url);

        Ok(Self {
            render_client: RenderClient::new(client.clone(), &base_url),
            upload_client: UploadClient::new(client, &base_url),
            base_url,
        })
    }

    pub fn render(&self) -> &RenderClient {
        &self.render_client
    }

    pub fn upload(&self) -> &UploadClient {
        &self.upload_client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_derive_from_base_url() {
        let config = ClientConfig::new().with_base_url("https://qr.example.com/");
        let client = QrApiClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "https://qr.example.com");
        assert_eq!(
            RenderService::endpoint(client.render()),
            "https://qr.example.com/api/qr"
        );
        assert_eq!(
            UploadService::endpoint(client.upload()),
            "https://qr.example.com/api/upload-image"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClientConfig::new().with_base_url("::nope::");
        assert!(matches!(
            QrApiClient::new(&config),
            Err(QrError::ConfigError(_))
        ));
    }
}
