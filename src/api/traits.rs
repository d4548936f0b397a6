use crate::{
    error::Result,
    models::{GenerationRequest, LocalFile, RenderedImage},
};
use async_trait::async_trait;

/// Remote service that turns a [`GenerationRequest`] into image bytes.
#[async_trait]
pub trait RenderService: Send + Sync {
    async fn render(&self, request: &GenerationRequest) -> Result<RenderedImage>;

    /// Address reported in error messages.
    fn endpoint(&self) -> &str;
}

/// Remote storage that accepts a local file and hands back a URL for it.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload(&self, file: &LocalFile) -> Result<String>;

    fn endpoint(&self) -> &str;
}
