//! Client core for a remote QR code rendering service.
//!
//! A [`FormSnapshot`] is composed into a [`GenerationRequest`], local images
//! are uploaded first when needed, the request is sent to the rendering
//! service and the returned image becomes the single live preview.

pub mod api;
pub mod compose;
pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod models;
pub mod preview;

pub use api::{QrApiClient, RenderClient, RenderService, UploadClient, UploadService};
pub use compose::{compose, resolve_size, resolve_style, Composition, DEFAULT_SIZE};
pub use config::{base_url_for_origin, ClientConfig};
pub use error::{QrError, Result, ValidationError};
pub use generator::{GenerationState, Generator, RetryPolicy};
pub use models::*;
pub use preview::{PreviewHandle, PreviewInfo, PreviewManager};
