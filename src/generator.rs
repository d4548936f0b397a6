use crate::{
    api::{QrApiClient, RenderClient, RenderService, UploadClient, UploadService},
    compose::compose,
    config::ClientConfig,
    error::{QrError, Result, ValidationError},
    logger::Timer,
    models::FormSnapshot,
    preview::{PreviewHandle, PreviewInfo, PreviewManager},
};
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Validating,
    ResolvingUpload,
    Composing,
    Invoking,
    Installing,
    Failed,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationState::Idle => "idle",
            GenerationState::Validating => "validating",
            GenerationState::ResolvingUpload => "resolving-upload",
            GenerationState::Composing => "composing",
            GenerationState::Invoking => "invoking",
            GenerationState::Installing => "installing",
            GenerationState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How often a failed boundary call is attempted again. Validation errors
/// are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries.unwrap_or(0),
            backoff: config.retry_backoff(),
        }
    }
}

/// Runs one generation attempt at a time and owns the current preview.
pub struct Generator<R, U> {
    renderer: R,
    uploader: U,
    retry: RetryPolicy,
    in_flight: AtomicBool,
    state: Mutex<GenerationState>,
    preview: Mutex<PreviewManager>,
}

impl Generator<RenderClient, UploadClient> {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = QrApiClient::new(config)?;
        Ok(Self::new(client.render().clone(), client.upload().clone())
            .with_retry_policy(RetryPolicy::from_config(config)))
    }
}

impl<R: RenderService, U: UploadService> Generator<R, U> {
    pub fn new(renderer: R, uploader: U) -> Self {
        Self {
            renderer,
            uploader,
            retry: RetryPolicy::none(),
            in_flight: AtomicBool::new(false),
            state: Mutex::new(GenerationState::Idle),
            preview: Mutex::new(PreviewManager::new()),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn state(&self) -> GenerationState {
        *lock(&self.state)
    }

    /// Validates, uploads if needed, renders and installs the new preview.
    ///
    /// On any failure the previous preview is left as it was.
    pub async fn generate(&self, form: &FormSnapshot) -> Result<PreviewInfo> {
        let _run = self.begin_run()?;
        let attempt = Uuid::new_v4();
        let _timer = Timer::new(&format!("generate {} [{}]", form.mode, attempt));

        let outcome = self.run(form).await;
        match &outcome {
            Ok(info) => log::info!(
                "QR code ready: preview {} ({} bytes) [{}]",
                info.id,
                info.size_bytes,
                attempt
            ),
            Err(e) => {
                self.transition(GenerationState::Failed);
                log::error!("QR generation failed [{}]: {}", attempt, e);
            }
        }
        outcome
    }

    async fn run(&self, form: &FormSnapshot) -> Result<PreviewInfo> {
        if !form.has_content() {
            return Err(ValidationError::NoContentProvided.into());
        }

        let resolved;
        let form = match form.pending_upload() {
            Some(file) => {
                self.transition(GenerationState::ResolvingUpload);
                let url = self
                    .with_retries("upload", || self.uploader.upload(file))
                    .await?;
                resolved = form.clone().with_image_url(url);
                &resolved
            }
            None => form,
        };

        self.transition(GenerationState::Composing);
        let request = compose(form)?.ready().ok_or_else(|| {
            QrError::upload_failed(
                self.uploader.endpoint(),
                "upload did not yield an image reference",
            )
        })?;
        log::debug!("Composed request: {:?}", request);

        self.transition(GenerationState::Invoking);
        let image = self
            .with_retries("render", || self.renderer.render(&request))
            .await?;
        drop(request);

        self.transition(GenerationState::Installing);
        let mut preview = lock(&self.preview);
        Ok(preview.install(image).info())
    }

    async fn with_retries<T, F, Fut>(&self, label: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Err(e) if e.is_boundary() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "{} failed, retrying ({}/{}): {}",
                        label,
                        attempt,
                        self.retry.max_retries,
                        e
                    );
                    if !self.retry.backoff.is_zero() {
                        tokio::time::sleep(self.retry.backoff).await;
                    }
                }
                outcome => return outcome,
            }
        }
    }

    fn begin_run(&self) -> Result<RunGuard<'_, R, U>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::warn!("Ignoring generate request: another generation is in progress");
            return Err(QrError::GenerationInProgress);
        }
        self.transition(GenerationState::Validating);
        Ok(RunGuard { generator: self })
    }

    fn transition(&self, next: GenerationState) {
        let mut state = lock(&self.state);
        log::debug!("Generation state: {} -> {}", *state, next);
        *state = next;
    }

    pub fn current_preview(&self) -> Option<PreviewInfo> {
        lock(&self.preview).current().map(PreviewHandle::info)
    }

    /// Copy of the current image bytes; the handle itself stays with the manager.
    pub fn current_bytes(&self) -> Option<Vec<u8>> {
        lock(&self.preview).current().map(|p| p.bytes().to_vec())
    }

    pub fn current_data_url(&self) -> Option<String> {
        lock(&self.preview).current().map(PreviewHandle::data_url)
    }

    pub fn save_preview(&self, path: impl AsRef<Path>) -> Result<PreviewInfo> {
        let preview = lock(&self.preview);
        let handle = preview.current().ok_or_else(|| {
            QrError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no QR code has been generated yet",
            ))
        })?;
        handle.save_to(path)?;
        Ok(handle.info())
    }

    pub fn clear_preview(&self) {
        lock(&self.preview).clear();
    }

    pub fn live_previews(&self) -> usize {
        lock(&self.preview).live_count()
    }
}

/// Returns the generator to `Idle` when an attempt ends, including when
/// the attempt's future is dropped mid-flight.
struct RunGuard<'a, R: RenderService, U: UploadService> {
    generator: &'a Generator<R, U>,
}

impl<R: RenderService, U: UploadService> Drop for RunGuard<'_, R, U> {
    fn drop(&mut self) {
        self.generator.transition(GenerationState::Idle);
        self.generator.in_flight.store(false, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
