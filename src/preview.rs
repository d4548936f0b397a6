use crate::{error::Result, models::RenderedImage};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Counts itself as live until dropped.
#[derive(Debug)]
struct LiveToken(Arc<AtomicUsize>);

impl LiveToken {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        LiveToken(Arc::clone(counter))
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Displayable image produced by the last successful generation.
///
/// Only [`PreviewManager`] creates or drops these; everyone else borrows.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    created_at: DateTime<Utc>,
    content_type: String,
    bytes: Vec<u8>,
    _live: LiveToken,
}

impl PreviewHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Self-contained `data:` URL for embedding the image.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        log::info!(
            "Saved preview {} ({} bytes) to {}",
            self.id,
            self.bytes.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn info(&self) -> PreviewInfo {
        PreviewInfo {
            id: self.id,
            created_at: self.created_at,
            content_type: self.content_type.clone(),
            size_bytes: self.bytes.len(),
        }
    }
}

/// Owned summary of a preview, safe to hand out and keep around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub content_type: String,
    pub size_bytes: usize,
}

/// Owns the single current preview. At most one handle is live at a time.
#[derive(Debug, Default)]
pub struct PreviewManager {
    current: Option<PreviewHandle>,
    live: Arc<AtomicUsize>,
    installed_total: u64,
}

impl PreviewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the previous preview, then installs one built from `image`.
    pub fn install(&mut self, image: RenderedImage) -> &PreviewHandle {
        self.release_current();

        let handle = PreviewHandle {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            content_type: image.content_type,
            bytes: image.bytes,
            _live: LiveToken::acquire(&self.live),
        };
        log::debug!("Installed preview {} ({} bytes)", handle.id, handle.len());

        self.installed_total += 1;
        self.current.insert(handle)
    }

    pub fn clear(&mut self) {
        self.release_current();
    }

    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    /// Handles created by this manager that have not been dropped yet.
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn installed_total(&self) -> u64 {
        self.installed_total
    }

    fn release_current(&mut self) {
        if let Some(previous) = self.current.take() {
            log::debug!("Released preview {}", previous.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_replaces_and_releases() {
        let mut manager = PreviewManager::new();
        assert!(manager.current().is_none());
        assert_eq!(manager.live_count(), 0);

        let mut ids = Vec::new();
        for round in 0..5u8 {
            let id = manager.install(RenderedImage::png(vec![round; 4])).id();
            ids.push(id);
            assert_eq!(manager.live_count(), 1);
        }

        assert_eq!(manager.installed_total(), 5);
        assert_eq!(manager.current().map(PreviewHandle::id), ids.last().copied());
        assert_eq!(manager.current().unwrap().bytes(), &[4, 4, 4, 4]);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut manager = PreviewManager::new();
        manager.install(RenderedImage::png(vec![1, 2, 3]));
        manager.clear();

        assert!(manager.current().is_none());
        assert_eq!(manager.live_count(), 0);

        manager.clear();
        assert_eq!(manager.live_count(), 0);
    }

    #[test]
    fn test_data_url() {
        let mut manager = PreviewManager::new();
        let handle = manager.install(RenderedImage::png(b"png".to_vec()));
        assert_eq!(handle.data_url(), "data:image/png;base64,cG5n");
    }

    #[test]
    fn test_save_to_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");

        let mut manager = PreviewManager::new();
        let info = manager.install(RenderedImage::png(vec![9, 8, 7])).info();
        manager.current().unwrap().save_to(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 8, 7]);
        assert_eq!(info.size_bytes, 3);
        assert_eq!(info.content_type, "image/png");
    }
}
