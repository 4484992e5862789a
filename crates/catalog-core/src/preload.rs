//! Image preloading
//!
//! Which images to fetch first is a pure function of the current position.
//! Fetching itself is an explicit per-image state machine:
//!
//! ```text
//! Pending -> Loaded
//!         -> RetryPending { attempt } -> ... -> Loaded | Failed
//! ```
//!
//! Loaded and Failed are final for the session. Requests for finalized
//! images resolve immediately, and results that arrive after an image was
//! finalized are ignored.

use crate::options::CatalogOptions;
use crate::types::BookConfig;
use crate::view::ViewWindow;
use crate::{CatalogError, Result};
use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Relative path of a content image: `images/page-01.jpg`
pub fn image_path(base_path: &str, idx: u32, format: &str) -> String {
    format!("{}page-{:02}.{}", base_path, idx, format)
}

/// Content image indices to fetch first, most urgent first.
///
/// Visible images come first, then neighbours within `range` positions
/// (including the facing page of the next spread). On a cover the first or
/// last two images are added since they are one turn away.
pub fn priority_images(
    config: &BookConfig,
    current: u32,
    window: Option<ViewWindow>,
    range: u32,
) -> Vec<u32> {
    let mut priority: Vec<u32> = Vec::new();
    let mut push = |idx: Option<u32>| {
        if let Some(idx) = idx {
            if idx >= 1 && idx <= config.content_pages && !priority.contains(&idx) {
                priority.push(idx);
            }
        }
    };

    if let Some(window) = window {
        for pos in window.present() {
            push(config.position_to_image_index(pos));
        }
    }

    for i in 1..=range {
        push(
            current
                .checked_sub(i)
                .and_then(|p| config.position_to_image_index(p)),
        );
        push(config.position_to_image_index(current + i));
        push(config.position_to_image_index(current + i + 1));
    }

    if current <= config.front_cover_pages {
        push(Some(1));
        push(Some(2));
    }

    if current >= config.back_cover_start() {
        push(Some(config.content_pages));
        push(config.content_pages.checked_sub(1));
    }

    priority
}

/// Load state of one content image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    /// The previous attempt failed or timed out; `attempt` retries issued so far
    RetryPending { attempt: u32 },
    Loaded,
    Failed,
}

impl LoadState {
    pub fn is_final(self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed)
    }
}

/// Loaded / failed bookkeeping for all content images
#[derive(Debug, Clone)]
pub struct ImageTracker {
    content_pages: u32,
    states: BTreeMap<u32, LoadState>,
}

impl ImageTracker {
    pub fn new(content_pages: u32) -> Self {
        Self {
            content_pages,
            states: BTreeMap::new(),
        }
    }

    pub fn state(&self, idx: u32) -> LoadState {
        self.states.get(&idx).copied().unwrap_or_default()
    }

    pub fn in_range(&self, idx: u32) -> bool {
        idx >= 1 && idx <= self.content_pages
    }

    /// True if the image exists and has not been finalized yet
    pub fn needs_load(&self, idx: u32) -> bool {
        self.in_range(idx) && !self.state(idx).is_final()
    }

    pub fn is_loaded(&self, idx: u32) -> bool {
        self.state(idx) == LoadState::Loaded
    }

    pub fn is_failed(&self, idx: u32) -> bool {
        self.state(idx) == LoadState::Failed
    }

    /// Returns false if the image was already finalized (late result)
    pub fn mark_loaded(&mut self, idx: u32) -> bool {
        self.finalize(idx, LoadState::Loaded)
    }

    /// Returns false if the image was already finalized (late result)
    pub fn mark_failed(&mut self, idx: u32) -> bool {
        self.finalize(idx, LoadState::Failed)
    }

    /// Downgrade a loaded image whose bytes turned out to be unusable
    pub fn mark_unusable(&mut self, idx: u32) {
        if self.is_loaded(idx) {
            self.states.insert(idx, LoadState::Failed);
        }
    }

    pub fn mark_retry(&mut self, idx: u32, attempt: u32) {
        if self.needs_load(idx) {
            self.states.insert(idx, LoadState::RetryPending { attempt });
        }
    }

    /// Images still waiting to be fetched, in index order
    pub fn remaining(&self) -> Vec<u32> {
        (1..=self.content_pages)
            .filter(|&idx| self.needs_load(idx))
            .collect()
    }

    pub fn loaded_count(&self) -> usize {
        self.states.values().filter(|s| **s == LoadState::Loaded).count()
    }

    fn finalize(&mut self, idx: u32, state: LoadState) -> bool {
        if !self.needs_load(idx) {
            return false;
        }
        self.states.insert(idx, state);
        true
    }
}

/// Source of image bytes
pub trait ImageFetcher: Send + Sync {
    /// Fetch `url`; it may carry a cache-busting query string
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Reads images relative to a directory, ignoring any query string
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageFetcher for FileFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let relative = url.split('?').next().unwrap_or(url);
        let path = self.root.join(relative);
        async move { Ok(tokio::fs::read(path).await?) }
    }
}

/// Outcome of a preload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fresh bytes for an image that was not loaded before
    Loaded(Vec<u8>),
    /// Out of range or already finalized; nothing was fetched
    Skipped,
}

/// Fetches images with a per-attempt timeout and bounded retries
pub struct ImageLoader<F> {
    fetcher: F,
    base_path: String,
    format: String,
    timeout: Duration,
    retry_count: u32,
}

impl<F: ImageFetcher> ImageLoader<F> {
    pub fn new(fetcher: F, base_path: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_path: base_path.into(),
            format: format.into(),
            timeout: Duration::from_millis(crate::constants::DEFAULT_IMAGE_LOAD_TIMEOUT_MS),
            retry_count: crate::constants::DEFAULT_RETRY_COUNT,
        }
    }

    pub fn from_options(fetcher: F, options: &CatalogOptions) -> Self {
        Self::new(fetcher, options.image_base_path.clone(), options.image_format.clone())
            .with_timeout(Duration::from_millis(options.image_load_timeout_ms))
            .with_retry_count(options.retry_count)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn path_for(&self, idx: u32) -> String {
        image_path(&self.base_path, idx, &self.format)
    }

    /// Load one image, updating `tracker` as the attempts progress
    pub async fn load(&self, tracker: &mut ImageTracker, idx: u32) -> Result<LoadOutcome> {
        if !tracker.needs_load(idx) {
            return Ok(LoadOutcome::Skipped);
        }

        let path = self.path_for(idx);
        let mut attempt = 0;

        loop {
            let url = if attempt == 0 {
                path.clone()
            } else {
                format!("{}?retry={}&t={}", path, attempt, unix_millis())
            };

            let error = match tokio::time::timeout(self.timeout, self.fetcher.fetch(&url)).await {
                Ok(Ok(bytes)) => {
                    if tracker.mark_loaded(idx) {
                        return Ok(LoadOutcome::Loaded(bytes));
                    }
                    return Ok(LoadOutcome::Skipped);
                }
                Ok(Err(e)) => CatalogError::ImageLoad {
                    path: path.clone(),
                    reason: e.to_string(),
                },
                Err(_) => CatalogError::ImageTimeout { path: path.clone() },
            };

            if attempt >= self.retry_count {
                tracker.mark_failed(idx);
                return Err(error);
            }

            attempt += 1;
            log::warn!(
                "Retrying image load ({}/{}): {}",
                attempt,
                self.retry_count,
                path
            );
            tracker.mark_retry(idx, attempt);
        }
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
